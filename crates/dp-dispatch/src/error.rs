use thiserror::Error;

use dp_core::{LocationId, OrderId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Validation: the order's destination is not a graph location.
    #[error("Destination {0} not found.")]
    UnknownDestination(LocationId),

    /// Validation: an order with this id is already pending.
    #[error("Order {0} is already pending.")]
    DuplicateOrder(OrderId),

    /// State: nothing to dispatch.
    #[error("Order queue is empty.")]
    EmptyQueue,
}

pub type DispatchResult<T> = Result<T, DispatchError>;
