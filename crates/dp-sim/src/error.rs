use dp_core::{LocationId, OrderId, SimTime};
use dp_dispatch::DispatchError;
use dp_spatial::SpatialError;
use thiserror::Error;

use crate::{RunPhase, SimulationOutcome};

#[derive(Debug, Error)]
pub enum SimError {
    /// Nothing pending when the run was requested.  The run is rejected.
    #[error("Order queue is empty.")]
    EmptyQueue,

    #[error("Start location {0} not found.")]
    UnknownStart(LocationId),

    #[error("congestion factor must be a finite value >= 0, got {0}")]
    InvalidCongestion(f64),

    /// The run's [`CancelToken`](crate::CancelToken) fired between two
    /// dispatches.  Carries everything emitted up to that point; orders not
    /// yet dispatched were left in the queue.
    #[error("simulation cancelled after {} dispatched orders", .0.results.len())]
    Cancelled(Box<SimulationOutcome>),

    /// The congested travel time of a leg does not fit on the clock.  The
    /// order was already taken from the queue; later orders stay in it.
    #[error("travel time of order {order} overflows the clock at {clock}")]
    ClockOverflow { order: OrderId, clock: SimTime },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("routing error: {0}")]
    Routing(#[from] SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    /// Phase the run was in when it stopped with this error.
    pub fn phase(&self) -> RunPhase {
        match self {
            SimError::EmptyQueue | SimError::UnknownStart(_) | SimError::InvalidCongestion(_) => {
                RunPhase::Rejected
            }
            SimError::Cancelled(_) => RunPhase::Cancelled,
            SimError::ClockOverflow { .. } | SimError::Dispatch(_) | SimError::Routing(_) => {
                RunPhase::Running
            }
        }
    }
}
