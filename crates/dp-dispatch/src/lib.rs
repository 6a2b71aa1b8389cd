//! `dp-dispatch` — orders, the dispatch priority score, and the dispatch queue.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`order`]    | `Order`, `OrderRequest`                                   |
//! | [`priority`] | `compute_dps`, `urgency`                                  |
//! | [`queue`]    | `DispatchQueue` (`BTreeMap<OrderId, Order>`), `DispatchDecision` |
//! | [`error`]    | `DispatchError`, `DispatchResult<T>`                      |
//!
//! # Ranking model (summary)
//!
//! The score of an order depends on the simulation clock *and* on the delay
//! it has accumulated while other orders were served, so no ordering is valid
//! across ticks.  The queue therefore stores raw orders and evaluates
//! [`compute_dps`] for every pending order at every decision.

pub mod error;
pub mod order;
pub mod priority;
pub mod queue;

#[cfg(test)]
mod tests;

pub use error::{DispatchError, DispatchResult};
pub use order::{Order, OrderRequest};
pub use priority::{compute_dps, urgency};
pub use queue::{DispatchDecision, DispatchQueue};
