//! Observer trait for progress reporting and data collection.

use crate::{RouteResult, SimulationState, SkippedOrder};

/// Callbacks invoked by [`DispatchEngine::run`][crate::DispatchEngine::run]
/// at key points of the dispatch loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — leg printer
///
/// ```rust,ignore
/// struct LegPrinter;
///
/// impl DispatchObserver for LegPrinter {
///     fn on_dispatch(&mut self, r: &RouteResult) {
///         println!("{} leaves at {} for {} min", r.order_id, r.start_time, r.travel_time);
///     }
/// }
/// ```
pub trait DispatchObserver {
    /// Called once the run has been accepted, before the first dispatch.
    fn on_run_start(&mut self, _state: &SimulationState, _pending: usize) {}

    /// Called for every emitted route result, in dispatch order.
    fn on_dispatch(&mut self, _result: &RouteResult) {}

    /// Called when an order is dropped because no route exists.
    fn on_skip(&mut self, _skip: &SkippedOrder) {}

    /// Called once after the last dispatch, or after cancellation.
    fn on_run_end(&mut self, _state: &SimulationState) {}
}

/// A [`DispatchObserver`] that does nothing.
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}
