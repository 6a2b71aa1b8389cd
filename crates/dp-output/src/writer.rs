//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, RouteResultRow, SkippedOrderRow};

/// Sink for dispatch run rows.
///
/// The observer never propagates these errors; it stores the first one for
/// [`DispatchOutputObserver::take_error`](crate::DispatchOutputObserver::take_error).
pub trait OutputWriter {
    fn write_route_result(&mut self, row: &RouteResultRow) -> OutputResult<()>;

    fn write_skipped(&mut self, row: &SkippedOrderRow) -> OutputResult<()>;

    /// Flush all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
