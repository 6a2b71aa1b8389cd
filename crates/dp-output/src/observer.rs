//! `DispatchOutputObserver<W>` — bridges `DispatchObserver` to an `OutputWriter`.

use dp_sim::{DispatchObserver, RouteResult, SimulationState, SkippedOrder};

use crate::row::{RouteResultRow, SkippedOrderRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`DispatchObserver`] that writes every dispatch and skip to an
/// [`OutputWriter`].
///
/// Observer hooks return nothing, so write errors are stored.  After the run
/// returns, check with [`take_error`](Self::take_error).
pub struct DispatchOutputObserver<W: OutputWriter> {
    writer:     W,
    rows:       usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> DispatchOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// The stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows successfully written so far, across both outputs.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store(&mut self, result: OutputResult<()>) {
        match result {
            Ok(()) => self.rows += 1,
            // Keep only the first error.
            Err(e) if self.last_error.is_none() => self.last_error = Some(e),
            Err(_) => {}
        }
    }
}

impl<W: OutputWriter> DispatchObserver for DispatchOutputObserver<W> {
    fn on_dispatch(&mut self, result: &RouteResult) {
        let written = self.writer.write_route_result(&RouteResultRow::from(result));
        self.store(written);
    }

    fn on_skip(&mut self, skip: &SkippedOrder) {
        let written = self.writer.write_skipped(&SkippedOrderRow::from(skip));
        self.store(written);
    }

    fn on_run_end(&mut self, _state: &SimulationState) {
        if let Err(e) = self.writer.finish() {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}
