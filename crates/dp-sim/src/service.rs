//! `DispatchService` — shared pending set plus an engine.
//!
//! # Submissions during a run
//!
//! A run begins by atomically moving the entire pending set out of the
//! mutex; the lock is released before the first dispatch.  The run owns that
//! snapshot.  Orders submitted while it is in flight land in the now-empty
//! shared set and are dispatched by the **next** run, never by the current
//! one.
//!
//! When a run ends without consuming its snapshot (rejected, cancelled, or
//! aborted by a routing error) the leftover orders are merged back.  If an id
//! was re-submitted meanwhile, the newer submission is kept.

use std::sync::{Mutex, MutexGuard, PoisonError};

use dp_core::RunConfig;
use dp_dispatch::{DispatchQueue, DispatchResult, Order, OrderRequest};
use dp_spatial::Router;
use tracing::debug;

use crate::{
    CancelToken, DispatchEngine, DispatchObserver, NoopObserver, RouteResult, SimResult,
    SimulationOutcome,
};

/// Thread-safe submit/simulate facade.  `Send + Sync` whenever `R` is.
pub struct DispatchService<R: Router> {
    engine:  DispatchEngine<R>,
    pending: Mutex<DispatchQueue>,
}

impl<R: Router> DispatchService<R> {
    pub fn new(engine: DispatchEngine<R>) -> Self {
        Self { engine, pending: Mutex::new(DispatchQueue::new()) }
    }

    pub fn engine(&self) -> &DispatchEngine<R> {
        &self.engine
    }

    /// Normalize and enqueue an external order request.
    pub fn submit(&self, request: OrderRequest) -> DispatchResult<()> {
        self.submit_order(request.into_order())
    }

    /// Enqueue an already-built order.
    pub fn submit_order(&self, order: Order) -> DispatchResult<()> {
        self.lock().submit(order, self.engine.graph())
    }

    pub fn pending_count(&self) -> usize {
        self.lock().len()
    }

    /// Run a simulation over everything currently pending and return the
    /// route results in dispatch order.  Unroutable orders are omitted.
    pub fn simulate(&self, start_location: &str, congestion_factor: f64) -> SimResult<Vec<RouteResult>> {
        let run = RunConfig::new(start_location, congestion_factor);
        self.simulate_with(&run, None, &mut NoopObserver)
            .map(|outcome| outcome.results)
    }

    /// Full-control variant of [`simulate`](Self::simulate).
    pub fn simulate_with<O: DispatchObserver>(
        &self,
        run:      &RunConfig,
        cancel:   Option<&CancelToken>,
        observer: &mut O,
    ) -> SimResult<SimulationOutcome> {
        let mut snapshot = self.lock().take_all();

        let outcome = self.engine.run(&mut snapshot, run, cancel, observer);

        if !snapshot.is_empty() {
            let restored = self.lock().restore(snapshot);
            debug!(restored, "undispatched orders returned to the pending set");
        }
        outcome
    }

    fn lock(&self) -> MutexGuard<'_, DispatchQueue> {
        // Every queue mutation is a single map operation; a poisoned lock
        // still guards a consistent queue.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
