//! The `DispatchEngine` and its dispatch loop.

use std::sync::Arc;

use dp_core::{DpError, PriorityWeights, RunConfig};
use dp_dispatch::{DispatchDecision, DispatchQueue, Order};
use dp_spatial::{check_congestion, LocationGraph, Router, SpatialError};
use tracing::{debug, info, warn};

use crate::{
    CancelToken, DispatchObserver, RouteResult, RunPhase, SimError, SimResult, SimulationOutcome,
    SimulationState, SkippedOrder,
};

/// Single-vehicle dispatch simulator.
///
/// Holds only read-only inputs (graph, router, score weights).  All mutable
/// run state lives in the [`SimulationState`] created by each call to
/// [`run`](Self::run), so one engine can serve concurrent runs on separate
/// queues.
pub struct DispatchEngine<R: Router> {
    graph:   Arc<LocationGraph>,
    router:  R,
    weights: PriorityWeights,
}

impl<R: Router> DispatchEngine<R> {
    /// Engine with the reference priority weights.
    pub fn new(graph: Arc<LocationGraph>, router: R) -> Self {
        Self { graph, router, weights: PriorityWeights::default() }
    }

    /// Override the priority weights.
    pub fn with_weights(mut self, weights: PriorityWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn graph(&self) -> &LocationGraph {
        &self.graph
    }

    pub fn weights(&self) -> &PriorityWeights {
        &self.weights
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Dispatch every order in `queue`, one at a time, from `run.start_location`.
    ///
    /// Rejected without touching the queue if it is empty, if the congestion
    /// factor is negative, non-finite or large enough to make an edge cost
    /// infinite, or if the start is not a graph location.  A leg whose
    /// travel time would push the clock past `u64::MAX` aborts the run with
    /// [`SimError::ClockOverflow`].  Orders whose destination is unreachable are dropped and
    /// reported through [`DispatchObserver::on_skip`] and
    /// [`SimulationOutcome::skipped`]; they never abort the run.
    ///
    /// If `cancel` fires, the loop stops before the next decision and returns
    /// [`SimError::Cancelled`]; undispatched orders stay in `queue`.
    pub fn run<O: DispatchObserver>(
        &self,
        queue:    &mut DispatchQueue,
        run:      &RunConfig,
        cancel:   Option<&CancelToken>,
        observer: &mut O,
    ) -> SimResult<SimulationOutcome> {
        // ── Admission ─────────────────────────────────────────────────────
        if queue.is_empty() {
            warn!(start = %run.start_location, "simulation rejected: order queue is empty");
            return Err(SimError::EmptyQueue);
        }
        let congestion = run.congestion_factor;
        run.validate().map_err(|e| match e {
            DpError::InvalidCongestion(c) => SimError::InvalidCongestion(c),
            DpError::EmptyLocation => SimError::UnknownStart(run.start_location.clone()),
        })?;
        check_congestion(&self.graph, congestion).map_err(|_| SimError::InvalidCongestion(congestion))?;
        let start = self
            .graph
            .node_of(&run.start_location)
            .ok_or_else(|| SimError::UnknownStart(run.start_location.clone()))?;

        // ── Reset per-run state ───────────────────────────────────────────
        let mut state = SimulationState::running(run.start_location.clone(), start);
        let mut results = Vec::with_capacity(queue.len());
        let mut skipped = Vec::new();

        info!(start = %state.vehicle_location, congestion, pending = queue.len(), "simulation started");
        observer.on_run_start(&state, queue.len());

        while !queue.is_empty() {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                state.phase = RunPhase::Cancelled;
                warn!(clock = %state.clock, remaining = queue.len(), "simulation cancelled");
                observer.on_run_end(&state);
                return Err(SimError::Cancelled(Box::new(SimulationOutcome { results, skipped, state })));
            }

            // ── ① Rank ────────────────────────────────────────────────────
            let DispatchDecision { order, dps } = queue.dispatch_next(state.clock, &self.weights)?;

            // ── ② Route ───────────────────────────────────────────────────
            let leg = match self.graph.node_of(&order.destination) {
                Some(dest) => self.router.route(&self.graph, state.vehicle_node, dest, congestion),
                // Queue built against a different graph: treat as a gap.
                None => Err(SpatialError::NoRoute { from: state.vehicle_node, to: Default::default() }),
            };
            let route = match leg {
                Ok(route) => route,
                Err(SpatialError::NoRoute { .. }) => {
                    let skip = skip_record(&order, &state);
                    warn!(
                        order = %skip.order_id,
                        destination = %skip.destination,
                        from = %skip.from,
                        "no route found; skipping order"
                    );
                    observer.on_skip(&skip);
                    skipped.push(skip);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            // ── ③ Emit ────────────────────────────────────────────────────
            let timing = route
                .travel_minutes(congestion)
                .and_then(|minutes| Some((minutes, state.clock.checked_offset(minutes)?)));
            let Some((travel_time, arrival)) = timing else {
                warn!(order = %order.id, clock = %state.clock, "travel time overflows the clock; aborting run");
                return Err(SimError::ClockOverflow { order: order.id, clock: state.clock });
            };
            let result = RouteResult {
                order_id:    order.id,
                route:       route.locations(&self.graph),
                gps_route:   route.positions(&self.graph),
                travel_time,
                start_time:  state.clock,
                dps,
            };
            debug!(
                order = %result.order_id,
                dps,
                start_time = %result.start_time,
                travel_time,
                legs = route.nodes.len().saturating_sub(1),
                "order dispatched"
            );
            observer.on_dispatch(&result);
            results.push(result);

            // ── ④ Advance  ⑤ Delay ────────────────────────────────────────
            let dest_node = route.nodes.last().copied().unwrap_or(state.vehicle_node);
            state.complete_leg(arrival, order.destination, dest_node);
            queue.propagate_delay(travel_time);
        }

        state.phase = RunPhase::Completed;
        info!(
            total_minutes = state.clock.minutes(),
            dispatched = results.len(),
            skipped = skipped.len(),
            "simulation ended"
        );
        observer.on_run_end(&state);
        Ok(SimulationOutcome { results, skipped, state })
    }
}

fn skip_record(order: &Order, state: &SimulationState) -> SkippedOrder {
    SkippedOrder {
        order_id:    order.id.clone(),
        destination: order.destination.clone(),
        from:        state.vehicle_location.clone(),
        at:          state.clock,
    }
}
