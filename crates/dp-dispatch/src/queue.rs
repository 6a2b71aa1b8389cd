//! `DispatchQueue` — the pending-order set.
//!
//! # Storage
//!
//! Scores depend on the clock and on accrued delay, so the relative order of
//! two pending orders can flip between decisions.  The queue stores raw
//! orders and re-ranks all of them at each decision, an O(n) scan per
//! dispatch.
//!
//! Orders are keyed by id in a `BTreeMap`, which enforces id uniqueness and
//! makes iteration order (ascending id) the tie-break for equal scores.

use std::collections::BTreeMap;

use dp_core::{OrderId, PriorityWeights, SimTime};
use dp_spatial::LocationGraph;
use tracing::{debug, info};

use crate::{DispatchError, DispatchResult, Order};

/// The order chosen by [`DispatchQueue::dispatch_next`] and the score that
/// won it the slot.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchDecision {
    pub order: Order,
    pub dps:   f64,
}

/// Set of pending orders, unique by id.
#[derive(Default, Debug, Clone)]
pub struct DispatchQueue {
    pending: BTreeMap<OrderId, Order>,
}

impl DispatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and enqueue `order`.
    ///
    /// Fails if the destination is not a location of `graph` or if an order
    /// with the same id is already pending.
    pub fn submit(&mut self, order: Order, graph: &LocationGraph) -> DispatchResult<()> {
        if graph.node_of(&order.destination).is_none() {
            return Err(DispatchError::UnknownDestination(order.destination));
        }
        if self.pending.contains_key(&order.id) {
            return Err(DispatchError::DuplicateOrder(order.id));
        }
        let id = order.id.clone();
        self.pending.insert(id.clone(), order);
        info!(order = %id, queue_size = self.pending.len(), "order added");
        Ok(())
    }

    /// Remove and return the pending order with the highest score at `clock`.
    ///
    /// Equal scores go to the lowest order id.
    pub fn dispatch_next(&mut self, clock: SimTime, weights: &PriorityWeights) -> DispatchResult<DispatchDecision> {
        let mut best: Option<(&OrderId, f64)> = None;
        for (id, order) in &self.pending {
            let dps = order.dps(clock, weights);
            // Strictly greater: ascending iteration means the first maximum
            // seen carries the lowest id.
            if best.is_none_or(|(_, top)| dps.total_cmp(&top).is_gt()) {
                best = Some((id, dps));
            }
        }

        let (id, dps) = best.ok_or(DispatchError::EmptyQueue)?;
        let id = id.clone();
        let order = self.pending.remove(&id).ok_or(DispatchError::EmptyQueue)?;
        debug!(order = %order.id, dps, %clock, remaining = self.pending.len(), "order selected");
        Ok(DispatchDecision { order, dps })
    }

    /// Add `minutes` of waiting to every pending order.
    pub fn propagate_delay(&mut self, minutes: u64) {
        for order in self.pending.values_mut() {
            order.add_delay(minutes);
        }
    }

    /// Every pending order with its score at `clock`, best first (ties by
    /// ascending id).  Diagnostic only; does not modify the queue.
    pub fn ranking(&self, clock: SimTime, weights: &PriorityWeights) -> Vec<(OrderId, f64)> {
        let mut ranked: Vec<(OrderId, f64)> = self
            .pending
            .iter()
            .map(|(id, order)| (id.clone(), order.dps(clock, weights)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }

    pub fn get(&self, id: &str) -> Option<&Order> {
        self.pending.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.pending.values()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move every pending order out, leaving this queue empty.
    pub fn take_all(&mut self) -> DispatchQueue {
        std::mem::take(self)
    }

    /// Merge `other` back in.  Orders whose id is already pending here keep
    /// the entry already present.  Returns how many orders were merged.
    pub fn restore(&mut self, other: DispatchQueue) -> usize {
        let mut merged = 0;
        for (id, order) in other.pending {
            if let std::collections::btree_map::Entry::Vacant(slot) = self.pending.entry(id) {
                slot.insert(order);
                merged += 1;
            }
        }
        merged
    }
}
