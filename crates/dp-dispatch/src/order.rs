//! Order records.

use dp_core::{LocationId, OrderId, PriorityWeights, SimTime};

use crate::priority::compute_dps;

// ── OrderRequest ──────────────────────────────────────────────────────────────

/// An order as submitted from outside, before normalization.
///
/// With the `serde` feature this deserializes from
/// `{orderId, destination, initialDeadlineMinutes, importanceLevel}`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OrderRequest {
    pub order_id:                 String,
    pub destination:              String,
    pub initial_deadline_minutes: i64,
    pub importance_level:         u32,
}

impl OrderRequest {
    /// Normalize into a pending [`Order`] with zero accumulated delay.
    pub fn into_order(self) -> Order {
        Order::new(self.order_id, &self.destination, self.initial_deadline_minutes, self.importance_level)
    }
}

// ── Order ─────────────────────────────────────────────────────────────────────

/// A pending delivery.
///
/// `delay_minutes` only ever grows: the engine adds the travel time of every
/// leg dispatched ahead of this order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub id:               OrderId,
    pub destination:      LocationId,
    /// Deadline in minutes from simulation start.  May already be `<= 0`.
    pub deadline_minutes: i64,
    pub importance:       u32,
    pub delay_minutes:    u64,
}

impl Order {
    pub fn new(id: impl Into<OrderId>, destination: &str, deadline_minutes: i64, importance: u32) -> Self {
        Self {
            id: id.into(),
            destination: LocationId::new(destination),
            deadline_minutes,
            importance,
            delay_minutes: 0,
        }
    }

    /// Dispatch priority score at `clock`.  Shorthand for [`compute_dps`].
    #[inline]
    pub fn dps(&self, clock: SimTime, weights: &PriorityWeights) -> f64 {
        compute_dps(self, clock, weights)
    }

    /// Record `minutes` of extra waiting.
    #[inline]
    pub fn add_delay(&mut self, minutes: u64) {
        self.delay_minutes = self.delay_minutes.saturating_add(minutes);
    }
}
