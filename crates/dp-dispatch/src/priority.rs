//! Dispatch priority score (DPS).
//!
//! ```text
//! time_remaining = deadline - clock
//! urgency        = URGENCY_SCALE / time_remaining   if time_remaining > 0
//!                = OVERDUE_URGENCY                  otherwise
//! dps            = URGENCY_WEIGHT * urgency
//!                + IMPORTANCE_WEIGHT * importance
//!                + delay_minutes
//! ```
//!
//! The score is never cached: it must be recomputed whenever the clock or the
//! order's delay changes.

use dp_core::{PriorityWeights, SimTime};

use crate::Order;

pub use dp_core::config::{IMPORTANCE_WEIGHT, OVERDUE_URGENCY, URGENCY_SCALE, URGENCY_WEIGHT};

/// Urgency term for an order with `time_remaining` minutes left.
///
/// Grows as the deadline approaches and jumps to the overdue ceiling the
/// instant the deadline is reached.
#[inline]
pub fn urgency(time_remaining: i64, weights: &PriorityWeights) -> f64 {
    if time_remaining > 0 {
        weights.urgency_scale / time_remaining as f64
    } else {
        weights.overdue_urgency
    }
}

/// Score `order` at `clock`.  Higher is dispatched first.
pub fn compute_dps(order: &Order, clock: SimTime, weights: &PriorityWeights) -> f64 {
    let time_remaining = clock.until(order.deadline_minutes);
    weights.urgency_weight * urgency(time_remaining, weights)
        + weights.importance_weight * f64::from(order.importance)
        + order.delay_minutes as f64
}
