//! Run-level configuration.
//!
//! Typically built by the application crate (or deserialized with the
//! `serde` feature) and handed to the dispatch engine for one run.

use crate::{DpError, DpResult, LocationId};

/// Weight of the urgency term in the dispatch priority score.
pub const URGENCY_WEIGHT: f64 = 5.0;

/// Weight of the importance term in the dispatch priority score.
pub const IMPORTANCE_WEIGHT: f64 = 10.0;

/// Numerator of the urgency term: `urgency = URGENCY_SCALE / minutes_left`.
pub const URGENCY_SCALE: f64 = 100.0;

/// Urgency assigned once an order's deadline has been reached or passed.
pub const OVERDUE_URGENCY: f64 = 1000.0;

// ── PriorityWeights ───────────────────────────────────────────────────────────

/// Coefficients of the dispatch priority score.
///
/// `Default` yields the reference constants above.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PriorityWeights {
    pub urgency_weight:    f64,
    pub importance_weight: f64,
    pub urgency_scale:     f64,
    pub overdue_urgency:   f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            urgency_weight:    URGENCY_WEIGHT,
            importance_weight: IMPORTANCE_WEIGHT,
            urgency_scale:     URGENCY_SCALE,
            overdue_urgency:   OVERDUE_URGENCY,
        }
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Inputs of one simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Where the vehicle starts.  Normalized on construction.
    pub start_location: LocationId,

    /// Uniform multiplier applied to every edge: `cost = base * (1 + c)`.
    pub congestion_factor: f64,
}

impl RunConfig {
    pub fn new(start_location: &str, congestion_factor: f64) -> Self {
        Self {
            start_location: LocationId::new(start_location),
            congestion_factor,
        }
    }

    /// Reject values that would produce negative or undefined edge costs.
    pub fn validate(&self) -> DpResult<()> {
        if self.start_location.as_str().is_empty() {
            return Err(DpError::EmptyLocation);
        }
        validate_congestion(self.congestion_factor)
    }
}

/// `Ok` iff `factor` is finite and `>= 0`.
pub fn validate_congestion(factor: f64) -> DpResult<()> {
    if factor.is_finite() && factor >= 0.0 {
        Ok(())
    } else {
        Err(DpError::InvalidCongestion(factor))
    }
}
