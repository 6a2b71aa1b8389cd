//! Simulation time model.
//!
//! # Design
//!
//! The dispatch clock counts whole **minutes** since the start of a run.
//! Travel times are rounded up to whole minutes before they are added, so all
//! clock arithmetic is exact and the clock is monotonic within a run.  Clock
//! arithmetic never wraps: `offset`, `advance` and `+` saturate, and the
//! dispatch engine uses [`SimTime::checked_offset`] to detect overflow.

use std::fmt;

/// Minutes elapsed since the start of a simulation run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Return the time `minutes` after `self`, saturating at `u64::MAX`.
    #[inline]
    pub fn offset(self, minutes: u64) -> SimTime {
        SimTime(self.0.saturating_add(minutes))
    }

    /// Return the time `minutes` after `self`, or `None` if it does not fit.
    #[inline]
    pub fn checked_offset(self, minutes: u64) -> Option<SimTime> {
        self.0.checked_add(minutes).map(SimTime)
    }

    /// Advance in place by `minutes`, saturating at `u64::MAX`.
    #[inline]
    pub fn advance(&mut self, minutes: u64) {
        self.0 = self.0.saturating_add(minutes);
    }

    /// Minutes remaining until `deadline` (negative once it has passed).
    #[inline]
    pub fn until(self, deadline: i64) -> i64 {
        deadline.saturating_sub(i64::try_from(self.0).unwrap_or(i64::MAX))
    }

    #[inline]
    pub fn minutes(self) -> u64 {
        self.0
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        self.offset(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T+{}min", self.0)
    }
}
