//! Records emitted by a run.

use dp_core::{GeoPoint, LocationId, OrderId, SimTime};

use crate::SimulationState;

/// Immutable record of one dispatched and routed order.
///
/// With the `serde` feature this serializes as
/// `{orderId, route, gpsRoute, travelTime, startTime, dps}`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RouteResult {
    pub order_id:    OrderId,
    /// Locations visited, vehicle position first, destination last.
    pub route:       Vec<LocationId>,
    /// Coordinates of `route`; locations without one are left out.
    pub gps_route:   Vec<GeoPoint>,
    /// Leg duration in whole minutes, congestion applied, rounded up.
    pub travel_time: u64,
    /// Clock when the vehicle set off.
    pub start_time:  SimTime,
    /// Score that won the dispatch slot.
    pub dps:         f64,
}

impl RouteResult {
    /// Clock when the vehicle reaches the destination.
    pub fn arrival_time(&self) -> SimTime {
        self.start_time.offset(self.travel_time)
    }
}

/// Diagnostic record of an order dropped because its destination was
/// unreachable from the vehicle's position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SkippedOrder {
    pub order_id:    OrderId,
    pub destination: LocationId,
    pub from:        LocationId,
    pub at:          SimTime,
}

/// Everything one run produced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationOutcome {
    /// In dispatch order.
    pub results: Vec<RouteResult>,
    pub skipped: Vec<SkippedOrder>,
    pub state:   SimulationState,
}
