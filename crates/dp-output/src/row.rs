//! Flat row types written by output backends.

use dp_sim::{RouteResult, SkippedOrder};

/// Separator between location names in [`RouteResultRow::route`].
pub const ROUTE_SEPARATOR: &str = ">";

/// One dispatched order.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResultRow {
    pub order_id:     String,
    pub start_time:   u64,
    pub travel_time:  u64,
    pub arrival_time: u64,
    pub dps:          f64,
    /// Location names joined with [`ROUTE_SEPARATOR`], e.g. `DEPOT>A>C`.
    pub route:        String,
    /// Number of route locations that had coordinates.
    pub gps_points:   usize,
}

impl From<&RouteResult> for RouteResultRow {
    fn from(r: &RouteResult) -> Self {
        let route: Vec<&str> = r.route.iter().map(|loc| loc.as_str()).collect();
        Self {
            order_id:     r.order_id.to_string(),
            start_time:   r.start_time.minutes(),
            travel_time:  r.travel_time,
            arrival_time: r.arrival_time().minutes(),
            dps:          r.dps,
            route:        route.join(ROUTE_SEPARATOR),
            gps_points:   r.gps_route.len(),
        }
    }
}

/// One order dropped because its destination was unreachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOrderRow {
    pub order_id:    String,
    pub destination: String,
    pub from:        String,
    pub at:          u64,
}

impl From<&SkippedOrder> for SkippedOrderRow {
    fn from(s: &SkippedOrder) -> Self {
        Self {
            order_id:    s.order_id.to_string(),
            destination: s.destination.to_string(),
            from:        s.from.to_string(),
            at:          s.at.minutes(),
        }
    }
}
