//! Per-run simulation state.

use dp_core::{LocationId, NodeId, SimTime};

/// Lifecycle of one run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    /// Pending set emptied.
    Completed,
    /// The run could not start (empty queue, bad start, bad congestion).
    Rejected,
    /// Stopped early by a `CancelToken`.
    Cancelled,
}

/// Clock and vehicle position of one run.
///
/// Created fresh by every run and returned with its outcome, so two runs
/// never share a clock or a vehicle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SimulationState {
    /// Minutes since the run started.  Only ever increases.
    pub clock:            SimTime,
    pub vehicle_location: LocationId,
    pub vehicle_node:     NodeId,
    pub phase:            RunPhase,
}

impl SimulationState {
    /// Fresh running state with the vehicle at `node`.
    pub fn running(start: LocationId, node: NodeId) -> Self {
        Self {
            clock:            SimTime::ZERO,
            vehicle_location: start,
            vehicle_node:     node,
            phase:            RunPhase::Running,
        }
    }

    /// Move the vehicle to `location`, arriving at `arrival`.
    ///
    /// The clock never moves backwards; an earlier `arrival` leaves it as is.
    pub fn complete_leg(&mut self, arrival: SimTime, location: LocationId, node: NodeId) {
        self.clock = self.clock.max(arrival);
        self.vehicle_location = location;
        self.vehicle_node = node;
    }
}
