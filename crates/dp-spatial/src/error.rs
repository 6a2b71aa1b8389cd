//! Spatial-subsystem error type.

use thiserror::Error;

use dp_core::{DpError, NodeId};

/// Errors produced by `dp-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The goal is not reachable from the start.  The dispatch engine treats
    /// this as a per-order routing gap, never as a fatal error.
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("cannot add location #{0}: node id space exhausted")]
    TooManyLocations(usize),

    #[error("edge {from} -> {to} has invalid base travel time {minutes} (must be finite and >= 0)")]
    InvalidWeight { from: String, to: String, minutes: f64 },

    /// Negative or non-finite, or large enough to make an edge cost infinite.
    #[error("congestion factor must be a finite value >= 0 that keeps edge costs finite, got {0}")]
    InvalidCongestion(f64),

    #[error("configuration error: {0}")]
    Config(#[from] DpError),

    #[error("graph parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
