//! Shared error type.
//!
//! Sub-crates define their own error enums for their own failure modes and
//! wrap `DpError` where a configuration problem can surface through them.

use thiserror::Error;

/// Configuration-level errors shared by all `dp-*` crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DpError {
    #[error("congestion factor must be a finite value >= 0, got {0}")]
    InvalidCongestion(f64),

    #[error("location id must not be empty")]
    EmptyLocation,
}

/// Shorthand result type for `dp-core`.
pub type DpResult<T> = Result<T, DpError>;
