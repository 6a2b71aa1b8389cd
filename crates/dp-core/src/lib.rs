//! `dp-core` — foundational types for the `rust_dispatch` simulator.
//!
//! This crate is a dependency of every other `dp-*` crate.  It
//! has no `dp-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `LocationId`, `OrderId`                     |
//! | [`geo`]         | `GeoPoint`                                            |
//! | [`time`]        | `SimTime` (minutes since run start)                   |
//! | [`config`]      | `PriorityWeights`, `RunConfig`                        |
//! | [`error`]       | `DpError`, `DpResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{PriorityWeights, RunConfig};
pub use error::{DpError, DpResult};
pub use geo::GeoPoint;
pub use ids::{LocationId, NodeId, OrderId};
pub use time::SimTime;
