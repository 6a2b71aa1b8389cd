//! `dp-sim` — dispatch loop orchestrator for the rust_dispatch simulator.
//!
//! # Dispatch loop
//!
//! ```text
//! reset clock = 0, vehicle = start
//! while orders pending:
//!   ⓪ Cancel    — stop if the run's CancelToken was triggered.
//!   ① Rank      — re-score every pending order at the current clock and
//!                 pop the best (ties → lowest order id).
//!   ② Route     — shortest path vehicle → destination under congestion.
//!                 Unreachable: record a skip, drop the order, go to ⓪.
//!   ③ Emit      — RouteResult { path, travel time, start time, score }.
//!   ④ Advance   — clock += travel time; vehicle moves to the destination.
//!   ⑤ Delay     — every still-pending order accrues the travel time.
//! ```
//!
//! [`DispatchEngine`] runs the loop over a queue the caller owns.
//! [`DispatchService`] wraps an engine and a mutex-guarded pending set for
//! callers that submit and simulate from several threads.
//!
//! # Cargo features
//!
//! | Feature | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on results (camelCase JSON).     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dp_sim::{DispatchEngine, DispatchService};
//! use dp_spatial::DijkstraRouter;
//!
//! let service = DispatchService::new(DispatchEngine::new(Arc::new(graph), DijkstraRouter));
//! service.submit(request)?;
//! let results = service.simulate("DEPOT", 0.0)?;
//! ```

pub mod cancel;
pub mod engine;
pub mod error;
pub mod observer;
pub mod result;
pub mod service;
pub mod state;


pub use cancel::CancelToken;
pub use engine::DispatchEngine;
pub use error::{SimError, SimResult};
pub use observer::{DispatchObserver, NoopObserver};
pub use result::{RouteResult, SimulationOutcome, SkippedOrder};
pub use service::DispatchService;
pub use state::{RunPhase, SimulationState};
