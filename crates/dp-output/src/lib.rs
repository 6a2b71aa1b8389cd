//! `dp-output` — dispatch run output writers.
//!
//! | Backend | Files created                                 |
//! |---------|-----------------------------------------------|
//! | CSV     | `route_results.csv`, `skipped_orders.csv`     |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`DispatchOutputObserver`], which implements `dp_sim::DispatchObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dp_output::{CsvWriter, DispatchOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = DispatchOutputObserver::new(writer);
//! service.simulate_with(&run, None, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::DispatchOutputObserver;
pub use row::{RouteResultRow, SkippedOrderRow};
pub use writer::OutputWriter;
