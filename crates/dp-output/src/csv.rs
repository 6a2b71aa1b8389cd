//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `route_results.csv`
//! - `skipped_orders.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, RouteResultRow, SkippedOrderRow};

pub const ROUTE_RESULTS_FILE: &str = "route_results.csv";
pub const SKIPPED_ORDERS_FILE: &str = "skipped_orders.csv";

/// Writes run output to two CSV files.
pub struct CsvWriter {
    results:  Writer<File>,
    skipped:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut results = Writer::from_path(dir.join(ROUTE_RESULTS_FILE))?;
        results.write_record([
            "order_id", "start_time", "travel_time", "arrival_time", "dps", "route", "gps_points",
        ])?;

        let mut skipped = Writer::from_path(dir.join(SKIPPED_ORDERS_FILE))?;
        skipped.write_record(["order_id", "destination", "from", "at"])?;

        Ok(Self { results, skipped, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_route_result(&mut self, row: &RouteResultRow) -> OutputResult<()> {
        self.results.write_record(&[
            row.order_id.clone(),
            row.start_time.to_string(),
            row.travel_time.to_string(),
            row.arrival_time.to_string(),
            row.dps.to_string(),
            row.route.clone(),
            row.gps_points.to_string(),
        ])?;
        Ok(())
    }

    fn write_skipped(&mut self, row: &SkippedOrderRow) -> OutputResult<()> {
        self.skipped.write_record([
            row.order_id.as_str(),
            row.destination.as_str(),
            row.from.as_str(),
            row.at.to_string().as_str(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.results.flush()?;
        self.skipped.flush()?;
        Ok(())
    }
}
