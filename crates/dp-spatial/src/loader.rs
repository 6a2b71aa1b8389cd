//! CSV graph loader.
//!
//! The graph topology and coordinate table are injected configuration,
//! loaded once at process start.
//!
//! # Edge CSV
//!
//! One row per edge.  `bidirectional` is optional and defaults to `false`.
//!
//! ```csv
//! from,to,minutes,bidirectional
//! DEPOT,A,10,true
//! A,C,20,true
//! C,D,8,false
//! ```
//!
//! # Coordinate CSV
//!
//! ```csv
//! location,lat,lon
//! DEPOT,40.7306,-73.9866
//! A,40.7580,-73.9855
//! ```
//!
//! Location names are case-insensitive in both files.  A coordinate row for a
//! location with no edges adds it as an isolated node.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use dp_core::GeoPoint;

use crate::network::{LocationGraph, LocationGraphBuilder};
use crate::{SpatialError, SpatialResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EdgeRecord {
    from:          String,
    to:            String,
    minutes:       f64,
    #[serde(default)]
    bidirectional: Option<bool>,
}

#[derive(Deserialize)]
struct CoordinateRecord {
    location: String,
    lat:      f64,
    lon:      f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a graph from an edge CSV and an optional coordinate CSV.
pub fn load_graph_csv(edges: &Path, coordinates: Option<&Path>) -> SpatialResult<LocationGraph> {
    let mut builder = LocationGraphBuilder::new();
    load_edges_csv(&mut builder, edges)?;
    if let Some(path) = coordinates {
        load_coordinates_csv(&mut builder, path)?;
    }
    Ok(builder.build())
}

/// Append every edge in the CSV file at `path` to `builder`.
pub fn load_edges_csv(builder: &mut LocationGraphBuilder, path: &Path) -> SpatialResult<usize> {
    load_edges_reader(builder, std::fs::File::open(path)?)
}

/// Attach every coordinate in the CSV file at `path` to `builder`.
pub fn load_coordinates_csv(builder: &mut LocationGraphBuilder, path: &Path) -> SpatialResult<usize> {
    load_coordinates_reader(builder, std::fs::File::open(path)?)
}

/// Append every edge in `reader` to `builder`.
///
/// Useful for testing (pass a `std::io::Cursor`) or for embedding the
/// configuration in the binary.  Returns the number of rows read.
pub fn load_edges_reader<R: Read>(builder: &mut LocationGraphBuilder, reader: R) -> SpatialResult<usize> {
    // Flexible: rows may omit the trailing `bidirectional` column.
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut rows = 0;
    for result in csv_reader.deserialize::<EdgeRecord>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        if row.bidirectional.unwrap_or(false) {
            builder.add_road(&row.from, &row.to, row.minutes)?;
        } else {
            builder.add_directed_edge(&row.from, &row.to, row.minutes)?;
        }
        rows += 1;
    }
    Ok(rows)
}

/// Attach every coordinate in `reader` to `builder`.  Returns the number of
/// rows read.
pub fn load_coordinates_reader<R: Read>(builder: &mut LocationGraphBuilder, reader: R) -> SpatialResult<usize> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = 0;
    for result in csv_reader.deserialize::<CoordinateRecord>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        let pos = GeoPoint::new(row.lat, row.lon);
        if !pos.is_valid() {
            return Err(SpatialError::Parse(format!(
                "invalid coordinate {pos} for location {:?}",
                row.location
            )));
        }
        builder.set_position(&row.location, pos)?;
        rows += 1;
    }
    Ok(rows)
}
