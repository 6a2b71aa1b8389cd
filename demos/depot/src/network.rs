//! Reference depot network.
//!
//! Six locations around a Manhattan depot.  `E` has coordinates but no
//! roads, so any order sent there is unreachable.

use std::io::Cursor;
use std::path::Path;

use anyhow::Result;

use dp_spatial::{LocationGraph, LocationGraphBuilder, load_coordinates_reader, load_edges_reader, load_graph_csv};

// Base travel times in minutes; every road is two-way.
const EDGES_CSV: &str = "\
from,to,minutes,bidirectional\n\
DEPOT,A,10,true\n\
DEPOT,B,15,true\n\
A,B,5,true\n\
A,C,20,true\n\
B,D,12,true\n\
C,D,8,true\n\
";

const COORDINATES_CSV: &str = "\
location,lat,lon\n\
DEPOT,40.7306,-73.9866\n\
A,40.7580,-73.9855\n\
B,40.7813,-73.9660\n\
C,40.7128,-74.0060\n\
D,40.7410,-73.9989\n\
E,40.6892,-74.0445\n\
";

/// Build the embedded reference network.
pub fn build_network() -> Result<LocationGraph> {
    let mut b = LocationGraphBuilder::new();
    load_edges_reader(&mut b, Cursor::new(EDGES_CSV))?;
    load_coordinates_reader(&mut b, Cursor::new(COORDINATES_CSV))?;
    Ok(b.build())
}

/// Load a network from CSV files on disk.
pub fn load_network(edges: &Path, coordinates: Option<&Path>) -> Result<LocationGraph> {
    Ok(load_graph_csv(edges, coordinates)?)
}
