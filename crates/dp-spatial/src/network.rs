//! Location graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Edge arrays (`edge_to`, `edge_minutes`) are sorted by source node, then by
//! destination node.  Iteration over a node's neighbors is therefore a
//! contiguous memory scan, which keeps Dijkstra's inner loop tight.
//!
//! # Name index
//!
//! External callers address locations by case-insensitive name.  Names are
//! normalized into [`LocationId`]s and interned to dense [`NodeId`]s in a
//! hash map built once by the builder.

use dp_core::{GeoPoint, LocationId, NodeId};

use crate::{SpatialError, SpatialResult};

#[cfg(feature = "fx-hash")]
type NameIndex = rustc_hash::FxHashMap<LocationId, NodeId>;

#[cfg(not(feature = "fx-hash"))]
type NameIndex = std::collections::HashMap<LocationId, NodeId>;

// ── LocationGraph ─────────────────────────────────────────────────────────────

/// Directed weighted location graph in CSR format plus a name index.
///
/// Read-only once built; share it behind an `Arc` between runs.  Do not
/// construct directly; use [`LocationGraphBuilder`].
pub struct LocationGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Normalized name of each location.  Indexed by `NodeId`.
    pub locations: Vec<LocationId>,

    /// Optional coordinate of each location.  Indexed by `NodeId`.
    pub positions: Vec<Option<GeoPoint>>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at positions
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Base (uncongested) travel time of each edge in minutes.  Always
    /// finite and `>= 0`.
    pub edge_minutes: Vec<f64>,

    max_edge_minutes: f64,
    index:            NameIndex,
}

impl LocationGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.locations.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Largest base travel time of any edge; `0.0` for a graph without edges.
    pub fn max_edge_minutes(&self) -> f64 {
        self.max_edge_minutes
    }

    // ── Name lookups ──────────────────────────────────────────────────────

    /// `true` if `name` (case-insensitive) is a known location.
    pub fn contains(&self, name: &str) -> bool {
        self.node_id(name).is_some()
    }

    /// Resolve a case-insensitive location name to its `NodeId`.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(LocationId::new(name).as_str()).copied()
    }

    /// Resolve an already-normalized location id.
    pub fn node_of(&self, location: &LocationId) -> Option<NodeId> {
        self.index.get(location.as_str()).copied()
    }

    /// Name of `node`, or `None` for an out-of-range id.
    pub fn location(&self, node: NodeId) -> Option<&LocationId> {
        self.locations.get(node.index())
    }

    /// Coordinate of `node`, if one was configured.
    pub fn position(&self, node: NodeId) -> Option<GeoPoint> {
        self.positions.get(node.index()).copied().flatten()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over `(neighbor, base_minutes)` for every outgoing edge of
    /// `node`.  Empty for a node without outgoing edges or an unknown id.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        let range = if node.index() < self.node_count() {
            self.node_out_start[node.index()] as usize..self.node_out_start[node.index() + 1] as usize
        } else {
            0..0
        };
        range.map(|i| (self.edge_to[i], self.edge_minutes[i]))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.neighbors(node).count()
    }

    /// Base travel time of the directed edge `from → to`, if it exists.
    pub fn base_time(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.neighbors(from).find(|&(n, _)| n == to).map(|(_, m)| m)
    }

    /// Sum of base travel times along consecutive pairs of `path`.
    ///
    /// Returns `None` if any consecutive pair is not joined by an edge.  A
    /// path of zero or one node costs `0.0`.
    pub fn path_base_time(&self, path: &[NodeId]) -> Option<f64> {
        path.windows(2)
            .try_fold(0.0, |acc, pair| self.base_time(pair[0], pair[1]).map(|m| acc + m))
    }
}

// ── LocationGraphBuilder ──────────────────────────────────────────────────────

/// Construct a [`LocationGraph`] incrementally, then call [`build`](Self::build).
///
/// Locations are created on first mention, so edges may be added before or
/// after the endpoint locations are declared.
///
/// # Example
///
/// ```
/// use dp_spatial::LocationGraphBuilder;
///
/// let mut b = LocationGraphBuilder::new();
/// b.add_road("depot", "a", 10.0).unwrap();
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // bidirectional
/// assert!(graph.contains("DEPOT"));
/// ```
#[derive(Default)]
pub struct LocationGraphBuilder {
    locations: Vec<LocationId>,
    positions: Vec<Option<GeoPoint>>,
    index:     NameIndex,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:    NodeId,
    to:      NodeId,
    minutes: f64,
}

impl LocationGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location (or return the id of an existing one with the same
    /// normalized name).
    pub fn add_location(&mut self, name: &str) -> SpatialResult<NodeId> {
        let location = LocationId::new(name);
        if location.as_str().is_empty() {
            return Err(dp_core::DpError::EmptyLocation.into());
        }
        if let Some(&id) = self.index.get(location.as_str()) {
            return Ok(id);
        }
        let id = next_node_id(self.locations.len())?;
        self.index.insert(location.clone(), id);
        self.locations.push(location);
        self.positions.push(None);
        Ok(id)
    }

    /// Attach a coordinate to `name`, creating the location if needed.
    pub fn set_position(&mut self, name: &str, pos: GeoPoint) -> SpatialResult<NodeId> {
        let id = self.add_location(name)?;
        self.positions[id.index()] = Some(pos);
        Ok(id)
    }

    /// Add a **directed** edge `from → to` with the given base travel time.
    ///
    /// Negative, NaN, or infinite times are rejected.  Adding the same
    /// directed edge twice keeps the last time written.
    pub fn add_directed_edge(&mut self, from: &str, to: &str, minutes: f64) -> SpatialResult<()> {
        if !(minutes.is_finite() && minutes >= 0.0) {
            return Err(SpatialError::InvalidWeight {
                from: LocationId::new(from).to_string(),
                to: LocationId::new(to).to_string(),
                minutes,
            });
        }
        let from = self.add_location(from)?;
        let to = self.add_location(to)?;
        self.raw_edges.push(RawEdge { from, to, minutes });
        Ok(())
    }

    /// Convenience: add edges in **both directions** with the same time.
    pub fn add_road(&mut self, a: &str, b: &str, minutes: f64) -> SpatialResult<()> {
        self.add_directed_edge(a, b, minutes)?;
        self.add_directed_edge(b, a, minutes)
    }

    pub fn node_count(&self) -> usize { self.locations.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`LocationGraph`].
    ///
    /// Time complexity: O(E log E) for the edge sort.
    pub fn build(self) -> LocationGraph {
        let node_count = self.locations.len();

        // Stable sort keeps insertion order among duplicates, so the last
        // duplicate of each (from, to) pair is the one kept below.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| (e.from, e.to));
        let mut edges: Vec<RawEdge> = Vec::with_capacity(raw.len());
        for e in raw {
            match edges.last_mut() {
                Some(last) if last.from == e.from && last.to == e.to => *last = e,
                _ => edges.push(e),
            }
        }

        let edge_to:      Vec<NodeId> = edges.iter().map(|e| e.to).collect();
        let edge_minutes: Vec<f64>    = edges.iter().map(|e| e.minutes).collect();
        let max_edge_minutes = edge_minutes.iter().copied().fold(0.0, f64::max);

        // Build CSR row pointer (node_out_start).
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &edges {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edges.len());

        LocationGraph {
            locations: self.locations,
            positions: self.positions,
            node_out_start,
            edge_to,
            edge_minutes,
            max_edge_minutes,
            index: self.index,
        }
    }
}

/// Id for the location stored at position `len`.
///
/// `NodeId::INVALID` is reserved, so the last assignable index is
/// `u32::MAX - 1`.
pub(crate) fn next_node_id(len: usize) -> SpatialResult<NodeId> {
    match NodeId::try_from(len) {
        Ok(id) if id != NodeId::INVALID => Ok(id),
        _ => Err(SpatialError::TooManyLocations(len)),
    }
}
