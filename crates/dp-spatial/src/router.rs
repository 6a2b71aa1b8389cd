//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! `dp-sim` calls routing via the [`Router`] trait, so applications can swap
//! in custom implementations (A*, precomputed tables) without touching the
//! dispatch loop.
//!
//! # Cost model
//!
//! Every edge costs `base_minutes * (1 + congestion)`.  Congestion scales all
//! edges uniformly, so it never changes *which* path is shortest, only how
//! long it takes.  [`Route`] keeps the uncongested base total so callers can
//! apply the multiplier exactly once, after summing.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use dp_core::config::validate_congestion;
use dp_core::{GeoPoint, LocationId, NodeId};

use crate::network::LocationGraph;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the visited nodes in order, start and goal
/// inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes to visit in order, from source to destination.
    pub nodes: Vec<NodeId>,
    /// Sum of base edge times along the path (congestion not applied).
    pub base_minutes: f64,
    /// Accumulated congested cost as seen by the search.
    pub cost_minutes: f64,
}

impl Route {
    /// Whole minutes the leg takes under `congestion`, rounded up so the
    /// clock never runs ahead of the vehicle.
    ///
    /// `None` if the congested time is not finite or does not fit in a `u64`.
    pub fn travel_minutes(&self, congestion: f64) -> Option<u64> {
        let minutes = (self.base_minutes * (1.0 + congestion)).ceil();
        // `u64::MAX as f64` rounds up to 2^64, which is already out of range.
        (minutes.is_finite() && minutes >= 0.0 && minutes < u64::MAX as f64).then_some(minutes as u64)
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Location names along the route.
    pub fn locations(&self, graph: &LocationGraph) -> Vec<LocationId> {
        self.nodes
            .iter()
            .filter_map(|&n| graph.location(n).cloned())
            .collect()
    }

    /// Coordinates along the route; nodes without a coordinate are dropped.
    pub fn positions(&self, graph: &LocationGraph) -> Vec<GeoPoint> {
        self.nodes.iter().filter_map(|&n| graph.position(n)).collect()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve runs on
/// several threads.
pub trait Router: Send + Sync {
    /// Compute a route from `from` to `to` with every edge scaled by
    /// `1 + congestion`.
    ///
    /// `from == to` yields the single-node route.  Unreachable goals yield
    /// [`SpatialError::NoRoute`]; a negative or non-finite `congestion`
    /// yields [`SpatialError::InvalidCongestion`].
    fn route(
        &self,
        graph: &LocationGraph,
        from: NodeId,
        to: NodeId,
        congestion: f64,
    ) -> SpatialResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR location graph.
///
/// Ties in accumulated cost are broken in favour of the entry discovered
/// first, so the chosen path is deterministic for a given graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph: &LocationGraph,
        from: NodeId,
        to: NodeId,
        congestion: f64,
    ) -> SpatialResult<Route> {
        dijkstra(graph, from, to, congestion)
    }
}

impl DijkstraRouter {
    /// Name-based convenience: the route as location ids, or an empty vec if
    /// `goal` is unreachable from `start` (unknown names are unreachable).
    pub fn find_path(
        &self,
        graph: &LocationGraph,
        start: &str,
        goal: &str,
        congestion: f64,
    ) -> SpatialResult<Vec<LocationId>> {
        check_congestion(graph, congestion)?;
        let (Some(from), Some(to)) = (graph.node_id(start), graph.node_id(goal)) else {
            return Ok(Vec::new());
        };
        match self.route(graph, from, to, congestion) {
            Ok(route) => Ok(route.locations(graph)),
            Err(SpatialError::NoRoute { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

/// Validate `congestion` against `graph` and return the edge multiplier
/// `1 + congestion`.
///
/// Besides being finite and `>= 0`, the factor must keep the most expensive
/// edge of `graph` at a finite congested cost; otherwise every relaxation
/// would compare infinities and reachable goals would look unreachable.
pub fn check_congestion(graph: &LocationGraph, congestion: f64) -> SpatialResult<f64> {
    validate_congestion(congestion).map_err(|_| SpatialError::InvalidCongestion(congestion))?;
    let multiplier = 1.0 + congestion;
    if (graph.max_edge_minutes() * multiplier).is_finite() {
        Ok(multiplier)
    } else {
        Err(SpatialError::InvalidCongestion(congestion))
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Frontier entry.  `Ord` is inverted so `BinaryHeap` (a max-heap) pops the
/// lowest cost first, and among equal costs the lowest sequence number.
struct Frontier {
    cost: f64,
    seq:  u64,
    node: NodeId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

fn dijkstra(
    graph: &LocationGraph,
    from: NodeId,
    to: NodeId,
    congestion: f64,
) -> SpatialResult<Route> {
    let multiplier = check_congestion(graph, congestion)?;

    let n = graph.node_count();
    for node in [from, to] {
        if node.index() >= n {
            return Err(SpatialError::NodeNotFound(node));
        }
    }

    // best[v] = best known congested cost to reach v.
    let mut best   = vec![f64::INFINITY; n];
    // parent[v] = predecessor on the best known path; INVALID for the start
    // and for unreached nodes.
    let mut parent = vec![NodeId::INVALID; n];

    best[from.index()] = 0.0;

    let mut seq: u64 = 0;
    let mut heap = BinaryHeap::new();
    heap.push(Frontier { cost: 0.0, seq, node: from });

    while let Some(Frontier { cost, node, .. }) = heap.pop() {
        // Skip stale heap entries left behind by later improvements.
        if cost > best[node.index()] {
            continue;
        }

        if node == to {
            return Ok(reconstruct(graph, &parent, from, to, cost));
        }

        for (neighbor, base) in graph.neighbors(node) {
            let candidate = cost + base * multiplier;
            if candidate < best[neighbor.index()] {
                best[neighbor.index()] = candidate;
                parent[neighbor.index()] = node;
                seq += 1;
                heap.push(Frontier { cost: candidate, seq, node: neighbor });
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(
    graph: &LocationGraph,
    parent: &[NodeId],
    from: NodeId,
    to: NodeId,
    cost: f64,
) -> Route {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let prev = parent[cur.index()];
        debug_assert_ne!(prev, NodeId::INVALID, "broken parent chain");
        if prev == NodeId::INVALID {
            break;
        }
        nodes.push(prev);
        cur = prev;
    }
    nodes.reverse();

    // Every consecutive pair was relaxed along a real edge, so the sum exists.
    let base_minutes = graph.path_base_time(&nodes).unwrap_or(0.0);
    Route { nodes, base_minutes, cost_minutes: cost }
}
