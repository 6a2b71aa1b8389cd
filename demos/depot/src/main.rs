//! depot — single-vehicle dispatch demo.
//!
//! Submits a batch of orders to a depot network, runs one simulation, prints
//! the route results as JSON and writes them to `output/depot/`.
//!
//! ```text
//! depot                               # embedded reference network
//! depot edges.csv [coordinates.csv]   # network from disk
//! ```
//!
//! Set `RUST_LOG=debug` to see every dispatch decision.

mod network;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dp_core::RunConfig;
use dp_dispatch::OrderRequest;
use dp_output::{CsvWriter, DispatchOutputObserver};
use dp_sim::{DispatchEngine, DispatchService};
use dp_spatial::DijkstraRouter;

// ── Constants ─────────────────────────────────────────────────────────────────

const START_LOCATION:    &str = "DEPOT";
const CONGESTION_FACTOR: f64  = 0.25;
const OUTPUT_DIR:        &str = "output/depot";

// Destinations are case-insensitive.  `ord-6` targets the road-less `E` and
// is skipped.
const ORDERS_JSON: &str = r#"[
  { "orderId": "ord-1", "destination": "C",     "initialDeadlineMinutes": 60,  "importanceLevel": 1 },
  { "orderId": "ord-2", "destination": "b",     "initialDeadlineMinutes": 25,  "importanceLevel": 0 },
  { "orderId": "ord-3", "destination": "D",     "initialDeadlineMinutes": 120, "importanceLevel": 3 },
  { "orderId": "ord-4", "destination": "a",     "initialDeadlineMinutes": 0,   "importanceLevel": 0 },
  { "orderId": "ord-5", "destination": "DEPOT", "initialDeadlineMinutes": 240, "importanceLevel": 2 },
  { "orderId": "ord-6", "destination": "E",     "initialDeadlineMinutes": 90,  "importanceLevel": 1 }
]"#;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Network.
    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let graph = match args.as_slice() {
        [] => network::build_network()?,
        [edges] => network::load_network(edges, None)?,
        [edges, coords, ..] => network::load_network(edges, Some(coords.as_path()))?,
    };
    info!(locations = graph.node_count(), edges = graph.edge_count(), "network loaded");

    // 2. Service.
    let service = DispatchService::new(DispatchEngine::new(Arc::new(graph), DijkstraRouter));

    // 3. Orders.
    let requests: Vec<OrderRequest> = serde_json::from_str(ORDERS_JSON).context("parsing orders")?;
    for request in requests {
        let id = request.order_id.clone();
        if let Err(e) = service.submit(request) {
            eprintln!("order {id} rejected: {e}");
        }
    }

    // 4. Run.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = DispatchOutputObserver::new(writer);
    let run = RunConfig::new(START_LOCATION, CONGESTION_FACTOR);

    let t0 = Instant::now();
    let outcome = service.simulate_with(&run, None, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("{}", serde_json::to_string_pretty(&outcome.results)?);
    println!();
    println!("Simulation complete in {:.3} ms", elapsed.as_secs_f64() * 1_000.0);
    println!("  dispatched : {}", outcome.results.len());
    println!("  skipped    : {}", outcome.skipped.len());
    println!("  total time : {}", outcome.state.clock);
    println!("  csv rows   : {} (in {OUTPUT_DIR})", obs.rows_written());
    println!();

    println!("{:<8} {:<10} {:>6} {:>6} {:>8}  {}", "Order", "Start", "Travel", "Arrive", "DPS", "Route");
    println!("{}", "-".repeat(60));
    for r in &outcome.results {
        let route: Vec<&str> = r.route.iter().map(|l| l.as_str()).collect();
        println!(
            "{:<8} {:<10} {:>6} {:>6} {:>8.2}  {}",
            r.order_id.as_str(),
            r.start_time.to_string(),
            r.travel_time,
            r.arrival_time().minutes(),
            r.dps,
            route.join(" → "),
        );
    }
    for s in &outcome.skipped {
        println!("{:<8} skipped: {} unreachable from {} at {}", s.order_id.as_str(), s.destination, s.from, s.at);
    }

    Ok(())
}
