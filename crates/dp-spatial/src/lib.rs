//! `dp-spatial` — location graph, configuration loading, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `LocationGraph` (CSR + name index), `LocationGraphBuilder`  |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`                   |
//! | [`loader`]  | `load_graph_csv`, `load_edges_*`, `load_coordinates_*` (path / reader) |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `serde`   | Derives `Serialize`/`Deserialize` on `dp-core` types.      |
//! | `fx-hash` | FxHash instead of SipHash for the location-name index.     |

pub mod error;
pub mod loader;
pub mod network;
pub mod router;


pub use error::{SpatialError, SpatialResult};
pub use loader::{
    load_coordinates_csv, load_coordinates_reader, load_edges_csv, load_edges_reader, load_graph_csv,
};
pub use network::{LocationGraph, LocationGraphBuilder};
pub use router::{check_congestion, DijkstraRouter, Route, Router};
