//! HNSW (Hierarchical Navigable Small World) index for skein.
//!
//! Provides approximate nearest neighbor (ANN) search using the HNSW
//! algorithm. HNSW builds a multi-layer graph where:
//!
//! - Layer 0 holds every point; each layer above holds a random subset of
//!   the one below (exponential decay)
//! - Each layer is a proximity graph with at most `M` neighbors per node
//! - Search descends greedily through the upper layers, then runs a
//!   best-first search on layer 0
//!
//! # Parameters
//!
//! - `m`: Max neighbors per node per layer (default: 2)
//! - `max_layers`: Number of layers a node can be assigned to (default: 3)
//! - `ef_construction`: Candidates gathered per insertion (default: 2)
//! - `edge_mode`: Whether edges may point at nodes absent from a layer
//!   (default: `Asymmetric`)
//! - `seed`: Seed for level assignment (default: OS entropy)
//!
//! # Example
//!
//! ```
//! use skein_hnsw::{HnswConfig, HnswIndex};
//!
//! let mut index = HnswIndex::new(2, HnswConfig::default().with_seed(7)).unwrap();
//!
//! index.insert(&[1.0, 2.0]).unwrap();
//! index.insert(&[2.0, 3.0]).unwrap();
//! index.insert(&[3.0, 1.0]).unwrap();
//!
//! let results = index.k_nearest(&[2.0, 2.0], None, 2).unwrap();
//! assert!(results.len() <= 2);
//! ```

mod config;
mod graph;
mod index;
mod layer;
mod search;
mod shared;
mod snapshot;

pub use config::{EdgeMode, HnswConfig};
pub use graph::NodeId;
pub use index::HnswIndex;
pub use layer::{random_level, FixedLevelSampler, GeometricLevelSampler, LevelSampler};
pub use shared::SharedHnswIndex;
pub use snapshot::{GraphDump, HnswStats, LayerStats};

/// Error type for HNSW operations.
#[derive(Debug, thiserror::Error)]
pub enum HnswError {
    #[error("Vector error: {0}")]
    Vector(#[from] skein_vector::VectorError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for HNSW operations.
pub type Result<T> = std::result::Result<T, HnswError>;
