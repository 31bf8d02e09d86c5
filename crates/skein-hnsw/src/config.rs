//! HNSW index configuration.
//!
//! All parameters are fixed when the index is built.

use crate::{HnswError, Result};
use serde::{Deserialize, Serialize};

/// How edges are wired when a neighbor candidate is missing from a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// The new node links to the candidate anyway; no back-edge is created
    /// because the candidate has no adjacency list on that layer.
    #[default]
    Asymmetric,
    /// Skip the candidate on layers where it is absent. Every edge then
    /// joins two members of the same layer.
    Symmetric,
}

/// HNSW configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HnswConfig {
    /// Max neighbors per node per layer (M parameter).
    /// Default: 2
    pub m: usize,

    /// Total number of layers a node may be assigned to.
    /// Default: 3 (layers 0-2)
    pub max_layers: usize,

    /// Number of candidate neighbors gathered for each inserted node.
    /// Default: 2
    pub ef_construction: usize,

    /// Edge wiring policy for candidates absent from a layer.
    /// Default: `Asymmetric`
    pub edge_mode: EdgeMode,

    /// Seed for level assignment. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for HnswConfig {
    fn default() -> Self {
        Self {
            m: 2,
            max_layers: 3,
            ef_construction: 2,
            edge_mode: EdgeMode::Asymmetric,
            seed: None,
        }
    }
}

impl HnswConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum neighbors per node.
    pub fn with_m(mut self, m: usize) -> Self {
        self.m = m;
        self
    }

    /// Set the number of layers.
    pub fn with_max_layers(mut self, max_layers: usize) -> Self {
        self.max_layers = max_layers;
        self
    }

    /// Set the insertion candidate breadth.
    pub fn with_ef_construction(mut self, ef_construction: usize) -> Self {
        self.ef_construction = ef_construction;
        self
    }

    /// Set the edge wiring policy.
    pub fn with_edge_mode(mut self, edge_mode: EdgeMode) -> Self {
        self.edge_mode = edge_mode;
        self
    }

    /// Seed level assignment for reproducible graphs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.m == 0 {
            return Err(HnswError::InvalidParameter("m must be > 0".into()));
        }
        if self.max_layers == 0 {
            return Err(HnswError::InvalidParameter("max_layers must be > 0".into()));
        }
        if self.ef_construction == 0 {
            return Err(HnswError::InvalidParameter(
                "ef_construction must be > 0".into(),
            ));
        }
        Ok(())
    }
}
