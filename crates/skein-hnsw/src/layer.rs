//! HNSW layer management.
//!
//! Provides the multi-layer graph container and randomized level assignment.

use crate::graph::{LayerGraph, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Manages multiple HNSW layers.
///
/// Layer 0 holds every node; each higher layer holds a subset of the one
/// below it.
#[derive(Debug, Clone)]
pub struct Layers {
    /// Layer graphs (index 0 = bottom layer, highest index = top layer)
    layers: Vec<LayerGraph>,
}

impl Layers {
    /// Create a new layer manager.
    ///
    /// # Arguments
    ///
    /// * `max_layers` - Maximum number of layers
    /// * `m` - Max connections per node, on every layer
    pub fn new(max_layers: usize, m: usize) -> Self {
        let layers = (0..max_layers).map(|_| LayerGraph::new(m)).collect();
        Self { layers }
    }

    /// Get a reference to a specific layer.
    pub fn get(&self, layer: usize) -> Option<&LayerGraph> {
        self.layers.get(layer)
    }

    /// Get a mutable reference to a specific layer.
    pub fn get_mut(&mut self, layer: usize) -> Option<&mut LayerGraph> {
        self.layers.get_mut(layer)
    }

    /// Get the number of layers.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Register a node on every layer from 0 through `level`.
    pub fn add_node(&mut self, node_id: NodeId, level: usize) {
        for layer in self.layers.iter_mut().take(level + 1) {
            layer.insert_node(node_id);
        }
    }

    /// Highest layer containing `node_id`, or `None` if it is not in the graph.
    pub fn level_of(&self, node_id: NodeId) -> Option<usize> {
        self.layers.iter().rposition(|l| l.contains(node_id))
    }
}

/// Source of levels for newly inserted nodes.
///
/// Injected into the index so tests can pin the graph shape.
pub trait LevelSampler: Send + Sync {
    /// Draw a level in `0..max_layers`.
    fn sample_level(&mut self, max_layers: usize) -> usize;
}

/// Default sampler: geometric levels driven by a seedable RNG.
#[derive(Debug, Clone)]
pub struct GeometricLevelSampler {
    rng: StdRng,
}

impl GeometricLevelSampler {
    /// Sampler seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Sampler with a fixed seed for reproducible graphs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }
}

impl Default for GeometricLevelSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelSampler for GeometricLevelSampler {
    fn sample_level(&mut self, max_layers: usize) -> usize {
        random_level(&mut self.rng, max_layers)
    }
}

/// Replays a fixed sequence of levels, cycling when exhausted.
///
/// An empty sequence always yields level 0.
#[derive(Debug, Clone, Default)]
pub struct FixedLevelSampler {
    levels: Vec<usize>,
    next: usize,
}

impl FixedLevelSampler {
    /// Create a sampler that replays `levels` in order.
    pub fn new(levels: impl Into<Vec<usize>>) -> Self {
        Self {
            levels: levels.into(),
            next: 0,
        }
    }

    /// Sampler that puts every node on layer 0 only.
    pub fn ground() -> Self {
        Self::default()
    }
}

impl LevelSampler for FixedLevelSampler {
    fn sample_level(&mut self, max_layers: usize) -> usize {
        if self.levels.is_empty() {
            return 0;
        }
        let level = self.levels[self.next % self.levels.len()];
        self.next += 1;
        level.min(max_layers.saturating_sub(1))
    }
}

/// Generate a random level for a new node.
///
/// Starts at 0 and climbs one level each time a uniform draw in [0, 1) falls
/// below 1/e, stopping at `max_layers - 1`. The probability of reaching
/// level L is roughly e^-L.
pub fn random_level<R: Rng + ?Sized>(rng: &mut R, max_layers: usize) -> usize {
    let p = (-1.0f64).exp();

    let mut level = 0;
    while rng.gen::<f64>() < p && level + 1 < max_layers {
        level += 1;
    }
    level
}
