//! HNSW index implementation.
//!
//! Implements the Hierarchical Navigable Small World algorithm for
//! approximate nearest neighbor search.

use crate::config::{EdgeMode, HnswConfig};
use crate::graph::{LayerGraph, NodeId};
use crate::layer::{GeometricLevelSampler, LevelSampler, Layers};
use crate::search::{greedy_descend, search_base_layer, Candidate};
use crate::{HnswError, Result};
use skein_vector::{
    Euclidean, Metric, PointId, PointStore, VectorError, VectorIndex, VectorMatch,
};

/// HNSW index.
///
/// Owns the point store, the layered graph and the global entry point.
/// Insertion takes `&mut self` and queries take `&self`; see
/// [`SharedHnswIndex`](crate::SharedHnswIndex) for a handle that can be
/// shared across threads.
pub struct HnswIndex<M: Metric = Euclidean> {
    /// Configuration
    config: HnswConfig,

    /// Point storage and distance metric
    pub(crate) store: PointStore<M>,

    /// Multi-layer graph structure
    pub(crate) layers: Layers,

    /// Entry point (a node on the highest layer)
    pub(crate) entry_point: Option<NodeId>,

    /// Current max layer in use
    pub(crate) max_level: usize,

    /// Level assignment for new nodes
    sampler: Box<dyn LevelSampler>,
}

impl HnswIndex<Euclidean> {
    /// Create a new HNSW index using Euclidean distance.
    ///
    /// # Arguments
    ///
    /// * `dimensions` - Vector dimensions
    /// * `config` - HNSW configuration parameters
    ///
    /// # Errors
    ///
    /// [`HnswError::InvalidParameter`] if `dimensions` is zero or the config
    /// does not validate.
    pub fn new(dimensions: usize, config: HnswConfig) -> Result<Self> {
        Self::with_metric(dimensions, config, Euclidean)
    }
}

impl<M: Metric> HnswIndex<M> {
    /// Create a new HNSW index with a custom metric.
    pub fn with_metric(dimensions: usize, config: HnswConfig, metric: M) -> Result<Self> {
        config.validate()?;
        if dimensions == 0 {
            return Err(HnswError::InvalidParameter("dimensions must be > 0".into()));
        }

        tracing::debug!(
            dimensions,
            m = config.m,
            max_layers = config.max_layers,
            ef_construction = config.ef_construction,
            edge_mode = ?config.edge_mode,
            metric = metric.name(),
            "creating HNSW index"
        );

        let layers = Layers::new(config.max_layers, config.m);
        let sampler = Box::new(GeometricLevelSampler::from_seed(config.seed));

        Ok(Self {
            store: PointStore::with_metric(dimensions, metric),
            layers,
            entry_point: None,
            max_level: 0,
            sampler,
            config,
        })
    }

    /// Replace the level sampler.
    ///
    /// Only meaningful before the first insertion.
    pub fn with_level_sampler(mut self, sampler: impl LevelSampler + 'static) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    /// Get configuration.
    pub fn config(&self) -> &HnswConfig {
        &self.config
    }

    /// Insert a vector and return its identifier.
    ///
    /// The vector is validated and neighbor candidates are gathered before
    /// anything is written, so an error leaves the index unchanged.
    pub fn insert(&mut self, vector: &[f32]) -> Result<PointId> {
        self.store.validate(vector)?;
        let node_id = self.store.next_id()?;

        let num_layers = self.layers.num_layers();
        let level = self.sampler.sample_level(num_layers).min(num_layers - 1);

        let candidates = match self.entry_point {
            Some(_) if level <= self.max_level => {
                self.search_candidates(vector, Some(node_id), self.config.ef_construction)?
            }
            _ => Vec::new(),
        };

        let stored = self.store.add(vector)?;
        debug_assert_eq!(stored, node_id);
        self.layers.add_node(node_id, level);

        if self.entry_point.is_none() || level > self.max_level {
            // A node that raises the ceiling starts out with no edges
            self.entry_point = Some(node_id);
            self.max_level = level;
            tracing::debug!(node_id, level, "inserted node as new entry point");
            return Ok(node_id);
        }

        self.connect_node(node_id, level, &candidates)?;

        tracing::debug!(
            node_id,
            level,
            candidates = candidates.len(),
            "inserted node"
        );

        Ok(node_id)
    }

    /// Approximate k nearest neighbors of `query`, closest first.
    ///
    /// A point whose id equals `exclude` is never returned. Each match
    /// carries the stored vector.
    ///
    /// # Errors
    ///
    /// - [`HnswError::InvalidParameter`] if `k` is zero
    /// - [`VectorError::DimensionMismatch`] / [`VectorError::InvalidVector`]
    ///   for a malformed query
    pub fn k_nearest(
        &self,
        query: &[f32],
        exclude: Option<PointId>,
        k: usize,
    ) -> Result<Vec<VectorMatch>> {
        if k == 0 {
            return Err(HnswError::InvalidParameter("k must be > 0".into()));
        }
        self.store.validate(query)?;

        self.search_candidates(query, exclude, k)?
            .into_iter()
            .map(|c| {
                let vector = self.store.get(c.node_id)?.to_vec();
                Ok(VectorMatch::with_vector(c.node_id, c.distance, vector))
            })
            .collect()
    }

    /// Approximate k nearest neighbors of an indexed point, excluding itself.
    pub fn k_nearest_to(&self, id: PointId, k: usize) -> Result<Vec<VectorMatch>> {
        let query = self.store.get(id)?.to_vec();
        self.k_nearest(&query, Some(id), k)
    }

    /// Pick the layer-0 starting node for a query.
    ///
    /// Every upper layer is descended from the global entry point rather
    /// than from the previous layer's result; only the layer-1 descent
    /// decides the outcome.
    fn find_entry(&self, query: &[f32]) -> Result<Option<NodeId>> {
        let Some(entry_point) = self.entry_point else {
            return Ok(None);
        };

        let mut best = entry_point;
        for layer in (1..=self.max_level).rev() {
            best = greedy_descend(&self.layers, &self.store, entry_point, query, layer)?;
        }

        tracing::trace!(entry_point, best, max_level = self.max_level, "refined entry");
        Ok(Some(best))
    }

    /// Entry refinement followed by the base-layer search.
    fn search_candidates(
        &self,
        query: &[f32],
        exclude: Option<NodeId>,
        k: usize,
    ) -> Result<Vec<Candidate>> {
        match self.find_entry(query)? {
            Some(entry) => search_base_layer(&self.layers, &self.store, entry, query, exclude, k),
            None => Ok(Vec::new()),
        }
    }

    /// Wire `node_id` to its candidates on every layer it belongs to.
    fn connect_node(
        &mut self,
        node_id: NodeId,
        level: usize,
        candidates: &[Candidate],
    ) -> Result<()> {
        let edge_mode = self.config.edge_mode;

        for layer in 0..=level {
            let Some(layer_graph) = self.layers.get_mut(layer) else {
                continue;
            };
            let max_degree = layer_graph.max_degree();

            for candidate in candidates {
                let neighbor_id = candidate.node_id;
                if neighbor_id == node_id {
                    continue;
                }

                let present = layer_graph.contains(neighbor_id);
                if !present && edge_mode == EdgeMode::Symmetric {
                    continue;
                }

                layer_graph.add_edge(node_id, neighbor_id);
                prune_neighbors(layer_graph, &self.store, node_id, max_degree)?;

                if present {
                    layer_graph.add_edge(neighbor_id, node_id);
                    prune_neighbors(layer_graph, &self.store, neighbor_id, max_degree)?;
                }
            }
        }

        Ok(())
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Vector dimensions.
    pub fn dimensions(&self) -> usize {
        self.store.dimensions()
    }

    /// Get a stored vector.
    pub fn get(&self, id: PointId) -> Result<&[f32]> {
        Ok(self.store.get(id)?)
    }

    /// Global entry point, `None` while the index is empty.
    pub fn entry_point(&self) -> Option<PointId> {
        self.entry_point
    }

    /// Highest layer currently holding a node.
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Level assigned to a point at insertion.
    pub fn level_of(&self, id: PointId) -> Result<usize> {
        self.layers
            .level_of(id)
            .ok_or(HnswError::Vector(VectorError::NotFound(id)))
    }

    /// Neighbor ids of a point on one layer.
    ///
    /// Empty if the point is not a member of that layer.
    pub fn neighbors(&self, id: PointId, layer: usize) -> Result<Vec<PointId>> {
        if !self.store.contains(id) {
            return Err(VectorError::NotFound(id).into());
        }
        Ok(self
            .layers
            .get(layer)
            .and_then(|g| g.neighbors(id))
            .map(|n| n.ids.clone())
            .unwrap_or_default())
    }
}

/// Keep only the `max_degree` neighbors of `owner` closest to it.
///
/// No-op while the list is within bounds.
fn prune_neighbors<M: Metric>(
    layer_graph: &mut LayerGraph,
    store: &PointStore<M>,
    owner: NodeId,
    max_degree: usize,
) -> Result<()> {
    let Some(neighbors) = layer_graph.neighbors(owner) else {
        return Ok(());
    };
    if neighbors.len() <= max_degree {
        return Ok(());
    }

    let mut scored = neighbors
        .iter()
        .map(|&neighbor_id| {
            store.distance(owner, neighbor_id).map(|distance| Candidate {
                node_id: neighbor_id,
                distance,
            })
        })
        .collect::<skein_vector::Result<Vec<_>>>()?;

    scored.sort();
    scored.truncate(max_degree);

    layer_graph.set_neighbors(owner, scored.into_iter().map(|c| c.node_id).collect());
    Ok(())
}

fn into_vector_error(err: HnswError) -> VectorError {
    match err {
        HnswError::Vector(e) => e,
        HnswError::InvalidParameter(msg) => VectorError::InvalidParameter(msg),
    }
}

impl<M: Metric> VectorIndex for HnswIndex<M> {
    fn insert(&mut self, vector: &[f32]) -> skein_vector::Result<PointId> {
        HnswIndex::insert(self, vector).map_err(into_vector_error)
    }

    fn search(
        &self,
        query: &[f32],
        exclude: Option<PointId>,
        k: usize,
    ) -> skein_vector::Result<Vec<VectorMatch>> {
        self.k_nearest(query, exclude, k).map_err(into_vector_error)
    }

    fn get(&self, id: PointId) -> skein_vector::Result<&[f32]> {
        self.store.get(id)
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn dimensions(&self) -> usize {
        self.store.dimensions()
    }
}
