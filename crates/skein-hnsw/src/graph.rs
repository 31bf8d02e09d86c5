//! Graph data structures for HNSW.
//!
//! Provides the adjacency storage for a single HNSW layer.

use skein_vector::PointId;
use std::collections::HashMap;

/// Node ID inside the graph. Identical to the point store's id.
pub type NodeId = PointId;

/// Neighbor list for a node at a specific layer.
///
/// Insertion order is preserved until the list is pruned, after which it
/// is ordered by distance to the owning node (closest first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    /// Neighbor node IDs
    pub ids: Vec<NodeId>,
}

impl Neighbors {
    /// Create empty neighbors.
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Add a neighbor.
    /// Returns true if added, false if already present.
    pub fn add(&mut self, id: NodeId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Check if contains a neighbor.
    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    /// Get number of neighbors.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over neighbor IDs.
    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.ids.iter()
    }
}

impl FromIterator<NodeId> for Neighbors {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut neighbors = Neighbors::new();
        for id in iter {
            neighbors.add(id);
        }
        neighbors
    }
}

/// Graph storage for a single HNSW layer.
///
/// A node is a member of the layer once it has an adjacency entry, even an
/// empty one. Edges are directed; callers add the reverse edge themselves.
#[derive(Debug, Clone)]
pub struct LayerGraph {
    /// Adjacency lists: node_id -> neighbors
    adjacency: HashMap<NodeId, Neighbors>,
    /// Maximum degree for this layer
    max_degree: usize,
}

impl LayerGraph {
    /// Create a new layer graph.
    pub fn new(max_degree: usize) -> Self {
        Self {
            adjacency: HashMap::new(),
            max_degree,
        }
    }

    /// Make `node_id` a member of this layer with no neighbors.
    /// Existing neighbors are kept.
    pub fn insert_node(&mut self, node_id: NodeId) {
        self.adjacency.entry(node_id).or_default();
    }

    /// Get neighbors for a node.
    pub fn neighbors(&self, node_id: NodeId) -> Option<&Neighbors> {
        self.adjacency.get(&node_id)
    }

    /// Set neighbors for a node (replaces existing).
    pub fn set_neighbors(&mut self, node_id: NodeId, neighbors: Neighbors) {
        self.adjacency.insert(node_id, neighbors);
    }

    /// Add a directed edge `from -> to`.
    ///
    /// `from` becomes a member of the layer if it was not already; `to` does
    /// not. Self-loops are ignored. Returns true if the edge is new.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        if from == to {
            return false;
        }
        self.adjacency.entry(from).or_default().add(to)
    }

    /// Check if a node exists in this layer.
    pub fn contains(&self, node_id: NodeId) -> bool {
        self.adjacency.contains_key(&node_id)
    }

    /// Get the number of nodes in this layer.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of directed edges in this layer.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Neighbors::len).sum()
    }

    /// Member node ids in ascending order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<_> = self.adjacency.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// All directed edges as `(from, to)` pairs, sorted.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges: Vec<_> = self
            .adjacency
            .iter()
            .flat_map(|(&from, neighbors)| neighbors.iter().map(move |&to| (from, to)))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Get the maximum degree for this layer.
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }
}
