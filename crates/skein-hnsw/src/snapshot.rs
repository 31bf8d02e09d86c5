//! Read-only views of the index for rendering and diagnostics.

use crate::index::HnswIndex;
use serde::Serialize;
use skein_vector::{Metric, PointId};
use std::fmt;

/// Node and edge counts for one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerStats {
    pub layer: usize,
    pub nodes: usize,
    /// Directed edges, so a reciprocal pair counts twice.
    pub edges: usize,
}

/// Summary of an index's shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HnswStats {
    pub points: usize,
    pub dimensions: usize,
    pub metric: &'static str,
    pub entry_point: Option<PointId>,
    pub max_level: usize,
    /// Layers 0 through `max_level`.
    pub layers: Vec<LayerStats>,
}

impl<M: Metric> HnswIndex<M> {
    /// All stored points as `(id, coordinates)`, in id order.
    pub fn snapshot_points(&self) -> Vec<(PointId, Vec<f32>)> {
        self.store
            .iter()
            .map(|p| (p.id, p.vector.clone()))
            .collect()
    }

    /// Directed edges on `layer` as sorted `(from, to)` pairs.
    ///
    /// A pair may appear in one direction only. Layers above the current
    /// maximum are empty.
    pub fn snapshot_edges(&self, layer: usize) -> Vec<(PointId, PointId)> {
        self.layers
            .get(layer)
            .map(|g| g.edges())
            .unwrap_or_default()
    }

    /// Per-layer node and edge counts.
    pub fn stats(&self) -> HnswStats {
        let layers = (0..=self.max_level)
            .filter_map(|layer| {
                self.layers.get(layer).map(|g| LayerStats {
                    layer,
                    nodes: g.len(),
                    edges: g.edge_count(),
                })
            })
            .collect();

        HnswStats {
            points: self.store.len(),
            dimensions: self.store.dimensions(),
            metric: self.store.metric().name(),
            entry_point: self.entry_point,
            max_level: self.max_level,
            layers,
        }
    }

    /// Printable adjacency of every layer, top layer first.
    ///
    /// ```text
    /// Level 1
    /// Node: 0->[2]
    ///
    /// Level 0
    /// Node: 0->[1, 2]
    /// ```
    pub fn dump(&self) -> GraphDump<'_, M> {
        GraphDump { index: self }
    }
}

/// [`Display`](fmt::Display) adapter returned by [`HnswIndex::dump`].
pub struct GraphDump<'a, M: Metric> {
    index: &'a HnswIndex<M>,
}

impl<M: Metric> fmt::Display for GraphDump<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.index.is_empty() {
            return Ok(());
        }

        for layer in (0..=self.index.max_level).rev() {
            let Some(graph) = self.index.layers.get(layer) else {
                continue;
            };
            writeln!(f, "Level {}", layer)?;
            for node_id in graph.node_ids() {
                let ids = graph
                    .neighbors(node_id)
                    .map(|n| n.ids.as_slice())
                    .unwrap_or_default();
                writeln!(f, "Node: {}->{:?}", node_id, ids)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
