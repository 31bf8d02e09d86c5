//! Graph traversal: greedy descent on upper layers and best-first search
//! on the base layer.

use crate::graph::NodeId;
use crate::layer::Layers;
use crate::Result;
use skein_vector::{Metric, PointStore};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

/// Candidate during search (node_id, distance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candidate {
    pub node_id: NodeId,
    pub distance: f32,
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.node_id.cmp(&other.node_id))
    }
}

/// Hill-climb from `start` toward `query` on one layer.
///
/// Moves to the closest neighbor while it is strictly closer than the
/// current node and returns the local optimum. A node without an adjacency
/// list on `layer` is returned as is.
pub(crate) fn greedy_descend<M: Metric>(
    layers: &Layers,
    store: &PointStore<M>,
    start: NodeId,
    query: &[f32],
    layer: usize,
) -> Result<NodeId> {
    let mut current = start;
    let mut current_dist = store.distance_to(current, query)?;

    loop {
        let Some(neighbors) = layers.get(layer).and_then(|g| g.neighbors(current)) else {
            return Ok(current);
        };
        if neighbors.is_empty() {
            return Ok(current);
        }

        let mut best = current;
        let mut best_dist = current_dist;
        for &neighbor_id in neighbors.iter() {
            let dist = store.distance_to(neighbor_id, query)?;
            if dist < best_dist {
                best = neighbor_id;
                best_dist = dist;
            }
        }

        if best == current {
            return Ok(current);
        }
        current = best;
        current_dist = best_dist;
    }
}

/// Best-first search over layer 0.
///
/// Keeps a min-heap frontier and a max-heap of the `k` best nodes accepted
/// so far. Every popped node has its unseen neighbors expanded, whether or
/// not it is accepted, and the search runs until the frontier is empty, so
/// the whole component reachable from `entry` is visited. `exclude` is never
/// accepted.
///
/// Returns up to `k` candidates sorted closest first.
pub(crate) fn search_base_layer<M: Metric>(
    layers: &Layers,
    store: &PointStore<M>,
    entry: NodeId,
    query: &[f32],
    exclude: Option<NodeId>,
    k: usize,
) -> Result<Vec<Candidate>> {
    let Some(base) = layers.get(0) else {
        return Ok(Vec::new());
    };

    // Min-heap for the frontier (closest first)
    let mut frontier: BinaryHeap<Reverse<Candidate>> = BinaryHeap::new();
    // Max-heap for results (furthest first, for eviction)
    // Bounded by the store so an oversized k cannot overflow the allocation
    let mut results: BinaryHeap<Candidate> =
        BinaryHeap::with_capacity(k.min(store.len()).saturating_add(1));
    let mut seen: HashSet<NodeId> = HashSet::new();
    if let Some(excluded) = exclude {
        seen.insert(excluded);
    }

    frontier.push(Reverse(Candidate {
        node_id: entry,
        distance: store.distance_to(entry, query)?,
    }));

    let mut expanded = 0usize;
    while let Some(Reverse(current)) = frontier.pop() {
        expanded += 1;

        if let Some(neighbors) = base.neighbors(current.node_id) {
            for &neighbor_id in neighbors.iter() {
                if seen.insert(neighbor_id) {
                    let distance = store.distance_to(neighbor_id, query)?;
                    frontier.push(Reverse(Candidate {
                        node_id: neighbor_id,
                        distance,
                    }));
                }
            }
        }

        if Some(current.node_id) == exclude {
            continue;
        }
        // The entry is not marked seen, so it can come back through a neighbor
        if results.iter().any(|c| c.node_id == current.node_id) {
            continue;
        }

        if results.len() < k {
            results.push(current);
        } else if let Some(worst) = results.peek() {
            if current < *worst {
                results.pop();
                results.push(current);
            }
        }
    }

    tracing::trace!(entry, expanded, found = results.len(), "base layer search finished");

    Ok(results.into_sorted_vec())
}
