//! Thread-shareable handle around an [`HnswIndex`].
//!
//! Insertion rewrites neighbor lists in place, so it takes the write lock
//! and waits for in-flight queries. Queries and snapshots share the read
//! lock and can run concurrently.

use crate::index::HnswIndex;
use crate::snapshot::HnswStats;
use crate::Result;
use parking_lot::{RwLock, RwLockReadGuard};
use skein_vector::{Euclidean, Metric, PointId, VectorMatch};
use std::sync::Arc;

/// Cloneable, one-writer/many-readers handle to an index.
pub struct SharedHnswIndex<M: Metric = Euclidean> {
    inner: Arc<RwLock<HnswIndex<M>>>,
}

impl<M: Metric> Clone for SharedHnswIndex<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M: Metric> From<HnswIndex<M>> for SharedHnswIndex<M> {
    fn from(index: HnswIndex<M>) -> Self {
        Self::new(index)
    }
}

impl<M: Metric> SharedHnswIndex<M> {
    /// Wrap an index.
    pub fn new(index: HnswIndex<M>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Insert under the write lock.
    pub fn insert(&self, vector: &[f32]) -> Result<PointId> {
        self.inner.write().insert(vector)
    }

    /// Query under the read lock.
    pub fn k_nearest(
        &self,
        query: &[f32],
        exclude: Option<PointId>,
        k: usize,
    ) -> Result<Vec<VectorMatch>> {
        self.inner.read().k_nearest(query, exclude, k)
    }

    /// See [`HnswIndex::snapshot_points`].
    pub fn snapshot_points(&self) -> Vec<(PointId, Vec<f32>)> {
        self.inner.read().snapshot_points()
    }

    /// See [`HnswIndex::snapshot_edges`].
    pub fn snapshot_edges(&self, layer: usize) -> Vec<(PointId, PointId)> {
        self.inner.read().snapshot_edges(layer)
    }

    /// See [`HnswIndex::stats`].
    pub fn stats(&self) -> HnswStats {
        self.inner.read().stats()
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Hold the read lock for several reads against one consistent state.
    pub fn read(&self) -> RwLockReadGuard<'_, HnswIndex<M>> {
        self.inner.read()
    }
}
