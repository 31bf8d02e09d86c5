//! Core traits for vector indices.
//!
//! The `VectorIndex` trait defines the common interface implemented by all
//! vector index types (BruteForce, HNSW).

use crate::{PointId, Result};

/// A match returned from vector search.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatch {
    /// The point ID.
    pub id: PointId,
    /// Distance to the query (lower = more similar).
    pub distance: f32,
    /// The vector data (optional, for returning with results).
    pub vector: Option<Vec<f32>>,
}

impl VectorMatch {
    /// Create a new vector match.
    pub fn new(id: PointId, distance: f32) -> Self {
        Self {
            id,
            distance,
            vector: None,
        }
    }

    /// Create a new vector match with vector data.
    pub fn with_vector(id: PointId, distance: f32, vector: Vec<f32>) -> Self {
        Self {
            id,
            distance,
            vector: Some(vector),
        }
    }
}

impl Eq for VectorMatch {}

impl PartialOrd for VectorMatch {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VectorMatch {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Ties on distance fall back to id so orderings are stable
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Common interface for vector indices.
///
/// Mutation takes `&mut self`: an index has a single writer. Wrap it in a
/// reader/writer lock to share it across threads.
pub trait VectorIndex: Send + Sync {
    /// Insert a vector and return the identifier assigned to it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The vector dimension doesn't match the index dimension
    /// - The vector contains invalid values (NaN, Inf)
    fn insert(&mut self, vector: &[f32]) -> Result<PointId>;

    /// Search for the k nearest neighbors to the query vector.
    ///
    /// Returns up to `k` matches, sorted by distance (ascending). A point
    /// whose id equals `exclude` is never returned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `k` is zero
    /// - The query dimension doesn't match the index dimension
    /// - The query contains invalid values (NaN, Inf)
    fn search(
        &self,
        query: &[f32],
        exclude: Option<PointId>,
        k: usize,
    ) -> Result<Vec<VectorMatch>>;

    /// Get a vector by ID.
    fn get(&self, id: PointId) -> Result<&[f32]>;

    /// Get the number of vectors in the index.
    fn len(&self) -> usize;

    /// Check if the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the dimension of vectors in this index.
    fn dimensions(&self) -> usize;
}
