//! Brute force vector index.
//!
//! Linear scan search - O(n) but exact. Serves as the ground truth that
//! approximate indices are measured against.

use crate::distance::{Euclidean, Metric};
use crate::store::PointStore;
use crate::traits::{VectorIndex, VectorMatch};
use crate::{PointId, Result, VectorError};

/// Brute force vector index.
///
/// Stores points in a [`PointStore`] and scans all of them on every search.
///
/// # Performance
///
/// - Insert: O(1)
/// - Search: O(n * d) where n = vectors, d = dimensions
pub struct BruteForceIndex<M: Metric = Euclidean> {
    store: PointStore<M>,
}

impl BruteForceIndex<Euclidean> {
    /// Create a new brute force index using Euclidean distance.
    ///
    /// # Example
    ///
    /// ```
    /// use skein_vector::BruteForceIndex;
    ///
    /// let index = BruteForceIndex::new(128);
    /// ```
    pub fn new(dimensions: usize) -> Self {
        Self::with_metric(dimensions, Euclidean)
    }
}

impl<M: Metric> BruteForceIndex<M> {
    /// Create a new brute force index with a custom metric.
    pub fn with_metric(dimensions: usize, metric: M) -> Self {
        Self {
            store: PointStore::with_metric(dimensions, metric),
        }
    }
}

impl<M: Metric> VectorIndex for BruteForceIndex<M> {
    fn insert(&mut self, vector: &[f32]) -> Result<PointId> {
        self.store.add(vector)
    }

    fn search(
        &self,
        query: &[f32],
        exclude: Option<PointId>,
        k: usize,
    ) -> Result<Vec<VectorMatch>> {
        if k == 0 {
            return Err(VectorError::InvalidParameter("k must be > 0".into()));
        }
        self.store.validate(query)?;

        let mut results: Vec<VectorMatch> = self
            .store
            .iter()
            .filter(|p| Some(p.id) != exclude)
            .map(|p| {
                let dist = self.store.metric().distance(query, &p.vector);
                VectorMatch::new(p.id, dist)
            })
            .collect();

        results.sort();
        results.truncate(k);

        Ok(results)
    }

    fn get(&self, id: PointId) -> Result<&[f32]> {
        self.store.get(id)
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn dimensions(&self) -> usize {
        self.store.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_index() -> BruteForceIndex {
        BruteForceIndex::new(3)
    }

    #[test]
    fn test_insert_and_get() {
        let mut index = create_test_index();

        let a = index.insert(&[1.0, 2.0, 3.0]).unwrap();
        let b = index.insert(&[4.0, 5.0, 6.0]).unwrap();

        assert_eq!((a, b), (0, 1));
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(a).unwrap(), &[1.0, 2.0, 3.0]);
        assert!(matches!(index.get(2), Err(VectorError::NotFound(2))));
    }

    #[test]
    fn test_search_euclidean() {
        let mut index = create_test_index();

        let origin = index.insert(&[0.0, 0.0, 0.0]).unwrap();
        let near = index.insert(&[1.0, 1.0, 1.0]).unwrap();
        let far = index.insert(&[10.0, 10.0, 10.0]).unwrap();

        let results = index.search(&[0.0, 0.0, 0.0], None, 3).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].id, origin);
        assert!(results[0].distance < 0.001);
        assert_eq!(results[1].id, near);
        assert_eq!(results[2].id, far);
    }

    #[test]
    fn test_search_excludes_id() {
        let mut index = create_test_index();

        let origin = index.insert(&[0.0, 0.0, 0.0]).unwrap();
        let near = index.insert(&[1.0, 1.0, 1.0]).unwrap();

        let results = index.search(&[0.0, 0.0, 0.0], Some(origin), 5).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, near);
    }

    #[test]
    fn test_search_top_k() {
        let mut index = create_test_index();

        for i in 0..10 {
            index.insert(&[i as f32, 0.0, 0.0]).unwrap();
        }

        let results = index.search(&[0.0, 0.0, 0.0], None, 3).unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_search_empty_index() {
        let index = create_test_index();
        let results = index.search(&[1.0, 2.0, 3.0], None, 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_k_zero() {
        let mut index = create_test_index();
        index.insert(&[1.0, 2.0, 3.0]).unwrap();

        let result = index.search(&[1.0, 2.0, 3.0], None, 0);
        assert!(matches!(result, Err(VectorError::InvalidParameter(_))));
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut index = create_test_index();

        let result = index.insert(&[1.0, 2.0]);
        assert!(matches!(result, Err(VectorError::DimensionMismatch { .. })));

        index.insert(&[1.0, 2.0, 3.0]).unwrap();
        let result = index.search(&[1.0, 2.0], None, 1);
        assert!(matches!(result, Err(VectorError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_invalid_values() {
        let mut index = create_test_index();

        let result = index.insert(&[1.0, f32::NAN, 3.0]);
        assert!(matches!(result, Err(VectorError::InvalidVector(_))));

        let result = index.insert(&[1.0, f32::INFINITY, 3.0]);
        assert!(matches!(result, Err(VectorError::InvalidVector(_))));
        assert!(index.is_empty());
    }
}
