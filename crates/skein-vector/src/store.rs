//! Append-only point storage.
//!
//! Every vector inserted into an index lives here, keyed by a dense
//! [`PointId`]. Points are immutable once stored and are never removed.

use crate::distance::{Euclidean, Metric};
use crate::{PointId, Result, VectorError};

/// A stored feature vector and the identifier assigned at insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Identifier assigned by the store.
    pub id: PointId,
    /// The vector data.
    pub vector: Vec<f32>,
}

/// Dense store of fixed-dimension points with a single distance metric.
///
/// # Example
///
/// ```
/// use skein_vector::PointStore;
///
/// let mut store = PointStore::new(2);
/// let a = store.add(&[0.0, 0.0]).unwrap();
/// let b = store.add(&[3.0, 4.0]).unwrap();
/// assert_eq!(store.distance(a, b).unwrap(), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct PointStore<M: Metric = Euclidean> {
    points: Vec<Point>,
    dimensions: usize,
    metric: M,
}

impl PointStore<Euclidean> {
    /// Create an empty store using Euclidean distance.
    pub fn new(dimensions: usize) -> Self {
        Self::with_metric(dimensions, Euclidean)
    }
}

impl<M: Metric> PointStore<M> {
    /// Create an empty store using the given metric.
    pub fn with_metric(dimensions: usize, metric: M) -> Self {
        Self {
            points: Vec::new(),
            dimensions,
            metric,
        }
    }

    /// Check a vector's dimension and values without storing it.
    ///
    /// # Errors
    ///
    /// - [`VectorError::DimensionMismatch`] if the length differs from the
    ///   store's dimension
    /// - [`VectorError::InvalidVector`] if a component is NaN or infinite
    pub fn validate(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }

        for (i, &v) in vector.iter().enumerate() {
            if v.is_nan() {
                return Err(VectorError::InvalidVector(format!("NaN at index {}", i)));
            }
            if v.is_infinite() {
                return Err(VectorError::InvalidVector(format!("Inf at index {}", i)));
            }
        }

        Ok(())
    }

    /// Id that the next call to [`add`](Self::add) will assign.
    pub fn next_id(&self) -> Result<PointId> {
        PointId::try_from(self.points.len())
            .map_err(|_| VectorError::IndexError("point id space exhausted".into()))
    }

    /// Store a vector and return its new identifier.
    ///
    /// Nothing is stored if validation fails.
    pub fn add(&mut self, vector: &[f32]) -> Result<PointId> {
        self.validate(vector)?;
        let id = self.next_id()?;
        self.points.push(Point {
            id,
            vector: vector.to_vec(),
        });
        Ok(id)
    }

    /// Get a stored point.
    pub fn point(&self, id: PointId) -> Result<&Point> {
        self.points
            .get(id as usize)
            .ok_or(VectorError::NotFound(id))
    }

    /// Get a stored vector.
    pub fn get(&self, id: PointId) -> Result<&[f32]> {
        self.point(id).map(|p| p.vector.as_slice())
    }

    /// Check whether an id has been assigned.
    pub fn contains(&self, id: PointId) -> bool {
        (id as usize) < self.points.len()
    }

    /// Distance between two stored points.
    pub fn distance(&self, a: PointId, b: PointId) -> Result<f32> {
        let a = self.get(a)?;
        let b = self.get(b)?;
        Ok(self.metric.distance(a, b))
    }

    /// Distance between a stored point and an ad-hoc query vector.
    pub fn distance_to(&self, id: PointId, query: &[f32]) -> Result<f32> {
        let stored = self.get(id)?;
        if stored.len() != query.len() {
            return Err(VectorError::DimensionMismatch {
                expected: stored.len(),
                actual: query.len(),
            });
        }
        Ok(self.metric.distance(stored, query))
    }

    /// Iterate over stored points in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimension every stored vector has.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The metric used for all distances.
    pub fn metric(&self) -> &M {
        &self.metric
    }
}
