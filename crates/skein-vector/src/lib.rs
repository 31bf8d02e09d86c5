//! Vector primitives for skein.
//!
//! This crate provides the building blocks shared by every skein index:
//!
//! - **Point store**: dense, append-only storage of feature vectors keyed by
//!   [`PointId`]
//! - **Metric**: a pluggable distance function, Euclidean (L2) by default
//! - **VectorIndex trait**: common interface for vector indices
//! - **BruteForceIndex**: exact linear scan search (recall baseline)
//!
//! # Example
//!
//! ```
//! use skein_vector::{BruteForceIndex, VectorIndex};
//!
//! let mut index = BruteForceIndex::new(2);
//! index.insert(&[0.0, 0.0]).unwrap();
//! index.insert(&[3.0, 4.0]).unwrap();
//!
//! let results = index.search(&[0.0, 0.0], None, 2).unwrap();
//! assert_eq!(results[1].distance, 5.0);
//! ```

mod brute;
mod distance;
mod store;
mod traits;

pub use brute::BruteForceIndex;
pub use distance::{euclidean_distance, euclidean_distance_squared, Euclidean, Metric};
pub use store::{Point, PointStore};
pub use traits::{VectorIndex, VectorMatch};

/// Stable identifier of a stored point.
///
/// Identifiers are dense and assigned in insertion order starting at 0.
pub type PointId = u32;

/// Error type for vector operations.
#[derive(Debug, thiserror::Error)]
pub enum VectorError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Point not found: {0}")]
    NotFound(PointId),

    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Index error: {0}")]
    IndexError(String),
}

/// Result type for vector operations.
pub type Result<T> = std::result::Result<T, VectorError>;
