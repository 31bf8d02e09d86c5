//! Distance metrics for vector similarity.
//!
//! An index is parameterized by exactly one [`Metric`]. The graph search
//! algorithms assume metric properties (symmetry, non-negativity, zero only
//! for identical vectors), though they degrade gracefully to approximate
//! results for distances that bend those rules.
//!
//! Callers are expected to check dimensions before calling into a metric;
//! [`PointStore`](crate::PointStore) does so and reports
//! [`DimensionMismatch`](crate::VectorError::DimensionMismatch).

/// A distance function over equal-length vectors.
///
/// Lower values mean more similar.
pub trait Metric: Send + Sync {
    /// Compute the distance between `a` and `b`.
    ///
    /// Both slices have the same length.
    fn distance(&self, a: &[f32], b: &[f32]) -> f32;

    /// Short name used in logs and stats.
    fn name(&self) -> &'static str;
}

/// Euclidean (L2) distance: sqrt(sum((a[i] - b[i])^2)).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Euclidean;

impl Metric for Euclidean {
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        euclidean_distance(a, b)
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}

/// Compute Euclidean (L2) distance between two vectors.
///
/// # Example
///
/// ```
/// use skein_vector::euclidean_distance;
///
/// assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
/// ```
#[inline]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    euclidean_distance_squared(a, b).sqrt()
}

/// Compute squared Euclidean distance (no sqrt).
///
/// Preserves the ordering of [`euclidean_distance`], so it is enough when
/// only relative comparisons matter.
#[inline]
pub fn euclidean_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    // Process in chunks of 4 for better auto-vectorization
    let mut sum = 0.0f32;
    let chunks = a.len() / 4;

    for i in 0..chunks {
        let base = i * 4;
        let d0 = a[base] - b[base];
        let d1 = a[base + 1] - b[base + 1];
        let d2 = a[base + 2] - b[base + 2];
        let d3 = a[base + 3] - b[base + 3];
        sum += d0 * d0 + d1 * d1 + d2 * d2 + d3 * d3;
    }

    for i in (chunks * 4)..a.len() {
        let d = a[i] - b[i];
        sum += d * d;
    }

    sum
}
