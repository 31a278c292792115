//! Distance-based similarity used by every semantic feature.
//!
//! `similarity = 1 / (1 + ||a - b||)`: defined for every finite pair, strictly decreasing in
//! Euclidean distance, and bounded to `(0, 1]`. Mixing metrics across features within one
//! run would skew the aggregation, so callers should only ever use [`l2_similarity`].

use super::error::EmbeddingError;

/// Euclidean distance between two vectors of equal length.
pub fn l2_distance(a: &[f32], b: &[f32]) -> Result<f64, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut sum = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        if !x.is_finite() || !y.is_finite() {
            return Err(EmbeddingError::NonFiniteVector);
        }
        let d = f64::from(*x) - f64::from(*y);
        sum += d * d;
    }

    Ok(sum.sqrt())
}

/// Reciprocal-distance similarity in `(0, 1]`; identical vectors score `1.0`.
pub fn l2_similarity(a: &[f32], b: &[f32]) -> Result<f64, EmbeddingError> {
    Ok(1.0 / (1.0 + l2_distance(a, b)?))
}
