use crate::error::EmbeddingError;

/// Cosine similarity between two embeddings, in [-1, 1].
///
/// Returns `0.0` when either vector has zero norm: a zero vector has no
/// defined direction, which is treated as "no similarity", not an error.
/// Accumulation runs in f64 to keep long vectors stable.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        dot += x as f64 * y as f64;
        norm_a += x as f64 * x as f64;
        norm_b += y as f64 * y as f64;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())) as f32)
}

/// Elementwise arithmetic mean of a non-empty set of embeddings: the average
/// "voice print" over several recordings.
///
/// All vectors must share one dimension; mismatches are rejected rather than
/// silently broadcast.
pub fn centroid(vectors: &[Vec<f32>]) -> Result<Vec<f32>, EmbeddingError> {
    let Some(first) = vectors.first() else {
        return Err(EmbeddingError::EmptySet);
    };
    let dim = first.len();

    let mut sums = vec![0.0f64; dim];
    for vector in vectors {
        if vector.len() != dim {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dim,
                got: vector.len(),
            });
        }
        for (sum, &x) in sums.iter_mut().zip(vector) {
            *sum += x as f64;
        }
    }

    let count = vectors.len() as f64;
    Ok(sums.into_iter().map(|s| (s / count) as f32).collect())
}
