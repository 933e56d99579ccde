use thiserror::Error;

/// Errors returned by embedding operations.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("cannot compute a centroid of an empty embedding set")]
    EmptySet,

    #[error("model error: {0}")]
    Model(String),
}
