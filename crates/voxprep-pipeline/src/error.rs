use thiserror::Error;

use voxprep_embedding::EmbeddingError;
use voxprep_foundation::{AudioError, WaveformError};

/// A pipeline run aborts on the first stage failure; no partial or degraded
/// output is ever returned silently. Retrying is the caller's decision.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("waveform validation failed: {0}")]
    Waveform(#[from] WaveformError),

    #[error("audio stage failed: {0}")]
    Audio(#[from] AudioError),

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
}
