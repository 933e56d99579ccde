use voxprep_foundation::Waveform;

use crate::error::EmbeddingError;

/// Fixed-dimension embedding vector produced by a speaker model
/// (e.g. 192 floats for ECAPA-TDNN).
pub type EmbeddingVector = Vec<f32>;

/// An opaque speaker-embedding capability: waveform in, fixed-dimension
/// vector out.
///
/// Implementations must be deterministic for identical input and must return
/// vectors of exactly [`dimension`](EmbeddingModel::dimension) elements. The
/// neural network behind this trait is an external collaborator; this crate
/// only defines the seam so the pipeline can have a model injected rather
/// than reading process-wide state.
pub trait EmbeddingModel: Send + Sync {
    /// Dimension every `encode` result has.
    fn dimension(&self) -> usize;

    /// Encode a preprocessed mono waveform into a speaker embedding.
    fn encode(&self, waveform: &Waveform) -> Result<EmbeddingVector, EmbeddingError>;
}
