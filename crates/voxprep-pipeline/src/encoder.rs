use std::sync::Arc;

use voxprep_audio::resampler;
use voxprep_embedding::{EmbeddingModel, EmbeddingVector};
use voxprep_foundation::{ConfigHandle, Waveform, CANONICAL_SAMPLE_RATE_HZ};

use crate::error::PipelineError;
use crate::metadata::PreprocessMetadata;
use crate::preprocessor::Preprocessor;

/// Preprocesses waveforms and hands them to an injected embedding model.
///
/// Both collaborators are passed in explicitly: the model as a shared
/// capability, the config through a [`ConfigHandle`] whose snapshots are
/// taken once per extraction.
pub struct SpeakerEncoder {
    model: Arc<dyn EmbeddingModel>,
    config: ConfigHandle,
    preprocessor: Preprocessor,
}

/// One successfully embedded batch item.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub index: usize,
    pub embedding: EmbeddingVector,
    pub metadata: PreprocessMetadata,
}

/// One failed batch item; the error is carried as text so the batch result
/// stays independent of the failing stage.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub index: usize,
    pub error: String,
}

/// Result of a batch extraction. A failing item never aborts the batch.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub succeeded: Vec<BatchItem>,
    pub failed: Vec<BatchFailure>,
}

impl SpeakerEncoder {
    pub fn new(model: Arc<dyn EmbeddingModel>, config: ConfigHandle) -> Self {
        Self {
            model,
            config,
            preprocessor: Preprocessor::new(),
        }
    }

    /// Handle for administrative config replacement.
    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// Full path: preprocess, then encode.
    pub fn extract(
        &self,
        input: &Waveform,
    ) -> Result<(EmbeddingVector, PreprocessMetadata), PipelineError> {
        let config = self.config.snapshot();
        let (wave, metadata) = self.preprocessor.process(input, &config)?;
        let embedding = self.model.encode(&wave)?;
        Ok((embedding, metadata))
    }

    /// Legacy path: only bring the audio to canonical mono 16 kHz, skip all
    /// cleanup stages, and encode.
    pub fn extract_raw(&self, input: &Waveform) -> Result<EmbeddingVector, PipelineError> {
        let mono = resampler::mix_to_mono(input)?;
        let wave = resampler::resample_to(&mono, CANONICAL_SAMPLE_RATE_HZ)?;
        Ok(self.model.encode(&wave)?)
    }

    /// Extract embeddings for many waveforms, keeping input order via the
    /// item indices. Failures are collected per item.
    pub fn extract_batch(&self, inputs: &[Waveform]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for (index, input) in inputs.iter().enumerate() {
            match self.extract(input) {
                Ok((embedding, metadata)) => outcome.succeeded.push(BatchItem {
                    index,
                    embedding,
                    metadata,
                }),
                Err(error) => {
                    tracing::warn!(index, %error, "batch item failed");
                    outcome.failed.push(BatchFailure {
                        index,
                        error: error.to_string(),
                    });
                }
            }
        }
        outcome
    }
}
