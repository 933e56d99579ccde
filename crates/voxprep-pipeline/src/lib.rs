//! Orchestration of the preprocessing stage sequence and the high-level
//! speaker-encoder entry point.
//!
//! Stage order is fixed: resample/mix, bandpass, pre-emphasis, VAD,
//! normalize. The pipeline is a pure function of `(waveform, config)`; the
//! only state shared between runs is the filter-coefficient cache.

pub mod encoder;
pub mod error;
pub mod metadata;
pub mod preprocessor;

pub use encoder::{BatchFailure, BatchItem, BatchOutcome, SpeakerEncoder};
pub use error::PipelineError;
pub use metadata::{PreprocessMetadata, VadStats};
pub use preprocessor::Preprocessor;
