pub mod config;
pub mod error;
pub mod waveform;

pub use config::{ConfigHandle, PreprocessingConfig};
pub use error::{AudioError, WaveformError};
pub use waveform::{Waveform, CANONICAL_SAMPLE_RATE_HZ};
