use thiserror::Error;

/// Validation failures on waveform construction.
#[derive(Debug, Error)]
pub enum WaveformError {
    #[error("waveform has no samples")]
    Empty,

    #[error("waveform has zero channels")]
    NoChannels,

    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    #[error("non-finite sample at index {index}")]
    NonFinite { index: usize },
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("waveform error: {0}")]
    Waveform(#[from] WaveformError),

    #[error("resampler error: {0}")]
    Resample(String),
}
