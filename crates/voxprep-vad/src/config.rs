use serde::{Deserialize, Serialize};

use voxprep_foundation::PreprocessingConfig;

/// Parameters for energy-based voice activity detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VadConfig {
    /// Minimum smoothed, max-normalized frame energy counted as speech.
    pub energy_threshold: f32,
    /// Analysis frame length in milliseconds; frames overlap by 50%.
    pub frame_ms: u32,
    /// Shortest speech run worth keeping.
    pub min_speech_ms: u32,
    /// Context preserved on both sides of each kept run.
    pub padding_ms: u32,
}

impl Default for VadConfig {
    fn default() -> Self {
        Self {
            energy_threshold: 0.01,
            frame_ms: 30,
            min_speech_ms: 250,
            padding_ms: 100,
        }
    }
}

impl From<&PreprocessingConfig> for VadConfig {
    fn from(config: &PreprocessingConfig) -> Self {
        Self {
            energy_threshold: config.vad_energy_threshold,
            frame_ms: config.vad_frame_ms,
            min_speech_ms: config.vad_min_speech_ms,
            padding_ms: config.vad_padding_ms,
        }
    }
}
