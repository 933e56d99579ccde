use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Tunable parameters for the preprocessing pipeline.
///
/// A config is an immutable snapshot: a pipeline run reads one snapshot for
/// its whole lifetime. Live updates go through [`ConfigHandle::replace`],
/// which swaps the entire object, never individual fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingConfig {
    /// Bandpass low cutoff in Hz (removes rumble and mains hum).
    pub bandpass_low_hz: f64,
    /// Bandpass high cutoff in Hz (removes hiss above the speech band).
    pub bandpass_high_hz: f64,
    /// Butterworth filter order.
    pub filter_order: usize,

    /// Peak normalization target in dBFS.
    pub target_db: f64,
    pub normalize_audio: bool,

    pub vad_enabled: bool,
    /// Minimum smoothed, max-normalized frame energy counted as speech.
    pub vad_energy_threshold: f32,
    /// VAD analysis frame length in milliseconds.
    pub vad_frame_ms: u32,
    /// Shortest speech run worth keeping.
    pub vad_min_speech_ms: u32,
    /// Context preserved on both sides of each speech run.
    pub vad_padding_ms: u32,

    pub pre_emphasis_enabled: bool,
    pub pre_emphasis_coef: f32,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            bandpass_low_hz: 80.0,
            bandpass_high_hz: 7500.0,
            filter_order: 5,
            target_db: -3.0,
            normalize_audio: true,
            vad_enabled: true,
            vad_energy_threshold: 0.01,
            vad_frame_ms: 30,
            vad_min_speech_ms: 250,
            vad_padding_ms: 100,
            pre_emphasis_enabled: true,
            pre_emphasis_coef: 0.97,
        }
    }
}

/// Shared handle to the live preprocessing configuration.
///
/// Readers take whole snapshots ([`ConfigHandle::snapshot`]); an
/// administrative update replaces the snapshot atomically, so a concurrent
/// run observes either the old or the new config, never a mix.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<Arc<PreprocessingConfig>>>,
}

impl ConfigHandle {
    pub fn new(config: PreprocessingConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// Current config snapshot. The returned `Arc` stays valid across
    /// concurrent `replace` calls.
    pub fn snapshot(&self) -> Arc<PreprocessingConfig> {
        self.inner.read().clone()
    }

    /// Replace the live config wholesale.
    pub fn replace(&self, config: PreprocessingConfig) {
        *self.inner.write() = Arc::new(config);
        tracing::info!("preprocessing configuration replaced");
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(PreprocessingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = PreprocessingConfig::default();
        assert_eq!(config.bandpass_low_hz, 80.0);
        assert_eq!(config.bandpass_high_hz, 7500.0);
        assert_eq!(config.filter_order, 5);
        assert_eq!(config.target_db, -3.0);
        assert!(config.normalize_audio);
        assert!(config.vad_enabled);
        assert_eq!(config.vad_energy_threshold, 0.01);
        assert_eq!(config.vad_frame_ms, 30);
        assert_eq!(config.vad_min_speech_ms, 250);
        assert_eq!(config.vad_padding_ms, 100);
        assert!(config.pre_emphasis_enabled);
        assert_eq!(config.pre_emphasis_coef, 0.97);
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let config: PreprocessingConfig =
            serde_json::from_str(r#"{"vad_enabled": false, "target_db": -6.0}"#).unwrap();
        assert!(!config.vad_enabled);
        assert_eq!(config.target_db, -6.0);
        assert_eq!(config.bandpass_low_hz, 80.0);
        assert_eq!(config.filter_order, 5);
    }

    #[test]
    fn snapshot_is_stable_across_replace() {
        let handle = ConfigHandle::default();
        let before = handle.snapshot();

        handle.replace(PreprocessingConfig {
            vad_enabled: false,
            ..PreprocessingConfig::default()
        });

        // The old snapshot is untouched; a fresh one sees the update.
        assert!(before.vad_enabled);
        assert!(!handle.snapshot().vad_enabled);
    }
}
