use std::sync::Arc;

use voxprep_audio::{emphasis, filter, normalize, resampler, FilterBank};
use voxprep_foundation::{PreprocessingConfig, Waveform, CANONICAL_SAMPLE_RATE_HZ};
use voxprep_vad::VadConfig;

use crate::error::PipelineError;
use crate::metadata::{round1, tags, PreprocessMetadata};

/// Runs the fixed stage sequence over one waveform:
/// resample/mix -> bandpass -> pre-emphasis -> VAD -> normalize.
///
/// Holds no per-run state; the filter bank is the only thing shared across
/// invocations and it is safe to share across threads. The config snapshot
/// is injected per call, so a concurrent config replacement never affects a
/// run already in flight.
#[derive(Debug, Default)]
pub struct Preprocessor {
    filters: Arc<FilterBank>,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share a filter bank with other preprocessors (coefficients are
    /// immutable, so this is always safe).
    pub fn with_filter_bank(filters: Arc<FilterBank>) -> Self {
        Self { filters }
    }

    /// Preprocess `input` into a cleaned mono 16 kHz waveform plus the
    /// metadata record for this run.
    pub fn process(
        &self,
        input: &Waveform,
        config: &PreprocessingConfig,
    ) -> Result<(Waveform, PreprocessMetadata), PipelineError> {
        let original_duration_s = input.duration_s();
        let original_sample_rate = input.sample_rate();
        let mut applied: Vec<String> = Vec::new();

        // Canonical form: mono at 16 kHz.
        let was_multichannel = input.channels() > 1;
        let was_resampled = input.sample_rate() != CANONICAL_SAMPLE_RATE_HZ;
        let mono = resampler::mix_to_mono(input)?;
        let mut wave = resampler::resample_to(&mono, CANONICAL_SAMPLE_RATE_HZ)?;
        if was_resampled {
            applied.push(tags::RESAMPLE_16K.to_string());
        }
        if was_multichannel {
            applied.push(tags::MONO_CONVERSION.to_string());
        }

        // Bandpass always runs; the designer clamps degenerate cutoffs.
        wave = filter::apply_bandpass(
            &self.filters,
            &wave,
            config.bandpass_low_hz,
            config.bandpass_high_hz,
            config.filter_order,
        )?;
        applied.push(tags::bandpass(config.bandpass_low_hz, config.bandpass_high_hz));

        if config.pre_emphasis_enabled {
            wave = emphasis::pre_emphasis(&wave, config.pre_emphasis_coef)?;
            applied.push(tags::PRE_EMPHASIS.to_string());
        }

        let mut vad_stats = None;
        if config.vad_enabled {
            let (trimmed, stats) = voxprep_vad::apply_vad(&wave, &VadConfig::from(config))?;
            wave = trimmed;
            vad_stats = Some(stats);
            applied.push(tags::VAD.to_string());
        }

        if config.normalize_audio {
            wave = normalize::normalize_peak(&wave, config.target_db)?;
            applied.push(tags::AMPLITUDE_NORMALIZATION.to_string());
        }

        let final_duration_s = wave.duration_s();
        tracing::debug!(
            original_s = original_duration_s,
            final_s = final_duration_s,
            stages = ?applied,
            "preprocessing complete"
        );

        let metadata = PreprocessMetadata {
            original_duration_s,
            original_sample_rate,
            preprocessing_applied: applied,
            vad_stats,
            final_duration_s,
            duration_reduction_pct: round1(
                (1.0 - final_duration_s / original_duration_s) * 100.0,
            ),
        };
        Ok((wave, metadata))
    }
}
