//! Energy-based voice activity detection for offline waveforms.
//!
//! Frames the signal with 50% overlap, computes smoothed max-normalized RMS
//! energies, keeps speech runs that clear the configured minimum duration,
//! pads and merges them, then splices the surviving audio back together with
//! short crossfades. When nothing qualifies as speech the detector fails
//! open and returns the input unchanged: destroying the only available audio
//! would be worse than keeping noise.

pub mod config;
pub mod energy;
pub mod segments;
pub mod splice;

use serde::Serialize;

use voxprep_foundation::{AudioError, Waveform};

pub use config::VadConfig;
pub use segments::SpeechSegment;

/// Fixed crossfade window for splicing: 160 samples = 10 ms at 16 kHz.
pub const CROSSFADE_SAMPLES: usize = 160;

/// Outcome statistics for one VAD pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VadStats {
    /// Number of merged speech segments kept.
    pub speech_segments: usize,
    /// Kept-to-original sample ratio, rounded to 3 decimals.
    pub speech_ratio: f64,
    /// True when no speech was found and the input was passed through.
    pub kept_original: bool,
}

/// Remove non-speech audio from a mono waveform.
pub fn apply_vad(input: &Waveform, config: &VadConfig) -> Result<(Waveform, VadStats), AudioError> {
    let rate = input.sample_rate();
    let samples = input.samples();

    let frame_samples = ((rate as u64 * config.frame_ms as u64) / 1000).max(1) as usize;
    let hop_samples = (frame_samples / 2).max(1);
    // Thresholds are expressed in frames; the factor 2 matches the 50% hop.
    let min_speech_frames =
        (config.min_speech_ms as f64 / config.frame_ms as f64 * 2.0) as usize;
    let padding_frames = (config.padding_ms as f64 / config.frame_ms as f64 * 2.0) as usize;

    let energies = energy::frame_energies(samples, frame_samples, hop_samples);
    let smoothed = energy::smooth_normalized(&energies);
    let speech: Vec<bool> = smoothed
        .iter()
        .map(|&e| e > config.energy_threshold)
        .collect();

    let detected = segments::detect(&speech, min_speech_frames, padding_frames);
    if detected.is_empty() {
        tracing::warn!("no speech detected, keeping original audio");
        let stats = VadStats {
            speech_segments: 0,
            speech_ratio: 0.0,
            kept_original: true,
        };
        return Ok((input.clone(), stats));
    }

    let merged = segments::merge(detected);
    let pieces: Vec<&[f32]> = merged
        .iter()
        .map(|segment| {
            let start = segment.start * hop_samples;
            let end = (segment.end * hop_samples + frame_samples).min(samples.len());
            &samples[start..end]
        })
        .collect();

    let combined = splice::crossfade_concat(&pieces, CROSSFADE_SAMPLES);
    let stats = VadStats {
        speech_segments: merged.len(),
        speech_ratio: round3(combined.len() as f64 / samples.len() as f64),
        kept_original: false,
    };
    tracing::debug!(
        speech_segments = stats.speech_segments,
        speech_ratio = stats.speech_ratio,
        "speech extracted"
    );
    Ok((Waveform::mono(combined, rate)?, stats))
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
