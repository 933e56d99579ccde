//! End-to-end extraction through a deterministic fake embedding model.

use std::sync::Arc;

use voxprep_embedding::{
    centroid, cosine_similarity, EmbeddingError, EmbeddingModel, EmbeddingVector,
};
use voxprep_foundation::{ConfigHandle, PreprocessingConfig, Waveform};
use voxprep_pipeline::SpeakerEncoder;

/// Deterministic stand-in for the neural model: splits the waveform into
/// `dim` bins and embeds each bin's RMS. Rejects clips shorter than the
/// embedding dimension, giving batch tests a realistic failure mode.
struct BinRmsModel {
    dim: usize,
}

impl EmbeddingModel for BinRmsModel {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn encode(&self, waveform: &Waveform) -> Result<EmbeddingVector, EmbeddingError> {
        let samples = waveform.samples();
        if samples.len() < self.dim {
            return Err(EmbeddingError::Model(format!(
                "clip too short: {} samples",
                samples.len()
            )));
        }
        let bin = samples.len() / self.dim;
        Ok((0..self.dim)
            .map(|i| {
                let slice = &samples[i * bin..(i + 1) * bin];
                let ms =
                    slice.iter().map(|&s| (s as f64) * (s as f64)).sum::<f64>() / bin as f64;
                ms.sqrt() as f32
            })
            .collect())
    }
}

fn tone_clip(freq: f32, seconds: f32) -> Waveform {
    let rate = 16_000u32;
    let n = (seconds * rate as f32) as usize;
    let samples = (0..n)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * freq * i as f32 / rate as f32;
            0.5 * phase.sin()
        })
        .collect();
    Waveform::mono(samples, rate).unwrap()
}

fn encoder() -> SpeakerEncoder {
    SpeakerEncoder::new(Arc::new(BinRmsModel { dim: 192 }), ConfigHandle::default())
}

#[test]
fn extract_returns_model_dimension_and_metadata() {
    let encoder = encoder();
    let (embedding, metadata) = encoder.extract(&tone_clip(440.0, 2.0)).unwrap();

    assert_eq!(embedding.len(), 192);
    assert!(metadata
        .preprocessing_applied
        .iter()
        .any(|tag| tag == "vad"));
    assert!(metadata.final_duration_s > 0.0);
}

#[test]
fn extraction_is_deterministic() {
    let encoder = encoder();
    let clip = tone_clip(440.0, 2.0);
    let (first, _) = encoder.extract(&clip).unwrap();
    let (second, _) = encoder.extract(&clip).unwrap();
    assert_eq!(first, second);

    let sim = cosine_similarity(&first, &second).unwrap();
    assert!((sim - 1.0).abs() < 1e-6);
}

#[test]
fn extract_raw_skips_cleanup_stages() {
    let encoder = encoder();
    let clip = tone_clip(440.0, 2.0);
    let raw = encoder.extract_raw(&clip).unwrap();
    assert_eq!(raw.len(), 192);

    // The raw path sees unnormalized audio, so it differs from the full
    // pipeline's embedding.
    let (processed, _) = encoder.extract(&clip).unwrap();
    assert_ne!(raw, processed);
}

#[test]
fn batch_collects_failures_without_aborting() {
    let encoder = encoder();
    let clips = vec![
        tone_clip(300.0, 2.0),
        // Long enough to pass validation, far too short for the model.
        Waveform::mono(vec![0.0f32; 32], 16_000).unwrap(),
        tone_clip(500.0, 2.0),
    ];
    let outcome = encoder.extract_batch(&clips);

    assert_eq!(outcome.succeeded.len(), 2);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].index, 1);
    assert_eq!(outcome.succeeded[0].index, 0);
    assert_eq!(outcome.succeeded[1].index, 2);
}

#[test]
fn centroid_of_repeated_speaker_matches_single_take() {
    let encoder = encoder();
    let clip = tone_clip(440.0, 2.0);
    let (embedding, _) = encoder.extract(&clip).unwrap();

    let voiceprint = centroid(&vec![embedding.clone(); 3]).unwrap();
    assert_eq!(voiceprint, embedding);
}

#[test]
fn config_replacement_affects_later_extractions_only() {
    let encoder = encoder();
    let clip = tone_clip(440.0, 2.0);
    let (_, with_vad) = encoder.extract(&clip).unwrap();
    assert!(with_vad.vad_stats.is_some());

    encoder.config().replace(PreprocessingConfig {
        vad_enabled: false,
        ..PreprocessingConfig::default()
    });
    let (_, without_vad) = encoder.extract(&clip).unwrap();
    assert!(without_vad.vad_stats.is_none());
}
