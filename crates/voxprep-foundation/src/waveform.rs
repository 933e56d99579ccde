use crate::error::WaveformError;

/// Canonical sample rate for all downstream processing (Hz).
pub const CANONICAL_SAMPLE_RATE_HZ: u32 = 16_000;

/// A decoded PCM waveform: float samples, interleaved when multichannel.
///
/// Construction validates the buffer once; pipeline stages consume a
/// `Waveform` by reference and return a freshly allocated one, so a stage
/// never mutates its input in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl Waveform {
    /// Build a waveform from interleaved samples.
    ///
    /// Fails on an empty buffer, zero channels, a zero sample rate, or any
    /// NaN/infinite sample.
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Result<Self, WaveformError> {
        if samples.is_empty() {
            return Err(WaveformError::Empty);
        }
        if channels == 0 {
            return Err(WaveformError::NoChannels);
        }
        if sample_rate == 0 {
            return Err(WaveformError::InvalidSampleRate(sample_rate));
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(WaveformError::NonFinite { index });
        }
        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    /// Single-channel waveform.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self, WaveformError> {
        Self::new(samples, 1, sample_rate)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of sample frames (samples per channel).
    pub fn num_frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration_s(&self) -> f64 {
        self.num_frames() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_samples() {
        assert!(matches!(
            Waveform::mono(vec![], 16_000),
            Err(WaveformError::Empty)
        ));
    }

    #[test]
    fn rejects_zero_sample_rate() {
        assert!(matches!(
            Waveform::mono(vec![0.0; 16], 0),
            Err(WaveformError::InvalidSampleRate(0))
        ));
    }

    #[test]
    fn rejects_zero_channels() {
        assert!(matches!(
            Waveform::new(vec![0.0; 16], 0, 16_000),
            Err(WaveformError::NoChannels)
        ));
    }

    #[test]
    fn rejects_non_finite_samples() {
        let mut samples = vec![0.1f32; 8];
        samples[5] = f32::NAN;
        assert!(matches!(
            Waveform::mono(samples, 16_000),
            Err(WaveformError::NonFinite { index: 5 })
        ));
    }

    #[test]
    fn duration_counts_frames_not_samples() {
        // 32000 interleaved stereo samples = 16000 frames = 1s at 16kHz.
        let wave = Waveform::new(vec![0.0; 32_000], 2, 16_000).unwrap();
        assert_eq!(wave.num_frames(), 16_000);
        assert!((wave.duration_s() - 1.0).abs() < 1e-9);
    }
}
