use voxprep_foundation::{AudioError, Waveform};

/// Scale a waveform so its absolute peak sits at `target_db` dBFS.
///
/// Silence (zero peak) is returned unchanged; scaling it would divide by
/// zero and normalizing silence is a no-op by definition.
pub fn normalize_peak(input: &Waveform, target_db: f64) -> Result<Waveform, AudioError> {
    let peak = input.samples().iter().fold(0.0f32, |max, &s| max.max(s.abs()));
    if peak == 0.0 {
        return Ok(input.clone());
    }

    let target_amplitude = 10f64.powf(target_db / 20.0) as f32;
    let scale = target_amplitude / peak;
    let scaled = input.samples().iter().map(|&s| s * scale).collect();
    Ok(Waveform::mono(scaled, input.sample_rate())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0f32, |max, &s| max.max(s.abs()))
    }

    #[test]
    fn peak_lands_on_target() {
        let wave = Waveform::mono(vec![0.1, -0.4, 0.25, 0.05], 16_000).unwrap();
        let out = normalize_peak(&wave, -3.0).unwrap();
        // -3 dBFS ~ 0.70795
        assert_abs_diff_eq!(peak(out.samples()), 0.70795, epsilon = 1e-4);
    }

    #[test]
    fn normalization_is_idempotent() {
        let wave = Waveform::mono(vec![0.01, -0.3, 0.2, -0.15], 16_000).unwrap();
        let once = normalize_peak(&wave, -3.0).unwrap();
        let twice = normalize_peak(&once, -3.0).unwrap();
        assert_abs_diff_eq!(peak(once.samples()), peak(twice.samples()), epsilon = 1e-6);
        for (a, b) in once.samples().iter().zip(twice.samples()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        }
    }

    #[test]
    fn silence_is_left_alone() {
        let wave = Waveform::mono(vec![0.0f32; 256], 16_000).unwrap();
        let out = normalize_peak(&wave, -3.0).unwrap();
        assert_eq!(out.samples(), wave.samples());
    }
}
