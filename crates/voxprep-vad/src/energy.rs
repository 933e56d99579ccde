/// Per-frame RMS energy over all complete frames.
///
/// A signal shorter than one frame yields a single zero-energy frame, which
/// downstream detection treats as silence (and therefore fails open).
pub fn frame_energies(samples: &[f32], frame_samples: usize, hop_samples: usize) -> Vec<f32> {
    if samples.len() < frame_samples {
        return vec![0.0];
    }
    let num_frames = (samples.len() - frame_samples) / hop_samples + 1;
    (0..num_frames)
        .map(|i| {
            let start = i * hop_samples;
            let frame = &samples[start..start + frame_samples];
            let mean_square =
                frame.iter().map(|&s| (s as f64) * (s as f64)).sum::<f64>() / frame.len() as f64;
            mean_square.sqrt() as f32
        })
        .collect()
}

/// Normalize energies by the observed maximum (1.0 when everything is
/// silent, avoiding a divide by zero) and smooth with a length-3 centered
/// moving average to suppress single-frame noise spikes. Boundaries are
/// reflected.
pub fn smooth_normalized(energies: &[f32]) -> Vec<f32> {
    let max = energies.iter().fold(0.0f32, |max, &e| max.max(e));
    let max = if max > 0.0 { max } else { 1.0 };
    let n = energies.len();
    (0..n)
        .map(|i| {
            let prev = energies[i.saturating_sub(1)];
            let next = energies[(i + 1).min(n - 1)];
            (prev + energies[i] + next) / (3.0 * max)
        })
        .collect()
}
