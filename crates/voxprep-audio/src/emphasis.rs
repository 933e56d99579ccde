use voxprep_foundation::{AudioError, Waveform};

/// First-order pre-emphasis: `out[0] = in[0]`,
/// `out[n] = in[n] - coef * in[n-1]`.
///
/// Boosts high-frequency energy (consonant clarity) ahead of embedding
/// extraction. Length-preserving, purely elementwise.
pub fn pre_emphasis(input: &Waveform, coef: f32) -> Result<Waveform, AudioError> {
    let samples = input.samples();
    let mut emphasized = Vec::with_capacity(samples.len());
    emphasized.push(samples[0]);
    for pair in samples.windows(2) {
        emphasized.push(pair[1] - coef * pair[0]);
    }
    Ok(Waveform::mono(emphasized, input.sample_rate())?)
}
