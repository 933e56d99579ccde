use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use voxprep_foundation::{AudioError, Waveform};

/// Input block size fed to Rubato per process call.
const CHUNK_SIZE: usize = 512;

/// Mix an interleaved multichannel waveform down to mono by per-frame
/// arithmetic mean. Mono input is returned as-is.
pub fn mix_to_mono(input: &Waveform) -> Result<Waveform, AudioError> {
    let channels = input.channels() as usize;
    if channels == 1 {
        return Ok(input.clone());
    }

    let mixed: Vec<f32> = input
        .samples()
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();

    Ok(Waveform::mono(mixed, input.sample_rate())?)
}

/// Resample a mono waveform to `out_rate` using Rubato's sinc interpolation.
///
/// Offline variant of a streaming resampler: feeds fixed-size chunks,
/// flushes the tail with partial process calls, then trims the filter's
/// output delay so the result lines up with the input and has the expected
/// `ceil(len * out/in)` length. Same-rate input passes through untouched.
pub fn resample_to(input: &Waveform, out_rate: u32) -> Result<Waveform, AudioError> {
    debug_assert_eq!(input.channels(), 1, "resample_to expects mono input");

    let in_rate = input.sample_rate();
    if in_rate == out_rate {
        return Ok(input.clone());
    }

    let ratio = out_rate as f64 / in_rate as f64;
    let params = SincInterpolationParameters {
        sinc_len: 128,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };
    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, CHUNK_SIZE, 1)
        .map_err(|e| AudioError::Resample(e.to_string()))?;

    let samples = input.samples();
    let delay = resampler.output_delay();
    let expected = (samples.len() as f64 * ratio).ceil() as usize;

    let mut output: Vec<f32> = Vec::with_capacity(expected + delay);
    let mut pos = 0;
    while samples.len() - pos >= CHUNK_SIZE {
        let chunk = vec![samples[pos..pos + CHUNK_SIZE].to_vec()];
        let frames = resampler
            .process(&chunk, None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        output.extend_from_slice(&frames[0]);
        pos += CHUNK_SIZE;
    }

    // Flush the remainder, then keep draining until the delayed tail of the
    // real signal has come out of the sinc filter.
    if pos < samples.len() {
        let tail = vec![samples[pos..].to_vec()];
        let frames = resampler
            .process_partial(Some(tail.as_slice()), None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        output.extend_from_slice(&frames[0]);
    }
    while output.len() < delay + expected {
        let frames = resampler
            .process_partial::<Vec<f32>>(None, None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        if frames[0].is_empty() {
            break;
        }
        output.extend_from_slice(&frames[0]);
    }

    let start = delay.min(output.len());
    let end = (delay + expected).min(output.len());
    Ok(Waveform::mono(output[start..end].to_vec(), out_rate)?)
}
