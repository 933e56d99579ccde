/// Concatenate extracted speech segments, joining each adjacent pair with a
/// linear crossfade to avoid audible clicks at the splice points.
///
/// Implemented as a left-to-right fold: each step exclusively owns the
/// accumulated buffer, fades its tail out, fades the next segment's head in,
/// and sums the overlap. Joins where either side is shorter than the
/// crossfade window are butted together without fading.
pub fn crossfade_concat(segments: &[&[f32]], crossfade_samples: usize) -> Vec<f32> {
    let mut iter = segments.iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    iter.fold(first.to_vec(), |mut acc, &segment| {
        if crossfade_samples >= 2
            && acc.len() >= crossfade_samples
            && segment.len() >= crossfade_samples
        {
            let tail = acc.len() - crossfade_samples;
            let last = (crossfade_samples - 1) as f32;
            for (k, sample) in acc[tail..].iter_mut().enumerate() {
                let fade_in = k as f32 / last;
                *sample = *sample * (1.0 - fade_in) + segment[k] * fade_in;
            }
            acc.extend_from_slice(&segment[crossfade_samples..]);
        } else {
            acc.extend_from_slice(segment);
        }
        acc
    })
}
