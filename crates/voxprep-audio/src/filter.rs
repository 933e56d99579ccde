//! Butterworth bandpass design, coefficient caching, and zero-phase
//! application.
//!
//! The designer follows the classic recipe: analog lowpass prototype poles,
//! lowpass-to-bandpass transform, bilinear transform with prewarped band
//! edges, then polynomial expansion to `(b, a)` transfer-function
//! coefficients. All design math runs in `f64` complex arithmetic.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::Arc;

use num_complex::Complex64;
use parking_lot::Mutex;

use voxprep_foundation::{AudioError, Waveform};

/// Numerator/denominator coefficients of a designed IIR filter, highest
/// delay last (`b[0] + b[1] z^-1 + ...`). Immutable once built; shared
/// across concurrent runs through the [`FilterBank`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}

/// Cache key. Cutoffs are keyed by their bit patterns so the map can hash
/// them; the cutoffs are plain config floats, never NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FilterKey {
    sample_rate: u32,
    low_bits: u64,
    high_bits: u64,
    order: usize,
}

/// Memoized filter designs, shared across pipeline runs.
///
/// Entries are immutable after insert, so a plain mutex-guarded map is
/// enough; a duplicate design race for the same key would only waste work.
#[derive(Debug, Default)]
pub struct FilterBank {
    cache: Mutex<HashMap<FilterKey, Arc<FilterCoefficients>>>,
}

impl FilterBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coefficients for a Butterworth bandpass, designed on first use and
    /// cached by `(sample_rate, low_hz, high_hz, order)`.
    pub fn bandpass(
        &self,
        sample_rate: u32,
        low_hz: f64,
        high_hz: f64,
        order: usize,
    ) -> Arc<FilterCoefficients> {
        let key = FilterKey {
            sample_rate,
            low_bits: low_hz.to_bits(),
            high_bits: high_hz.to_bits(),
            order,
        };
        let mut cache = self.cache.lock();
        cache
            .entry(key)
            .or_insert_with(|| {
                let (low, high) = clamp_normalized_cutoffs(sample_rate, low_hz, high_hz);
                tracing::debug!(
                    sample_rate,
                    low_norm = low,
                    high_norm = high,
                    order,
                    "designing bandpass filter"
                );
                Arc::new(design_bandpass(order, low, high))
            })
            .clone()
    }
}

/// Normalize cutoffs by Nyquist and clamp them into the designer's stable
/// range. The clamp guarantees `low < high`, so design never fails on
/// degenerate configuration instead of surfacing an error.
pub fn clamp_normalized_cutoffs(sample_rate: u32, low_hz: f64, high_hz: f64) -> (f64, f64) {
    let nyquist = sample_rate as f64 / 2.0;
    let low = (low_hz / nyquist).clamp(0.001, 0.99);
    let high = (high_hz / nyquist).min(0.99).max(low + 0.01);
    (low, high)
}

/// Design a Butterworth bandpass on normalized cutoffs (fractions of
/// Nyquist, both in (0, 1)). Returns `2 * order + 1` coefficients per side,
/// denominator normalized to `a[0] = 1`.
fn design_bandpass(order: usize, low: f64, high: f64) -> FilterCoefficients {
    // Prewarp the band edges for the bilinear transform (fs = 2).
    let fs = 2.0;
    let w1 = 2.0 * fs * (PI * low / fs).tan();
    let w2 = 2.0 * fs * (PI * high / fs).tan();
    let bw = w2 - w1;
    let w0 = (w1 * w2).sqrt();

    // Analog Butterworth prototype: `order` poles evenly spaced on the unit
    // circle's left half-plane, no zeros, unity gain.
    let prototype: Vec<Complex64> = (1..=order)
        .map(|k| {
            let theta = PI * (2.0 * k as f64 + order as f64 - 1.0) / (2.0 * order as f64);
            Complex64::from_polar(1.0, theta)
        })
        .collect();

    // Lowpass-to-bandpass: each prototype pole splits into a conjugate pair
    // around the center frequency; `order` zeros appear at the origin.
    let mut poles = Vec::with_capacity(2 * order);
    for &p in &prototype {
        let scaled = p * (bw / 2.0);
        let offset = (scaled * scaled - Complex64::new(w0 * w0, 0.0)).sqrt();
        poles.push(scaled + offset);
        poles.push(scaled - offset);
    }
    let mut gain = bw.powi(order as i32);

    // Bilinear transform. The analog zeros at the origin map to z = +1; the
    // `order` excess poles contribute zeros at z = -1.
    let fs2 = Complex64::new(2.0 * fs, 0.0);
    let mut num = Complex64::new(1.0, 0.0);
    let mut den = Complex64::new(1.0, 0.0);
    for _ in 0..order {
        num *= fs2;
    }
    for &p in &poles {
        den *= fs2 - p;
    }
    gain *= (num / den).re;

    let z_poles: Vec<Complex64> = poles.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();
    let mut z_zeros = vec![Complex64::new(1.0, 0.0); order];
    z_zeros.extend(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(order));

    let b = poly(&z_zeros).iter().map(|&c| (c * gain).re).collect();
    let a = poly(&z_poles).iter().map(|&c| c.re).collect();
    FilterCoefficients { b, a }
}

/// Expand a monic polynomial from its roots; coefficients highest power
/// first. Complex roots arrive in conjugate pairs, so the caller takes the
/// real parts.
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let lower = coeffs[i - 1];
            coeffs[i] -= root * lower;
        }
    }
    coeffs
}

/// Pad `b`/`a` to a common length and normalize so `a[0] = 1`.
fn normalize_coeffs(b: &[f64], a: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = b.len().max(a.len());
    let a0 = a[0];
    let bn = (0..n).map(|i| b.get(i).copied().unwrap_or(0.0) / a0).collect();
    let an = (0..n).map(|i| a.get(i).copied().unwrap_or(0.0) / a0).collect();
    (bn, an)
}

/// Direct-form-II-transposed IIR filter pass.
///
/// `initial_state` seeds the delay line (length `len(coeffs) - 1`); pass
/// zeros for a cold start.
fn lfilter(b: &[f64], a: &[f64], input: &[f64], initial_state: &[f64]) -> Vec<f64> {
    let (bn, an) = normalize_coeffs(b, a);
    let n = bn.len();

    // A single-coefficient filter (order zero) is a pure gain with no
    // delay line.
    if n == 1 {
        return input.iter().map(|&x| bn[0] * x).collect();
    }

    let mut state = initial_state.to_vec();
    let mut output = Vec::with_capacity(input.len());
    for &x in input {
        let y = bn[0] * x + state[0];
        for i in 1..n - 1 {
            state[i - 1] = bn[i] * x + state[i] - an[i] * y;
        }
        state[n - 2] = bn[n - 1] * x - an[n - 1] * y;
        output.push(y);
    }
    output
}

/// Initial delay-line state that puts the filter's step response at steady
/// state from the first sample (transposed direct form II). Scaled by the
/// first input sample, this suppresses the start-up transient that would
/// otherwise bleed into the zero-phase output.
fn lfilter_zi(b: &[f64], a: &[f64]) -> Vec<f64> {
    let (bn, an) = normalize_coeffs(b, a);
    let m = bn.len() - 1;

    // Solve (I - A^T) zi = B with A the companion matrix of `a`:
    // column 0 carries a[1..], the superdiagonal is -1, the diagonal 1.
    let mut matrix = vec![vec![0.0f64; m]; m];
    for i in 0..m {
        matrix[i][0] += an[i + 1];
        matrix[i][i] += 1.0;
        if i + 1 < m {
            matrix[i][i + 1] = -1.0;
        }
    }
    let rhs: Vec<f64> = (0..m).map(|i| bn[i + 1] - an[i + 1] * bn[0]).collect();
    solve(matrix, rhs)
}

/// Gaussian elimination with partial pivoting, sized for the filter's state
/// dimension (2 * order unknowns).
fn solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Vec<f64> {
    let n = rhs.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| matrix[i][col].abs().total_cmp(&matrix[j][col].abs()))
            .unwrap_or(col);
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);

        let diag = matrix[col][col];
        for row in col + 1..n {
            let factor = matrix[row][col] / diag;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                let head = matrix[col][k];
                matrix[row][k] -= factor * head;
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut x = vec![0.0f64; n];
    for row in (0..n).rev() {
        let mut acc = rhs[row];
        for k in row + 1..n {
            acc -= matrix[row][k] * x[k];
        }
        x[row] = acc / matrix[row][row];
    }
    x
}

/// Zero-phase filtering: one forward pass, one pass over the reversed
/// signal. Cancelling the phase response keeps transient cues aligned for
/// the embedding model.
///
/// The signal is extended at both ends by odd reflection (up to
/// `3 * len(coeffs)` samples) and each pass starts from steady-state initial
/// conditions, so edge transients stay out of the real samples. Output
/// length equals input length.
pub fn filtfilt(coeffs: &FilterCoefficients, input: &[f32]) -> Vec<f32> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }
    let pad = (3 * coeffs.b.len().max(coeffs.a.len())).min(n - 1);

    let mut extended = Vec::with_capacity(n + 2 * pad);
    let first = input[0] as f64;
    for i in (1..=pad).rev() {
        extended.push(2.0 * first - input[i] as f64);
    }
    extended.extend(input.iter().map(|&s| s as f64));
    let last = input[n - 1] as f64;
    for i in 1..=pad {
        extended.push(2.0 * last - input[n - 1 - i] as f64);
    }

    let zi = lfilter_zi(&coeffs.b, &coeffs.a);
    let seed = |x0: f64| zi.iter().map(|&z| z * x0).collect::<Vec<_>>();

    let mut forward = lfilter(&coeffs.b, &coeffs.a, &extended, &seed(extended[0]));
    forward.reverse();
    let mut backward = lfilter(&coeffs.b, &coeffs.a, &forward, &seed(forward[0]));
    backward.reverse();

    backward[pad..pad + n].iter().map(|&s| s as f32).collect()
}

/// Apply a zero-phase Butterworth bandpass to a mono waveform, designing or
/// reusing coefficients from the shared bank.
pub fn apply_bandpass(
    bank: &FilterBank,
    input: &Waveform,
    low_hz: f64,
    high_hz: f64,
    order: usize,
) -> Result<Waveform, AudioError> {
    let coeffs = bank.bandpass(input.sample_rate(), low_hz, high_hz, order);
    let filtered = filtfilt(&coeffs, input.samples());
    Ok(Waveform::mono(filtered, input.sample_rate())?)
}
