//! Signal-conditioning stages for the preprocessing pipeline.
//!
//! Each stage is a pure transform: it borrows a [`Waveform`], returns a
//! freshly allocated one, and never blocks on I/O. The only shared state in
//! this crate is the [`FilterBank`] coefficient cache.
//!
//! [`Waveform`]: voxprep_foundation::Waveform

pub mod emphasis;
pub mod filter;
pub mod normalize;
pub mod resampler;

pub use emphasis::pre_emphasis;
pub use filter::{apply_bandpass, FilterBank, FilterCoefficients};
pub use normalize::normalize_peak;
pub use resampler::{mix_to_mono, resample_to};
