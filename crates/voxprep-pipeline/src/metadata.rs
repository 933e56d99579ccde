use serde::Serialize;

pub use voxprep_vad::VadStats;

/// Stage tags, in the order the stages run.
pub mod tags {
    pub const RESAMPLE_16K: &str = "resample_16k";
    pub const MONO_CONVERSION: &str = "mono_conversion";
    pub const PRE_EMPHASIS: &str = "pre_emphasis";
    pub const VAD: &str = "vad";
    pub const AMPLITUDE_NORMALIZATION: &str = "amplitude_normalization";

    /// Bandpass tag carries the configured cutoffs, e.g.
    /// `bandpass_80.0_7500.0Hz`. Debug formatting keeps the decimal point on
    /// whole-number cutoffs, so the tag is stable for string-matching
    /// consumers.
    pub fn bandpass(low_hz: f64, high_hz: f64) -> String {
        format!("bandpass_{low_hz:?}_{high_hz:?}Hz")
    }
}

/// Per-run record of what the pipeline did to a waveform. Built once per
/// invocation and handed to the caller alongside the cleaned audio.
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessMetadata {
    pub original_duration_s: f64,
    pub original_sample_rate: u32,
    /// Ordered tags of the stages that actually ran.
    pub preprocessing_applied: Vec<String>,
    /// Present only when VAD ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vad_stats: Option<VadStats>,
    pub final_duration_s: f64,
    /// Percent of audio removed end to end, rounded to one decimal.
    pub duration_reduction_pct: f64,
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bandpass_tag_formats_cutoffs() {
        assert_eq!(tags::bandpass(80.0, 7500.0), "bandpass_80.0_7500.0Hz");
        assert_eq!(tags::bandpass(120.5, 6000.0), "bandpass_120.5_6000.0Hz");
    }

    #[test]
    fn vad_stats_are_omitted_from_json_when_absent() {
        let metadata = PreprocessMetadata {
            original_duration_s: 3.0,
            original_sample_rate: 44_100,
            preprocessing_applied: vec![tags::RESAMPLE_16K.to_string()],
            vad_stats: None,
            final_duration_s: 3.0,
            duration_reduction_pct: 0.0,
        };
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(!json.contains("vad_stats"));
    }

    #[test]
    fn rounding_to_one_decimal() {
        assert_eq!(round1(33.333), 33.3);
        assert_eq!(round1(66.66), 66.7);
        assert_eq!(round1(0.0), 0.0);
    }
}
