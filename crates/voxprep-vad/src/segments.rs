/// Half-open run of speech frames `[start, end)` within a frame-energy
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechSegment {
    pub start: usize,
    pub end: usize,
}

impl SpeechSegment {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Scan the per-frame speech mask for maximal runs, drop runs shorter than
/// `min_frames`, and pad survivors by `padding_frames` on both sides,
/// clamped to the mask bounds. Padded runs may overlap; see [`merge`].
pub fn detect(speech: &[bool], min_frames: usize, padding_frames: usize) -> Vec<SpeechSegment> {
    let mut segments = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &is_speech) in speech.iter().enumerate() {
        match (is_speech, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                if i - start >= min_frames {
                    segments.push(SpeechSegment {
                        start: start.saturating_sub(padding_frames),
                        end: (i + padding_frames).min(speech.len()),
                    });
                }
                run_start = None;
            }
            _ => {}
        }
    }

    // A run still open at the end of the mask gets no trailing padding;
    // there is nothing past the last frame to pad into.
    if let Some(start) = run_start {
        if speech.len() - start >= min_frames {
            segments.push(SpeechSegment {
                start: start.saturating_sub(padding_frames),
                end: speech.len(),
            });
        }
    }

    segments
}

/// Union overlapping or adjacent segments, sorted by start.
pub fn merge(mut segments: Vec<SpeechSegment>) -> Vec<SpeechSegment> {
    segments.sort_by_key(|s| s.start);
    let mut merged: Vec<SpeechSegment> = Vec::with_capacity(segments.len());
    for segment in segments {
        match merged.last_mut() {
            Some(last) if segment.start <= last.end => last.end = last.end.max(segment.end),
            _ => merged.push(segment),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(runs: &[(bool, usize)]) -> Vec<bool> {
        runs.iter()
            .flat_map(|&(value, count)| std::iter::repeat(value).take(count))
            .collect()
    }

    #[test]
    fn short_runs_are_dropped() {
        let speech = mask(&[(false, 10), (true, 3), (false, 10)]);
        assert!(detect(&speech, 5, 2).is_empty());
    }

    #[test]
    fn kept_run_is_padded_and_clamped() {
        let speech = mask(&[(false, 1), (true, 10), (false, 20)]);
        let segments = detect(&speech, 5, 4);
        assert_eq!(segments, vec![SpeechSegment { start: 0, end: 15 }]);
    }

    #[test]
    fn trailing_run_is_kept_without_end_padding() {
        let speech = mask(&[(false, 10), (true, 8)]);
        let segments = detect(&speech, 5, 3);
        assert_eq!(segments, vec![SpeechSegment { start: 7, end: 18 }]);
    }

    #[test]
    fn merge_unions_overlapping_padded_runs() {
        let segments = vec![
            SpeechSegment { start: 0, end: 10 },
            SpeechSegment { start: 8, end: 15 },
            SpeechSegment { start: 20, end: 25 },
        ];
        assert_eq!(
            merge(segments),
            vec![
                SpeechSegment { start: 0, end: 15 },
                SpeechSegment { start: 20, end: 25 },
            ]
        );
    }

    #[test]
    fn merge_joins_exactly_adjacent_runs() {
        let segments = vec![
            SpeechSegment { start: 5, end: 10 },
            SpeechSegment { start: 10, end: 12 },
        ];
        assert_eq!(merge(segments), vec![SpeechSegment { start: 5, end: 12 }]);
    }
}
