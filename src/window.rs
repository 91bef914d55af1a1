//! Token window splitting
//!
//! Divides a token sequence into overlapping fixed-size windows so that each
//! window fits the model's input budget while the overlap preserves context
//! across window boundaries.

use crate::error::SummarizeError;

/// A contiguous slice of a token sequence, processed as one summarization unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split a token sequence into ordered overlapping windows.
///
/// Sequences that fit in one window produce a single window covering the
/// whole sequence. Otherwise windows advance by `window_size - stride`
/// tokens per step; each has length `window_size` except the last, which is
/// clipped to the remaining tokens. Every token is covered by at least one
/// window.
pub fn split(
    tokens: &[u32],
    window_size: usize,
    stride: usize,
) -> Result<Vec<Window>, SummarizeError> {
    if window_size == 0 || stride == 0 {
        return Err(SummarizeError::Configuration(format!(
            "window_size ({window_size}) and stride ({stride}) must be positive"
        )));
    }
    if stride >= window_size {
        return Err(SummarizeError::Configuration(format!(
            "stride ({stride}) must be smaller than window_size ({window_size})"
        )));
    }

    let len = tokens.len();
    if len <= window_size {
        return Ok(vec![Window { start: 0, end: len }]);
    }

    let step = window_size - stride;
    let mut windows = Vec::with_capacity(len / step + 1);
    let mut start = 0;
    while start + window_size < len {
        windows.push(Window {
            start,
            end: start + window_size,
        });
        start += step;
    }
    // Final window, clipped to the remaining tokens.
    windows.push(Window { start, end: len });

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(len: usize) -> Vec<u32> {
        (0..len as u32).collect()
    }

    #[test]
    fn test_short_sequence_single_window() {
        let windows = split(&tokens(100), 900, 50).unwrap();
        assert_eq!(windows, vec![Window { start: 0, end: 100 }]);

        // Exactly at the window size is still a single window.
        let windows = split(&tokens(900), 900, 50).unwrap();
        assert_eq!(windows, vec![Window { start: 0, end: 900 }]);
    }

    #[test]
    fn test_long_sequence_overlapping_windows() {
        let windows = split(&tokens(2000), 900, 50).unwrap();
        assert_eq!(
            windows,
            vec![
                Window { start: 0, end: 900 },
                Window { start: 850, end: 1750 },
                Window { start: 1700, end: 2000 },
            ]
        );
    }

    #[test]
    fn test_spec_example_two_windows() {
        // ~1200-token document with window 1000 / stride 50 splits in two.
        let windows = split(&tokens(1200), 1000, 50).unwrap();
        assert_eq!(
            windows,
            vec![
                Window { start: 0, end: 1000 },
                Window { start: 950, end: 1200 },
            ]
        );
    }

    #[test]
    fn test_window_count_formula() {
        let (window_size, stride) = (100, 10);
        let step = window_size - stride;
        for len in [101, 150, 190, 191, 500, 1234, 9999] {
            let windows = split(&tokens(len), window_size, stride).unwrap();
            let expected = (len - stride).div_ceil(step);
            assert_eq!(windows.len(), expected, "len={len}");
        }
    }

    #[test]
    fn test_every_token_covered() {
        for len in [1, 99, 100, 101, 777, 5000] {
            let windows = split(&tokens(len), 100, 20).unwrap();
            assert_eq!(windows[0].start, 0);
            assert_eq!(windows.last().unwrap().end, len);
            for pair in windows.windows(2) {
                // Consecutive windows overlap by exactly the stride.
                assert_eq!(pair[1].start, pair[0].end - 20);
            }
        }
    }

    #[test]
    fn test_no_window_exceeds_size() {
        let windows = split(&tokens(4321), 100, 30).unwrap();
        assert!(windows.iter().all(|w| w.len() <= 100 && !w.is_empty()));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let err = split(&tokens(10), 100, 100).unwrap_err();
        assert!(matches!(err, SummarizeError::Configuration(_)));

        let err = split(&tokens(10), 100, 200).unwrap_err();
        assert!(matches!(err, SummarizeError::Configuration(_)));

        let err = split(&tokens(10), 0, 10).unwrap_err();
        assert!(matches!(err, SummarizeError::Configuration(_)));

        let err = split(&tokens(10), 100, 0).unwrap_err();
        assert!(matches!(err, SummarizeError::Configuration(_)));
    }
}
