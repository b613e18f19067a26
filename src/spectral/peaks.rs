//! Crest-counting period estimator.
//!
//! Crests are local maxima of the depth series that rise above the series
//! mean and are at least `min_distance` samples from a taller crest. The
//! mean spacing between consecutive crests (in samples, rounded to two
//! decimals) converts to a period through the burst duration:
//!
//! ```text
//! T = spacing / sr · duration
//! ```
//!
//! which is spacing / f_s when the timestamps are evenly spaced.

use serde::Deserialize;

use super::{EstimatorInput, PeriodEstimate, PeriodEstimator, SpectralDiagnostics};
use crate::analysis::mean;
use crate::constants::{DEFAULT_PEAK_MIN_DISTANCE, round_to};
use crate::error::{BurstError, require_finite};

/// Which depth series the crest search runs on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeakInput {
    /// Hydrostatic depth before detrending.
    #[default]
    Raw,
    /// Linearly detrended depth.
    Detrended,
}

/// Crests found in a burst.
#[derive(Clone, Debug)]
pub struct PeakDetection {
    /// Sample indices of the crests, ascending.
    pub indices: Vec<usize>,
    /// Height a crest had to exceed (series mean).
    pub threshold: f64,
    /// Mean crest spacing in samples, rounded to two decimals.
    pub mean_spacing: f64,
    /// Series that was searched.
    pub input: PeakInput,
}

/// Indices of local maxima of `y` above `threshold`, thinned so no two
/// are closer than `min_distance` samples (taller crests win).
///
/// Flat runs are split at their median: the left half takes the slope
/// entering the run and the right half the slope leaving it, so a flat
/// crest reports a single index near its centre.
pub fn find_peaks(y: &[f64], threshold: f64, min_distance: usize) -> Vec<usize> {
    let n = y.len();
    if n < 3 {
        return Vec::new();
    }

    let mut dy: Vec<f64> = y.windows(2).map(|w| w[1] - w[0]).collect();
    fill_plateaus(&mut dy);
    if dy.iter().all(|&d| d == 0.0) {
        return Vec::new();
    }

    let mut peaks: Vec<usize> = (1..n - 1)
        .filter(|&i| dy[i] < 0.0 && dy[i - 1] > 0.0 && y[i] > threshold)
        .collect();

    if peaks.len() > 1 && min_distance > 1 {
        peaks = suppress_close_peaks(y, &peaks, min_distance);
    }
    peaks
}

/// Replace zero slopes with the neighbouring non-zero slope.
fn fill_plateaus(dy: &mut [f64]) {
    let len = dy.len();
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i < len {
        if dy[i] == 0.0 {
            let start = i;
            while i < len && dy[i] == 0.0 {
                i += 1;
            }
            runs.push((start, i - 1));
        } else {
            i += 1;
        }
    }

    // Entirely flat
    if runs.len() == 1 && runs[0] == (0, len - 1) {
        return;
    }

    for (start, end) in runs {
        if start == 0 {
            let fill = dy[end + 1];
            dy[start..=end].fill(fill);
        } else if end == len - 1 {
            let fill = dy[start - 1];
            dy[start..=end].fill(fill);
        } else {
            let before = dy[start - 1];
            let after = dy[end + 1];
            let median = (start + end) as f64 / 2.0;
            for (k, d) in dy.iter_mut().enumerate().take(end + 1).skip(start) {
                *d = if (k as f64) < median { before } else { after };
            }
        }
    }
}

/// Keep the tallest crest in every `min_distance` neighbourhood.
fn suppress_close_peaks(y: &[f64], peaks: &[usize], min_distance: usize) -> Vec<usize> {
    let mut by_height = peaks.to_vec();
    by_height.sort_by(|&a, &b| y[a].total_cmp(&y[b]));
    by_height.reverse();

    let mut removed = vec![true; y.len()];
    for &p in peaks {
        removed[p] = false;
    }
    for &p in &by_height {
        if !removed[p] {
            let lo = p.saturating_sub(min_distance);
            let hi = (p + min_distance + 1).min(y.len());
            removed[lo..hi].fill(true);
            removed[p] = false;
        }
    }

    (0..y.len()).filter(|&i| !removed[i]).collect()
}

/// Crest-counting estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeakCountingEstimator {
    /// Minimum separation between crests (samples).
    pub min_distance: usize,
    /// Which depth series is searched.
    pub input: PeakInput,
}

impl Default for PeakCountingEstimator {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_PEAK_MIN_DISTANCE,
            input: PeakInput::Raw,
        }
    }
}

impl PeakCountingEstimator {
    /// Create an estimator with the given crest separation and input series.
    pub fn new(min_distance: usize, input: PeakInput) -> Self {
        Self {
            min_distance,
            input,
        }
    }

    /// Find the crests of a series and their mean spacing.
    pub fn detect(&self, series: &[f64]) -> Result<PeakDetection, BurstError> {
        let threshold = mean(series).ok_or(BurstError::EmptySeries {
            column: "hydro_depth",
        })?;
        let indices = find_peaks(series, threshold, self.min_distance);
        if indices.len() < 2 {
            return Err(BurstError::TooFewPeaks {
                found: indices.len(),
            });
        }

        let gaps = indices.windows(2).map(|w| (w[1] - w[0]) as f64);
        let mean_gap = gaps.sum::<f64>() / (indices.len() - 1) as f64;

        Ok(PeakDetection {
            indices,
            threshold,
            mean_spacing: round_to(mean_gap, 2),
            input: self.input,
        })
    }
}

impl PeriodEstimator for PeakCountingEstimator {
    fn estimate(&self, input: &EstimatorInput<'_>) -> Result<PeriodEstimate, BurstError> {
        let series = match self.input {
            PeakInput::Raw => input.depth,
            PeakInput::Detrended => input.depth_detrended,
        };
        let detection = self.detect(series)?;

        let period = detection.mean_spacing / input.sample_count() as f64 * input.duration;
        let period = require_finite("period", period)?;
        if period <= 0.0 {
            return Err(BurstError::NonPhysicalResult {
                quantity: "period",
                value: period,
            });
        }

        Ok(PeriodEstimate {
            period,
            diagnostics: SpectralDiagnostics::Peaks(detection),
        })
    }

    fn name(&self) -> &'static str {
        "peaks"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_simple_peaks() {
        let y = [0.0, 1.0, 0.0, 2.0, 0.0, 1.5, 0.0];
        assert_eq!(find_peaks(&y, 0.5, 1), vec![1, 3, 5]);
        // Threshold excludes the low crest
        assert_eq!(find_peaks(&y, 1.2, 1), vec![3, 5]);
    }

    #[test]
    fn test_endpoints_are_not_peaks() {
        let y = [3.0, 1.0, 2.0, 1.0, 4.0];
        assert_eq!(find_peaks(&y, 0.0, 1), vec![2]);
    }

    #[test]
    fn test_plateau_reports_centre() {
        // Odd-length plateau: indices 2..=4 flat, median split puts the crest at 3
        let y = [0.0, 1.0, 2.0, 2.0, 2.0, 1.0, 0.0];
        assert_eq!(find_peaks(&y, 0.5, 1), vec![3]);

        // Even-length plateau of two samples
        let y = [0.0, 1.0, 2.0, 2.0, 1.0, 0.0];
        assert_eq!(find_peaks(&y, 0.5, 1), vec![2]);
    }

    #[test]
    fn test_flat_series() {
        assert!(find_peaks(&[1.0; 20], 0.0, 1).is_empty());
        assert!(find_peaks(&[1.0, 2.0], 0.0, 1).is_empty());
    }

    #[test]
    fn test_min_distance_keeps_tallest() {
        let y = [0.0, 1.0, 0.0, 3.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        assert_eq!(find_peaks(&y, 0.5, 1), vec![1, 3, 5, 10]);
        assert_eq!(find_peaks(&y, 0.5, 3), vec![3, 10]);
    }

    #[test]
    fn test_detect_spacing() {
        // 48-sample wavelength for 480 samples
        let y: Vec<f64> = (0..480)
            .map(|i| (2.0 * PI * i as f64 / 48.0).sin())
            .collect();
        let detection = PeakCountingEstimator::default().detect(&y).unwrap();
        assert_eq!(detection.indices.len(), 10);
        assert!((detection.mean_spacing - 48.0).abs() < 1e-12);
        assert!(detection.threshold.abs() < 1e-9);
    }

    #[test]
    fn test_too_few_peaks() {
        let y: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let err = PeakCountingEstimator::default().detect(&y).unwrap_err();
        assert!(matches!(err, BurstError::TooFewPeaks { found: 0 }));
    }

    #[test]
    fn test_estimate_uses_duration() {
        let y: Vec<f64> = (0..480)
            .map(|i| 5.0 + 0.5 * (2.0 * PI * i as f64 / 48.0).sin())
            .collect();
        let input = EstimatorInput {
            depth: &y,
            depth_detrended: &y,
            sampling_frequency: 6.0,
            duration: 80.0,
        };
        let estimate = PeakCountingEstimator::default().estimate(&input).unwrap();
        // 48 / 480 · 80 s
        assert!((estimate.period - 8.0).abs() < 1e-9);
        assert!(matches!(estimate.diagnostics, SpectralDiagnostics::Peaks(_)));
    }
}
