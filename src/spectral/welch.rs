//! Welch averaged-periodogram period estimator.
//!
//! # Method
//!
//! The detrended depth series is split into segments of
//! ```text
//! nperseg = ⌊sr/4 + sr/8⌋
//! ```
//! samples (about 3/8 of the burst; 384 for a 1024-sample burst) that
//! overlap by half. Each segment has its mean removed, is tapered with a
//! periodic Hann window and transformed. The one-sided periodograms are
//! averaged into a power spectral density (m²/Hz) and the frequency of
//! largest power is the peak frequency f_p, with T = 1 / f_p.
//!
//! Averaging suppresses single-bin noise spikes, which makes this the
//! estimator of choice for field bursts.

use num_complex::Complex64;
use rustfft::FftPlanner;

use super::{EstimatorInput, PeriodEstimate, PeriodEstimator, SpectralDiagnostics};
use super::{argmax, window::hann_periodic};
use crate::error::BurstError;

/// One-sided power spectral density from Welch's method.
#[derive(Clone, Debug)]
pub struct WelchSpectrum {
    /// Frequencies 0 ..= fs/2 (Hz).
    pub frequencies: Vec<f64>,
    /// Power spectral density (units² / Hz).
    pub power: Vec<f64>,
    /// Samples per segment.
    pub segment_length: usize,
    /// Number of averaged segments.
    pub segments: usize,
    /// Bin index of the peak.
    pub peak_index: usize,
    /// Peak frequency (Hz).
    pub peak_frequency: f64,
    /// Power at the peak.
    pub peak_power: f64,
}

impl WelchSpectrum {
    /// Frequency resolution (Hz).
    pub fn bin_width(&self) -> f64 {
        if self.frequencies.len() > 1 {
            self.frequencies[1]
        } else {
            0.0
        }
    }
}

/// Segment length for a burst of `sample_count` samples: ⌊sr/4 + sr/8⌋.
pub fn segment_length(sample_count: usize) -> usize {
    let sr = sample_count as f64;
    (sr / 4.0 + sr / 8.0).floor() as usize
}

/// Welch's method estimator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WelchEstimator;

impl WelchEstimator {
    /// Compute the Welch PSD of a series sampled at `sampling_frequency`.
    pub fn spectrum(
        &self,
        series: &[f64],
        sampling_frequency: f64,
    ) -> Result<WelchSpectrum, BurstError> {
        let n = series.len();
        let nperseg = segment_length(n);
        if nperseg < 2 {
            return Err(BurstError::EmptySpectrum(format!(
                "{n} samples give a Welch segment of {nperseg}"
            )));
        }

        let noverlap = nperseg / 2;
        let step = nperseg - noverlap;
        let segments = (n - noverlap) / step;

        let window = hann_periodic(nperseg);
        let window_power: f64 = window.iter().map(|w| w * w).sum();
        let scale = 1.0 / (sampling_frequency * window_power);

        let n_bins = nperseg / 2 + 1;
        let fft = FftPlanner::new().plan_fft_forward(nperseg);
        let mut accum = vec![0.0f64; n_bins];
        let mut buffer = vec![Complex64::new(0.0, 0.0); nperseg];

        for seg in 0..segments {
            let segment = &series[seg * step..seg * step + nperseg];
            let seg_mean = segment.iter().sum::<f64>() / nperseg as f64;

            for ((b, &x), &w) in buffer.iter_mut().zip(segment).zip(&window) {
                *b = Complex64::new((x - seg_mean) * w, 0.0);
            }
            fft.process(&mut buffer);

            for (acc, c) in accum.iter_mut().zip(&buffer[..n_bins]) {
                *acc += c.norm_sqr();
            }
        }

        // One-sided: double everything but DC (and Nyquist for even lengths)
        let doubled_end = if nperseg % 2 == 0 { n_bins - 1 } else { n_bins };
        let power: Vec<f64> = accum
            .iter()
            .enumerate()
            .map(|(k, &p)| {
                let one_sided = if k > 0 && k < doubled_end { 2.0 } else { 1.0 };
                p * scale * one_sided / segments as f64
            })
            .collect();

        let frequencies: Vec<f64> = (0..n_bins)
            .map(|k| k as f64 * sampling_frequency / nperseg as f64)
            .collect();

        let peak_index = argmax(&power);
        let peak_power = power[peak_index];
        if !(peak_power > 0.0) {
            return Err(BurstError::EmptySpectrum("no spectral energy".into()));
        }
        if peak_index == 0 {
            return Err(BurstError::EmptySpectrum(
                "spectral peak at zero frequency".into(),
            ));
        }

        Ok(WelchSpectrum {
            peak_frequency: frequencies[peak_index],
            frequencies,
            power,
            segment_length: nperseg,
            segments,
            peak_index,
            peak_power,
        })
    }
}

impl PeriodEstimator for WelchEstimator {
    fn estimate(&self, input: &EstimatorInput<'_>) -> Result<PeriodEstimate, BurstError> {
        let spectrum = self.spectrum(input.depth_detrended, input.sampling_frequency)?;
        Ok(PeriodEstimate {
            period: 1.0 / spectrum.peak_frequency,
            diagnostics: SpectralDiagnostics::Welch(spectrum),
        })
    }

    fn name(&self) -> &'static str {
        "welch"
    }
}
