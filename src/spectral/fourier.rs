//! FFT peak-picking period estimator.
//!
//! The detrended depth series is tapered with a symmetric Hann window and
//! transformed; the strictly positive frequency bin of largest magnitude is
//! the peak frequency f_p, and T = 1 / f_p.

use num_complex::Complex64;
use rustfft::FftPlanner;

use super::{EstimatorInput, PeriodEstimate, PeriodEstimator, SpectralDiagnostics};
use super::{argmax, window::hann_symmetric};
use crate::error::BurstError;

/// Two-sided DFT of a tapered burst.
#[derive(Clone, Debug)]
pub struct FourierSpectrum {
    /// DFT sample frequencies (Hz) in FFT order: 0, positive, then negative.
    pub frequencies: Vec<f64>,
    /// Complex DFT coefficients of the windowed series.
    pub spectrum: Vec<Complex64>,
    /// |X(f)| for every bin.
    pub magnitude: Vec<f64>,
    /// Bin index of the peak.
    pub peak_index: usize,
    /// Peak frequency (Hz).
    pub peak_frequency: f64,
    /// Magnitude at the peak.
    pub peak_magnitude: f64,
}

impl FourierSpectrum {
    /// Number of strictly positive frequency bins.
    pub fn positive_len(&self) -> usize {
        positive_bins(self.frequencies.len())
    }

    /// Strictly positive frequencies and their magnitudes.
    pub fn positive(&self) -> (&[f64], &[f64]) {
        let end = 1 + self.positive_len();
        (&self.frequencies[1..end], &self.magnitude[1..end])
    }

    /// Frequency resolution (Hz).
    pub fn bin_width(&self) -> f64 {
        if self.frequencies.len() > 1 {
            self.frequencies[1]
        } else {
            0.0
        }
    }

    /// Inverse DFT keeping only components at or below the peak frequency.
    ///
    /// Shows the wave signal the peak describes against the detrended depth.
    pub fn lowpass_reconstruction(&self) -> Vec<f64> {
        let n = self.spectrum.len();
        let mut buffer: Vec<Complex64> = self
            .spectrum
            .iter()
            .zip(&self.frequencies)
            .map(|(&c, &f)| {
                if f.abs() > self.peak_frequency {
                    Complex64::new(0.0, 0.0)
                } else {
                    c
                }
            })
            .collect();

        let mut planner = FftPlanner::new();
        planner.plan_fft_inverse(n).process(&mut buffer);

        // rustfft is unnormalized
        let norm = 1.0 / n as f64;
        buffer.iter().map(|c| c.re * norm).collect()
    }
}

/// Strictly positive bins of an `n`-point DFT.
#[inline]
fn positive_bins(n: usize) -> usize {
    n.saturating_sub(1) / 2
}

/// DFT sample frequencies for `n` points spaced `dt` seconds apart.
pub fn fft_frequencies(n: usize, dt: f64) -> Vec<f64> {
    let scale = 1.0 / (n as f64 * dt);
    let last_positive = positive_bins(n);
    (0..n)
        .map(|k| {
            if k <= last_positive {
                k as f64 * scale
            } else {
                (k as f64 - n as f64) * scale
            }
        })
        .collect()
}

/// FFT peak-picking estimator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FourierEstimator;

impl FourierEstimator {
    /// Compute the tapered spectrum of a series sampled at `sampling_frequency`.
    pub fn spectrum(
        &self,
        series: &[f64],
        sampling_frequency: f64,
    ) -> Result<FourierSpectrum, BurstError> {
        let n = series.len();
        let n_positive = positive_bins(n);
        if n_positive == 0 {
            return Err(BurstError::EmptySpectrum(format!(
                "{n} samples leave no positive frequency bin"
            )));
        }

        let window = hann_symmetric(n);
        let mut buffer: Vec<Complex64> = series
            .iter()
            .zip(&window)
            .map(|(&x, &w)| Complex64::new(x * w, 0.0))
            .collect();

        let mut planner = FftPlanner::new();
        planner.plan_fft_forward(n).process(&mut buffer);

        let magnitude: Vec<f64> = buffer.iter().map(|c| c.norm()).collect();
        let frequencies = fft_frequencies(n, 1.0 / sampling_frequency);

        let peak_index = 1 + argmax(&magnitude[1..=n_positive]);
        let peak_magnitude = magnitude[peak_index];
        if !(peak_magnitude > 0.0) {
            return Err(BurstError::EmptySpectrum(
                "no spectral energy at positive frequencies".into(),
            ));
        }

        Ok(FourierSpectrum {
            peak_frequency: frequencies[peak_index],
            frequencies,
            spectrum: buffer,
            magnitude,
            peak_index,
            peak_magnitude,
        })
    }
}

impl PeriodEstimator for FourierEstimator {
    fn estimate(&self, input: &EstimatorInput<'_>) -> Result<PeriodEstimate, BurstError> {
        let spectrum = self.spectrum(input.depth_detrended, input.sampling_frequency)?;
        Ok(PeriodEstimate {
            period: 1.0 / spectrum.peak_frequency,
            diagnostics: SpectralDiagnostics::Fourier(spectrum),
        })
    }

    fn name(&self) -> &'static str {
        "fourier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sinusoid(n: usize, fs: f64, period: f64) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * i as f64 / (fs * period)).sin())
            .collect()
    }

    #[test]
    fn test_fft_frequencies() {
        let even = fft_frequencies(4, 0.5);
        assert_eq!(even, vec![0.0, 0.5, -1.0, -0.5]);

        let odd = fft_frequencies(5, 1.0);
        assert_eq!(odd, vec![0.0, 0.2, 0.4, -0.4, -0.2]);
    }

    #[test]
    fn test_recovers_bin_centred_period() {
        // 1024 samples at 8 Hz: bin width 1/128 Hz, period 8 s is bin 16
        let series = sinusoid(1024, 8.0, 8.0);
        let spectrum = FourierEstimator.spectrum(&series, 8.0).unwrap();
        assert_eq!(spectrum.peak_index, 16);
        assert!((1.0 / spectrum.peak_frequency - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_positive_view() {
        let series = sinusoid(64, 4.0, 4.0);
        let spectrum = FourierEstimator.spectrum(&series, 4.0).unwrap();
        let (freqs, mags) = spectrum.positive();
        assert_eq!(freqs.len(), 31);
        assert_eq!(mags.len(), 31);
        assert!(freqs.iter().all(|&f| f > 0.0));
        assert!((spectrum.bin_width() - 4.0 / 64.0).abs() < 1e-12);
    }

    #[test]
    fn test_too_short() {
        for n in 0..3 {
            let series = vec![1.0; n];
            let err = FourierEstimator.spectrum(&series, 6.0).unwrap_err();
            assert!(matches!(err, BurstError::EmptySpectrum(_)), "n = {n}");
        }
    }

    #[test]
    fn test_flat_series_has_no_peak() {
        let err = FourierEstimator.spectrum(&[0.0; 64], 6.0).unwrap_err();
        assert!(matches!(err, BurstError::EmptySpectrum(_)));
    }

    #[test]
    fn test_unfiltered_reconstruction_is_windowed_series() {
        let n = 256;
        let series = sinusoid(n, 8.0, 8.0);
        let mut spectrum = FourierEstimator.spectrum(&series, 8.0).unwrap();
        spectrum.peak_frequency = f64::INFINITY;

        let recon = spectrum.lowpass_reconstruction();
        let window = hann_symmetric(n);
        for i in 0..n {
            assert!((recon[i] - series[i] * window[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_lowpass_removes_high_frequencies() {
        // Swell at bin 8 plus chop at bin 100 of a 512-point, 8 Hz burst
        let n = 512;
        let series: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / 8.0;
                (2.0 * PI * t / 8.0).sin() + 0.2 * (2.0 * PI * t * 100.0 / 64.0).sin()
            })
            .collect();
        let spectrum = FourierEstimator.spectrum(&series, 8.0).unwrap();
        assert_eq!(spectrum.peak_index, 8);

        let recon = spectrum.lowpass_reconstruction();
        let filtered = FourierEstimator.spectrum(&recon, 8.0).unwrap();
        assert!(filtered.magnitude[100] < 1e-3 * spectrum.magnitude[100]);
    }

    #[test]
    fn test_deterministic() {
        let series = sinusoid(300, 6.0, 7.3);
        let a = FourierEstimator.spectrum(&series, 6.0).unwrap();
        let b = FourierEstimator.spectrum(&series, 6.0).unwrap();
        assert_eq!(a.peak_index, b.peak_index);
        assert_eq!(a.peak_frequency.to_bits(), b.peak_frequency.to_bits());
    }
}
