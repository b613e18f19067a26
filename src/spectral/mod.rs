//! Dominant wave period estimation.
//!
//! Three interchangeable estimators share the [`PeriodEstimator`] trait:
//!
//! ## Built-in Estimators
//! - [`FourierEstimator`]: FFT of the Hann-tapered detrended depth
//! - [`WelchEstimator`]: averaged periodogram of overlapping segments
//! - [`PeakCountingEstimator`]: mean spacing between crests
//! - [`StandardEstimator`]: enum dispatch over the three, selected by [`Strategy`]
//!
//! Spectral estimators return T = 1 / f_p, where f_p is the frequency of the
//! strictly positive bin with the largest magnitude (Fourier) or power (Welch).

mod fourier;
mod peaks;
pub mod traits;
mod welch;
pub mod window;

pub use fourier::{FourierEstimator, FourierSpectrum, fft_frequencies};
pub use peaks::{PeakCountingEstimator, PeakDetection, PeakInput, find_peaks};
pub use traits::{
    BoxedEstimator, EstimatorInput, PeriodEstimate, PeriodEstimator, SpectralDiagnostics,
    StandardEstimator, Strategy, create_estimator,
};
pub use welch::{WelchEstimator, WelchSpectrum, segment_length};

/// Index of the first maximum of a non-empty slice (0 when empty).
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
