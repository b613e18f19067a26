//! Trait-based period estimation.
//!
//! A burst is handed to a [`PeriodEstimator`], which reports the dominant
//! wave period together with the intermediate spectrum or crest list it
//! derived it from.
//!
//! # Example
//! ```
//! use burst_waves::spectral::{EstimatorInput, PeriodEstimator, Strategy, WelchEstimator};
//! use burst_waves::PeakConfig;
//!
//! let depth: Vec<f64> = (0..1024)
//!     .map(|i| 0.5 * (2.0 * std::f64::consts::PI * i as f64 / 48.0).sin())
//!     .collect();
//! let input = EstimatorInput {
//!     depth: &depth,
//!     depth_detrended: &depth,
//!     sampling_frequency: 6.0,
//!     duration: 1023.0 / 6.0,
//! };
//!
//! // Using concrete type
//! let welch = WelchEstimator.estimate(&input).unwrap();
//! assert!((welch.period - 8.0).abs() < 1e-9);
//!
//! // Using the configured selector
//! let estimator = Strategy::Fourier.estimator(&PeakConfig::default());
//! let fourier = estimator.estimate(&input).unwrap();
//! assert!(fourier.period > 7.0 && fourier.period < 9.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::{
    FourierEstimator, FourierSpectrum, PeakCountingEstimator, PeakDetection, WelchEstimator,
    WelchSpectrum,
};
use crate::config::PeakConfig;
use crate::error::BurstError;

// =============================================================================
// Estimator Input / Output
// =============================================================================

/// Series and sampling information handed to an estimator.
#[derive(Clone, Copy, Debug)]
pub struct EstimatorInput<'a> {
    /// Hydrostatic depth (m).
    pub depth: &'a [f64],
    /// Linearly detrended depth (m).
    pub depth_detrended: &'a [f64],
    /// Sampling frequency (Hz).
    pub sampling_frequency: f64,
    /// Time from first to last sample (s).
    pub duration: f64,
}

impl EstimatorInput<'_> {
    /// Number of samples in the burst.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.depth.len()
    }
}

/// Intermediate result kept alongside the period.
#[derive(Clone, Debug)]
pub enum SpectralDiagnostics {
    /// Tapered DFT of the burst.
    Fourier(FourierSpectrum),
    /// Welch-averaged PSD.
    Welch(WelchSpectrum),
    /// Crests used for counting.
    Peaks(PeakDetection),
    /// Estimator kept nothing.
    None,
}

impl SpectralDiagnostics {
    /// Peak frequency for the spectral variants.
    pub fn peak_frequency(&self) -> Option<f64> {
        match self {
            SpectralDiagnostics::Fourier(s) => Some(s.peak_frequency),
            SpectralDiagnostics::Welch(s) => Some(s.peak_frequency),
            SpectralDiagnostics::Peaks(_) | SpectralDiagnostics::None => None,
        }
    }
}

/// Dominant period and how it was found.
#[derive(Clone, Debug)]
pub struct PeriodEstimate {
    /// Wave period (s).
    pub period: f64,
    /// Spectrum or crest list behind the period.
    pub diagnostics: SpectralDiagnostics,
}

// =============================================================================
// Period Estimator Trait
// =============================================================================

/// Estimates the dominant wave period of a burst.
///
/// # Implementation Notes
///
/// - The input series are NaN-free and at least two samples long
/// - A returned period must be finite and positive
/// - Estimation must be deterministic: equal inputs give bit-identical periods
///
/// # Extending
///
/// Implement this trait for a new estimator and pass it to
/// [`Burst::with_estimator`](crate::Burst::with_estimator).
pub trait PeriodEstimator: Send + Sync {
    /// Estimate the period of a burst.
    ///
    /// # Errors
    /// Returns a `DegenerateBurst` error when no dominant period can be found.
    fn estimate(&self, input: &EstimatorInput<'_>) -> Result<PeriodEstimate, BurstError>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

// =============================================================================
// Strategy Selector
// =============================================================================

/// Named period estimation strategy, as selected in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// FFT of the Hann-tapered burst.
    Fourier,
    /// Welch-averaged periodogram.
    #[default]
    Welch,
    /// Crest counting.
    Peaks,
}

impl Strategy {
    /// All strategies, in selector order.
    pub const ALL: [Strategy; 3] = [Strategy::Fourier, Strategy::Welch, Strategy::Peaks];

    /// Selector string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Fourier => "fourier",
            Strategy::Welch => "welch",
            Strategy::Peaks => "peaks",
        }
    }

    /// Build the estimator for this strategy.
    pub fn estimator(&self, peaks: &PeakConfig) -> StandardEstimator {
        match self {
            Strategy::Fourier => StandardEstimator::Fourier(FourierEstimator),
            Strategy::Welch => StandardEstimator::Welch(WelchEstimator),
            Strategy::Peaks => StandardEstimator::Peaks(PeakCountingEstimator::new(
                peaks.min_distance,
                peaks.input,
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = BurstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fourier" => Ok(Strategy::Fourier),
            "welch" => Ok(Strategy::Welch),
            "peaks" => Ok(Strategy::Peaks),
            _ => Err(BurstError::UnknownStrategy(s.to_string())),
        }
    }
}

// =============================================================================
// Standard Estimator Enum (Zero-Cost Dispatch)
// =============================================================================

/// Enum wrapper for the built-in estimators.
///
/// Dispatches by `match` rather than through a vtable, so a configured
/// strategy costs no more than calling the estimator directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StandardEstimator {
    /// FFT peak-picking.
    Fourier(FourierEstimator),
    /// Welch's method.
    Welch(WelchEstimator),
    /// Crest counting.
    Peaks(PeakCountingEstimator),
}

impl PeriodEstimator for StandardEstimator {
    fn estimate(&self, input: &EstimatorInput<'_>) -> Result<PeriodEstimate, BurstError> {
        match self {
            StandardEstimator::Fourier(e) => e.estimate(input),
            StandardEstimator::Welch(e) => e.estimate(input),
            StandardEstimator::Peaks(e) => e.estimate(input),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            StandardEstimator::Fourier(e) => e.name(),
            StandardEstimator::Welch(e) => e.name(),
            StandardEstimator::Peaks(e) => e.name(),
        }
    }
}

impl From<StandardEstimator> for Strategy {
    fn from(estimator: StandardEstimator) -> Self {
        match estimator {
            StandardEstimator::Fourier(_) => Strategy::Fourier,
            StandardEstimator::Welch(_) => Strategy::Welch,
            StandardEstimator::Peaks(_) => Strategy::Peaks,
        }
    }
}

// =============================================================================
// Boxed Estimator (Runtime Polymorphism)
// =============================================================================

/// Type alias for a boxed estimator.
pub type BoxedEstimator = Box<dyn PeriodEstimator>;

/// Create a boxed estimator from a strategy.
pub fn create_estimator(strategy: Strategy, peaks: &PeakConfig) -> BoxedEstimator {
    match strategy {
        Strategy::Fourier => Box::new(FourierEstimator),
        Strategy::Welch => Box::new(WelchEstimator),
        Strategy::Peaks => Box::new(PeakCountingEstimator::new(peaks.min_distance, peaks.input)),
    }
}
