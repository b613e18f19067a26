//! Error types for burst analysis.
//!
//! Every failure is raised where it is detected and reaches the caller of
//! [`Burst::new`](crate::Burst::new) unchanged. Callers that process many
//! bursts branch on [`BurstError::kind`] to decide whether to skip a burst.

use std::path::PathBuf;

use thiserror::Error;

/// The four failure kinds a burst can end in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing/NaN samples, too few samples, malformed timestamps.
    DataQuality,
    /// Non-finite or non-positive physical inputs, unknown strategy, bad config.
    InvalidInput,
    /// The dispersion iteration hit its bound.
    Convergence,
    /// The burst is well-formed but its waves cannot be characterised.
    DegenerateBurst,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::DataQuality => "data quality",
            ErrorKind::InvalidInput => "invalid input",
            ErrorKind::Convergence => "convergence",
            ErrorKind::DegenerateBurst => "degenerate burst",
        };
        f.write_str(name)
    }
}

/// Errors produced while analyzing a burst.
#[derive(Debug, Error)]
pub enum BurstError {
    /// A required series has no samples.
    #[error("Series '{column}' is empty")]
    EmptySeries { column: &'static str },

    /// Parallel columns disagree in length.
    #[error("Series '{column}' has {actual} samples, expected {expected}")]
    LengthMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A required column contains NaN or infinite values.
    #[error("Series '{column}' has {count} missing values out of {total}")]
    MissingValues {
        column: &'static str,
        count: usize,
        total: usize,
    },

    /// Fewer than half of the expected samples are present.
    #[error("Burst has {found} samples, at least {required} required")]
    InsufficientSamples { found: usize, required: usize },

    /// Timestamps are not strictly increasing.
    #[error("Non-monotonic timestamp at sample {index}")]
    NonMonotonicTime { index: usize },

    /// Sampling frequency is not a positive finite number.
    #[error("Invalid sampling frequency: {0} Hz")]
    InvalidSamplingFrequency(f64),

    /// A physical input is non-finite or out of its domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Strategy selector outside `fourier | welch | peaks`.
    #[error("Unknown estimation strategy '{0}' (expected fourier, welch or peaks)")]
    UnknownStrategy(String),

    /// Configuration file could not be read.
    #[error("Cannot read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("Cannot parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Dispersion iteration did not reach the tolerance.
    #[error("Dispersion relation did not converge after {iterations} iterations (residual {residual:e} m)")]
    NoConvergence { iterations: usize, residual: f64 },

    /// Peak counting found fewer than two crests.
    #[error("Found {found} peaks, at least 2 required")]
    TooFewPeaks { found: usize },

    /// No usable frequency bins.
    #[error("Spectrum has no usable frequencies: {0}")]
    EmptySpectrum(String),

    /// `sinh(k·h)` too close to zero for the orbital velocity.
    #[error("Orbital velocity denominator vanishes: sinh(k·h) = {sinh_kh:e}")]
    VanishingDenominator { sinh_kh: f64 },

    /// A computed quantity is NaN or infinite.
    #[error("Non-physical {quantity}: {value}")]
    NonPhysicalResult { quantity: &'static str, value: f64 },
}

impl BurstError {
    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// The kind of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BurstError::EmptySeries { .. }
            | BurstError::LengthMismatch { .. }
            | BurstError::MissingValues { .. }
            | BurstError::InsufficientSamples { .. }
            | BurstError::NonMonotonicTime { .. }
            | BurstError::InvalidSamplingFrequency(_) => ErrorKind::DataQuality,
            BurstError::InvalidInput(_)
            | BurstError::UnknownStrategy(_)
            | BurstError::ConfigIo { .. }
            | BurstError::ConfigParse(_) => ErrorKind::InvalidInput,
            BurstError::NoConvergence { .. } => ErrorKind::Convergence,
            BurstError::TooFewPeaks { .. }
            | BurstError::EmptySpectrum(_)
            | BurstError::VanishingDenominator { .. }
            | BurstError::NonPhysicalResult { .. } => ErrorKind::DegenerateBurst,
        }
    }
}

/// Check that a scalar is finite and strictly positive.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64, BurstError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BurstError::invalid_input(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

/// Check that a computed scalar is finite.
pub(crate) fn require_finite(quantity: &'static str, value: f64) -> Result<f64, BurstError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BurstError::NonPhysicalResult { quantity, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            BurstError::MissingValues {
                column: "sea_pressure",
                count: 3,
                total: 10
            }
            .kind(),
            ErrorKind::DataQuality
        );
        assert_eq!(
            BurstError::UnknownStrategy("wavelet".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            BurstError::NoConvergence {
                iterations: 5,
                residual: 1.0
            }
            .kind(),
            ErrorKind::Convergence
        );
        assert_eq!(
            BurstError::TooFewPeaks { found: 1 }.kind(),
            ErrorKind::DegenerateBurst
        );
    }

    #[test]
    fn test_messages() {
        let err = BurstError::InsufficientSamples {
            found: 100,
            required: 512,
        };
        assert_eq!(err.to_string(), "Burst has 100 samples, at least 512 required");

        let err = BurstError::TooFewPeaks { found: 1 };
        assert_eq!(err.to_string(), "Found 1 peaks, at least 2 required");
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("period", 8.0).is_ok());
        assert!(require_positive("period", 0.0).is_err());
        assert!(require_positive("period", -1.0).is_err());
        assert!(require_positive("period", f64::NAN).is_err());
        assert!(require_positive("period", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<BurstError>();
    }
}
