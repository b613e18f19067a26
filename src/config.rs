//! Analysis configuration.
//!
//! All fields have defaults, so an empty TOML document is a valid config:
//!
//! ```toml
//! gravity = 9.80665
//! strategy = "welch"
//! expected_samples = 1024
//!
//! [dispersion]
//! tolerance = 1e-6
//! max_iterations = 100000
//!
//! [peaks]
//! min_distance = 10
//! input = "raw"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_DISPERSION_TOLERANCE, DEFAULT_MAX_ITERATIONS, DEFAULT_PEAK_MIN_DISTANCE, G,
};
use crate::error::{BurstError, require_positive};
use crate::spectral::{PeakInput, Strategy};

/// Settings for the dispersion-relation iteration.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DispersionConfig {
    /// Absolute tolerance on successive wavelength iterates (m).
    pub tolerance: f64,
    /// Iteration bound before giving up.
    pub max_iterations: usize,
}

impl Default for DispersionConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_DISPERSION_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Settings for the peak-counting estimator.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PeakConfig {
    /// Minimum separation between crests (samples).
    pub min_distance: usize,
    /// Which depth series is searched for crests.
    pub input: PeakInput,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_PEAK_MIN_DISTANCE,
            input: PeakInput::Raw,
        }
    }
}

/// Configuration shared by every burst of an analysis run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AnalysisConfig {
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Period estimator used by the batch layer.
    pub strategy: Strategy,
    /// Samples a full burst should hold; bursts with fewer than half are rejected.
    pub expected_samples: Option<usize>,
    /// Dispersion solver settings.
    pub dispersion: DispersionConfig,
    /// Peak-counting settings.
    pub peaks: PeakConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            gravity: G,
            strategy: Strategy::Welch,
            expected_samples: None,
            dispersion: DispersionConfig::default(),
            peaks: PeakConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gravitational acceleration.
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the default estimation strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the number of samples in a complete burst.
    pub fn with_expected_samples(mut self, samples: usize) -> Self {
        self.expected_samples = Some(samples);
        self
    }

    /// Set the dispersion iteration bound.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.dispersion.max_iterations = max_iterations;
        self
    }

    /// Set the series searched by the peak-counting estimator.
    pub fn with_peak_input(mut self, input: PeakInput) -> Self {
        self.peaks.input = input;
        self
    }

    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, BurstError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a TOML file and validate it.
    pub fn from_file(path: &Path) -> Result<Self, BurstError> {
        let text = std::fs::read_to_string(path).map_err(|source| BurstError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), BurstError> {
        require_positive("gravity", self.gravity)?;
        require_positive("dispersion tolerance", self.dispersion.tolerance)?;
        if self.dispersion.max_iterations == 0 {
            return Err(BurstError::invalid_input(
                "dispersion max_iterations must be at least 1",
            ));
        }
        if self.peaks.min_distance == 0 {
            return Err(BurstError::invalid_input(
                "peaks min_distance must be at least 1",
            ));
        }
        if self.expected_samples == Some(0) {
            return Err(BurstError::invalid_input(
                "expected_samples must be at least 1",
            ));
        }
        Ok(())
    }
}
