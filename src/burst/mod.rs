//! Single-burst wave analysis.
//!
//! A [`Burst`] is built from validated [`BurstSamples`] and runs the whole
//! pipeline during construction:
//!
//! ```text
//! Constructed → DensityComputed → DepthComputed → PeriodEstimated
//!             → DispersionSolved → StatisticsComputed → Ready
//! ```
//!
//! Any failing stage ends the burst in `Invalid` and its error is returned
//! from the constructor unchanged; a `Burst` value is always `Ready`.
//!
//! # Example
//!
//! ```ignore
//! use burst_waves::{Burst, BurstSamples, Strategy};
//!
//! let samples = BurstSamples::new(timestamps, salinity, temperature, pressure)?;
//! let burst = Burst::new(samples, 6.0, 0.15, Strategy::Welch)?;
//! let (u, t, h) = burst.uth();
//! println!("{burst}: U = {u:.3} m/s, T = {t:.2} s, H = {h:.2} m");
//! ```

mod record;
mod samples;

pub use record::WaveRecord;
pub use samples::{BurstSamples, MIN_BURST_SAMPLES, Sample};

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::analysis::{detrend_linear, hydrostatic_depth, mean, sample_std};
use crate::config::AnalysisConfig;
use crate::equations::{
    DispersionSolution, DispersionSolver, EquationOfState, WaveStatistics, WaveStatisticsInput,
    wave_statistics,
};
use crate::error::BurstError;
use crate::spectral::{EstimatorInput, PeriodEstimator, SpectralDiagnostics, Strategy};

/// Pipeline stages of a burst.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstStage {
    Constructed,
    DensityComputed,
    DepthComputed,
    PeriodEstimated,
    DispersionSolved,
    StatisticsComputed,
    Ready,
    Invalid,
}

impl fmt::Display for BurstStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BurstStage::Constructed => "constructed",
            BurstStage::DensityComputed => "density computed",
            BurstStage::DepthComputed => "depth computed",
            BurstStage::PeriodEstimated => "period estimated",
            BurstStage::DispersionSolved => "dispersion solved",
            BurstStage::StatisticsComputed => "statistics computed",
            BurstStage::Ready => "ready",
            BurstStage::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

/// Log a failure against the stage that was being entered.
fn at_stage<T>(
    start: DateTime<Utc>,
    stage: BurstStage,
    result: Result<T, BurstError>,
) -> Result<T, BurstError> {
    result.inspect_err(|err| {
        debug!(%start, failed = %stage, stage = %BurstStage::Invalid, error = %err, "burst rejected");
    })
}

/// A fully analyzed burst.
#[derive(Clone, Debug)]
pub struct Burst {
    samples: BurstSamples,
    sampling_frequency: f64,
    elevation: f64,
    estimator: &'static str,

    density: Vec<f64>,
    mean_density: f64,
    hydro_depth: Vec<f64>,
    hydro_depth_detrended: Vec<f64>,
    mean_depth: f64,
    depth_std: f64,

    period: f64,
    diagnostics: SpectralDiagnostics,
    dispersion: DispersionSolution,
    statistics: WaveStatistics,
}

impl Burst {
    /// Analyze a burst with the given strategy and default settings.
    ///
    /// # Arguments
    /// * `samples` - Validated burst samples
    /// * `sampling_frequency` - Logger sampling frequency f (Hz)
    /// * `elevation` - Sensor elevation above the bed z (m)
    /// * `strategy` - Period estimation strategy
    ///
    /// # Errors
    /// Any [`BurstError`] raised by a pipeline stage.
    pub fn new(
        samples: BurstSamples,
        sampling_frequency: f64,
        elevation: f64,
        strategy: Strategy,
    ) -> Result<Self, BurstError> {
        let config = AnalysisConfig::default().with_strategy(strategy);
        Self::with_config(samples, sampling_frequency, elevation, &config)
    }

    /// Analyze a burst with the strategy and settings of `config`.
    pub fn with_config(
        samples: BurstSamples,
        sampling_frequency: f64,
        elevation: f64,
        config: &AnalysisConfig,
    ) -> Result<Self, BurstError> {
        let estimator = config.strategy.estimator(&config.peaks);
        Self::with_estimator(samples, sampling_frequency, elevation, &estimator, config)
    }

    /// Analyze a burst with a caller-supplied period estimator.
    ///
    /// `config.strategy` is ignored; every other setting applies.
    pub fn with_estimator<E: PeriodEstimator + ?Sized>(
        samples: BurstSamples,
        sampling_frequency: f64,
        elevation: f64,
        estimator: &E,
        config: &AnalysisConfig,
    ) -> Result<Self, BurstError> {
        let start = samples.start();
        let g = config.gravity;

        at_stage(start, BurstStage::Constructed, config.validate())?;
        at_stage(start, BurstStage::Constructed, {
            if sampling_frequency.is_finite() && sampling_frequency > 0.0 {
                Ok(())
            } else {
                Err(BurstError::InvalidSamplingFrequency(sampling_frequency))
            }
        })?;
        if let Some(expected) = config.expected_samples {
            at_stage(start, BurstStage::Constructed, samples.require_expected(expected))?;
        }
        debug!(%start, stage = %BurstStage::Constructed, samples = samples.len(), estimator = estimator.name());

        // Density
        let density = at_stage(
            start,
            BurstStage::DensityComputed,
            EquationOfState::new().density_series(
                samples.salinity(),
                samples.temperature(),
                samples.sea_pressure(),
            ),
        )?;
        let mean_density = at_stage(
            start,
            BurstStage::DensityComputed,
            mean(&density).ok_or(BurstError::EmptySeries { column: "density" }),
        )?;
        debug!(%start, stage = %BurstStage::DensityComputed, mean_density);

        // Hydrostatic depth
        let (hydro_depth, hydro_depth_detrended) = at_stage(start, BurstStage::DepthComputed, {
            hydrostatic_depth(samples.sea_pressure(), mean_density, elevation, g).and_then(
                |depth| {
                    let detrended = detrend_linear(&depth)?;
                    Ok((depth, detrended))
                },
            )
        })?;
        let (mean_depth, depth_std) = at_stage(start, BurstStage::DepthComputed, {
            match (mean(&hydro_depth), sample_std(&hydro_depth)) {
                (Some(m), Some(sd)) => Ok((m, sd)),
                _ => Err(BurstError::InsufficientSamples {
                    found: hydro_depth.len(),
                    required: MIN_BURST_SAMPLES,
                }),
            }
        })?;
        debug!(%start, stage = %BurstStage::DepthComputed, mean_depth, depth_std);

        // Period
        let input = EstimatorInput {
            depth: &hydro_depth,
            depth_detrended: &hydro_depth_detrended,
            sampling_frequency,
            duration: samples.duration(),
        };
        let estimate = at_stage(start, BurstStage::PeriodEstimated, estimator.estimate(&input))?;
        debug!(%start, stage = %BurstStage::PeriodEstimated, period = estimate.period);

        // Dispersion
        let dispersion = at_stage(
            start,
            BurstStage::DispersionSolved,
            DispersionSolver::new(g, config.dispersion).solve(estimate.period, mean_depth),
        )?;
        debug!(
            %start,
            stage = %BurstStage::DispersionSolved,
            wavelength = dispersion.wavelength,
            wavenumber = dispersion.wavenumber,
            iterations = dispersion.iterations
        );

        // Wave statistics
        let statistics = at_stage(
            start,
            BurstStage::StatisticsComputed,
            wave_statistics(&WaveStatisticsInput {
                wavenumber: dispersion.wavenumber,
                period: estimate.period,
                mean_depth,
                depth_std,
                elevation,
            }),
        )?;
        debug!(
            %start,
            stage = %BurstStage::StatisticsComputed,
            wave_height = statistics.wave_height,
            orbital_velocity = statistics.orbital_velocity
        );

        debug!(%start, stage = %BurstStage::Ready);
        Ok(Self {
            samples,
            sampling_frequency,
            elevation,
            estimator: estimator.name(),
            density,
            mean_density,
            hydro_depth,
            hydro_depth_detrended,
            mean_depth,
            depth_std,
            period: estimate.period,
            diagnostics: estimate.diagnostics,
            dispersion,
            statistics,
        })
    }

    // =========================================================================
    // Wave parameters
    // =========================================================================

    /// Peak wave period T (s).
    #[doc(alias = "get_T")]
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Wavenumber K (rad/m), rounded to two decimals.
    #[doc(alias = "get_K")]
    pub fn wavenumber(&self) -> f64 {
        self.dispersion.wavenumber
    }

    /// Wavelength L (m).
    #[doc(alias = "get_lambda")]
    pub fn wavelength(&self) -> f64 {
        self.dispersion.wavelength
    }

    /// Significant wave height H (m).
    #[doc(alias = "get_H")]
    pub fn wave_height(&self) -> f64 {
        self.statistics.wave_height
    }

    /// Significant orbital velocity U (m/s).
    #[doc(alias = "get_U")]
    pub fn orbital_velocity(&self) -> f64 {
        self.statistics.orbital_velocity
    }

    /// `(U, T, H)` for aggregation.
    #[doc(alias = "get_UTH")]
    pub fn uth(&self) -> (f64, f64, f64) {
        (self.orbital_velocity(), self.period(), self.wave_height())
    }

    /// Full dispersion solution, including the unrounded wavenumber.
    pub fn dispersion(&self) -> &DispersionSolution {
        &self.dispersion
    }

    // =========================================================================
    // Derived series and diagnostics
    // =========================================================================

    /// Input samples.
    pub fn samples(&self) -> &BurstSamples {
        &self.samples
    }

    /// Sample times.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        self.samples.timestamps()
    }

    /// Per-sample seawater density (kg/m³).
    pub fn density(&self) -> &[f64] {
        &self.density
    }

    /// Burst-mean density (kg/m³).
    pub fn mean_density(&self) -> f64 {
        self.mean_density
    }

    /// Hydrostatic depth above the bed (m).
    pub fn hydro_depth(&self) -> &[f64] {
        &self.hydro_depth
    }

    /// Linearly detrended hydrostatic depth (m).
    pub fn hydro_depth_detrended(&self) -> &[f64] {
        &self.hydro_depth_detrended
    }

    /// Mean hydrostatic depth (m).
    pub fn mean_depth(&self) -> f64 {
        self.mean_depth
    }

    /// Sample standard deviation of hydrostatic depth (m).
    pub fn depth_std(&self) -> f64 {
        self.depth_std
    }

    /// Spectrum or crest list behind the period.
    pub fn diagnostics(&self) -> &SpectralDiagnostics {
        &self.diagnostics
    }

    /// Name of the estimator that produced the period.
    pub fn estimator_name(&self) -> &'static str {
        self.estimator
    }

    /// Sampling frequency (Hz).
    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    /// Sensor elevation above the bed (m).
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Number of samples.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Time from first to last sample (s).
    pub fn duration(&self) -> f64 {
        self.samples.duration()
    }

    /// Output row for this burst.
    pub fn record(&self) -> WaveRecord {
        WaveRecord {
            start: self.samples.start(),
            end: self.samples.end(),
            strategy: self.estimator.to_string(),
            orbital_velocity: self.orbital_velocity(),
            period: self.period(),
            wave_height: self.wave_height(),
            wavenumber: self.wavenumber(),
            wavelength: self.wavelength(),
            mean_depth: self.mean_depth,
        }
    }
}

impl fmt::Display for Burst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Burst {} to {}", self.samples.start(), self.samples.end())
    }
}
