//! # burst-waves
//!
//! Burst-domain wave analysis for seabed pressure/CTD loggers.
//!
//! A logger records salinity, temperature and sea pressure in short bursts.
//! For every burst this crate provides:
//! - In-situ seawater density (UNESCO EOS-80) and hydrostatic depth
//! - Linear detrending of the depth series
//! - Dominant wave period from an FFT, Welch's method or crest counting
//! - Wavelength and wavenumber from the linear dispersion relation
//! - Significant wave height and near-bed orbital velocity
//!
//! # Example
//!
//! ```
//! use burst_waves::{Burst, BurstSamples, Strategy};
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let fs = 6.0;
//! let start = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
//! let n = 1024;
//! let timestamps = (0..n)
//!     .map(|i| start + Duration::microseconds((i as f64 * 1e6 / fs).round() as i64))
//!     .collect();
//! let pressure = (0..n)
//!     .map(|i| 5.0 + 0.5 * (2.0 * std::f64::consts::PI * i as f64 / 48.0).sin())
//!     .collect();
//!
//! let samples = BurstSamples::new(timestamps, vec![30.0; n], vec![20.0; n], pressure).unwrap();
//! let burst = Burst::new(samples, fs, 0.15, Strategy::Welch).unwrap();
//!
//! assert!((burst.period() - 8.0).abs() < 1e-9);
//! let (u, t, h) = burst.uth();
//! println!("{burst}: U = {u:.3} m/s, T = {t:.2} s, H = {h:.2} m");
//! ```

pub mod analysis;
pub mod batch;
pub mod burst;
pub mod config;
pub mod constants;
pub mod equations;
pub mod error;
pub mod spectral;

// Re-export main types for convenience
pub use batch::{BatchReport, BurstInput, analyze_bursts};
#[cfg(feature = "parallel")]
pub use batch::analyze_bursts_parallel;
pub use burst::{Burst, BurstSamples, BurstStage, Sample, WaveRecord};
pub use config::{AnalysisConfig, DispersionConfig, PeakConfig};
pub use error::{BurstError, ErrorKind};

// Physical relations
pub use analysis::{detrend_linear, hydrostatic_depth};
pub use equations::{
    DispersionSolution, DispersionSolver, EquationOfState, WaveStatistics, WaveStatisticsInput,
    solve_dispersion, wave_statistics,
};

// Period estimation
pub use spectral::{
    FourierEstimator, PeakCountingEstimator, PeakInput, PeriodEstimate, PeriodEstimator,
    SpectralDiagnostics, StandardEstimator, Strategy, WelchEstimator,
};
