//! Per-burst output row.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Wave statistics of one burst, as handed to an aggregation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WaveRecord {
    /// First sample time.
    pub start: DateTime<Utc>,
    /// Last sample time.
    pub end: DateTime<Utc>,
    /// Estimator that produced the period.
    pub strategy: String,
    /// Significant orbital velocity U (m/s).
    pub orbital_velocity: f64,
    /// Peak period T (s).
    pub period: f64,
    /// Significant wave height H (m).
    pub wave_height: f64,
    /// Wavenumber K (rad/m), rounded to two decimals.
    pub wavenumber: f64,
    /// Wavelength L (m).
    pub wavelength: f64,
    /// Mean hydrostatic depth (m).
    pub mean_depth: f64,
}
