//! Wave statistics from linear wave theory.
//!
//! The pressure sensor sits at elevation z above the bed. With mean depth h,
//! depth standard deviation σ, wavenumber K and period T:
//! ```text
//! H = 4σ · cosh(K·h) / cosh(K·(z + h))
//! U = 4π σ · cosh(K·h) / (T · cosh(K·(z + h)) · sinh(K·h))
//! ```
//! H is the significant wave height (m) and U the significant near-bed
//! orbital velocity (m/s). Both share the same transfer ratio, so
//! U = π·H / (T·sinh(K·h)).

use std::f64::consts::PI;

use crate::constants::MIN_SINH_KH;
use crate::error::{BurstError, require_finite, require_positive};

/// Significant wave height and orbital velocity of a burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveStatistics {
    /// Significant wave height H (m).
    pub wave_height: f64,
    /// Significant near-bed orbital velocity U (m/s).
    pub orbital_velocity: f64,
}

/// Inputs to [`wave_statistics`].
#[derive(Clone, Copy, Debug)]
pub struct WaveStatisticsInput {
    /// Wavenumber K (rad/m)
    pub wavenumber: f64,
    /// Wave period T (s)
    pub period: f64,
    /// Mean hydrostatic depth h (m)
    pub mean_depth: f64,
    /// Standard deviation of hydrostatic depth σ (m)
    pub depth_std: f64,
    /// Sensor elevation above the bed z (m)
    pub elevation: f64,
}

/// Compute significant wave height, then orbital velocity.
///
/// # Errors
/// - `InvalidInput` for non-positive T or h, negative K or σ, or non-finite z
/// - `VanishingDenominator` if sinh(K·h) is effectively zero (including a
///   wavenumber that rounded to zero)
/// - `NonPhysicalResult` if either statistic is not finite
pub fn wave_statistics(input: &WaveStatisticsInput) -> Result<WaveStatistics, BurstError> {
    let k = input.wavenumber;
    if !k.is_finite() || k < 0.0 {
        return Err(BurstError::invalid_input(format!(
            "wavenumber must be non-negative and finite, got {k}"
        )));
    }
    let t = require_positive("wave period", input.period)?;
    let h = require_positive("mean depth", input.mean_depth)?;
    let sd = input.depth_std;
    if !sd.is_finite() || sd < 0.0 {
        return Err(BurstError::invalid_input(format!(
            "depth standard deviation must be non-negative and finite, got {sd}"
        )));
    }
    if !input.elevation.is_finite() {
        return Err(BurstError::invalid_input(format!(
            "sensor elevation must be finite, got {}",
            input.elevation
        )));
    }

    let cosh_kh = (k * h).cosh();
    let cosh_kzh = (k * (input.elevation + h)).cosh();
    let sinh_kh = (k * h).sinh();

    let wave_height = require_finite("wave height", 4.0 * sd * (cosh_kh / cosh_kzh))?;

    if sinh_kh < MIN_SINH_KH {
        return Err(BurstError::VanishingDenominator { sinh_kh });
    }
    let orbital_velocity = require_finite(
        "orbital velocity",
        (4.0 * PI * sd * cosh_kh) / (t * cosh_kzh * sinh_kh),
    )?;

    Ok(WaveStatistics {
        wave_height,
        orbital_velocity,
    })
}
