//! Hydrostatic water depth from sea pressure.
//!
//! # Mathematical Background
//!
//! ```text
//! h(t) = p(t) · 10⁴ / (ρ̄ · g) + z
//! ```
//!
//! with p in dbar (10⁴ Pa per dbar), ρ̄ the burst-mean density, g gravity and
//! z the sensor elevation above the bed. A single mean density is used for
//! the whole burst, not the per-sample density: bursts are short enough to
//! treat the water column as quasi-stationary.
//!
//! The depth series is then linearly detrended. Tidal rise or fall and
//! instrument drift across the burst would otherwise leak into the lowest
//! frequency bins and swamp the wave peak.

use faer::{Mat, linalg::solvers::Solve};

use crate::constants::PA_PER_DBAR;
use crate::error::{BurstError, require_positive};

/// Convert sea pressure into hydrostatic water depth above the bed.
///
/// # Arguments
/// * `sea_pressure` - Gauge pressure in dbar
/// * `mean_density` - Burst-mean seawater density in kg/m³
/// * `elevation` - Sensor elevation above the bed in m
/// * `g` - Gravitational acceleration in m/s²
pub fn hydrostatic_depth(
    sea_pressure: &[f64],
    mean_density: f64,
    elevation: f64,
    g: f64,
) -> Result<Vec<f64>, BurstError> {
    if sea_pressure.is_empty() {
        return Err(BurstError::EmptySeries {
            column: "sea_pressure",
        });
    }
    require_positive("mean density", mean_density)?;
    require_positive("gravity", g)?;
    if !elevation.is_finite() {
        return Err(BurstError::invalid_input(format!(
            "sensor elevation must be finite, got {elevation}"
        )));
    }

    let scale = PA_PER_DBAR / (mean_density * g);
    sea_pressure
        .iter()
        .map(|&p| {
            let depth = p * scale + elevation;
            if depth.is_finite() {
                Ok(depth)
            } else {
                Err(BurstError::MissingValues {
                    column: "sea_pressure",
                    count: sea_pressure.iter().filter(|v| !v.is_finite()).count(),
                    total: sea_pressure.len(),
                })
            }
        })
        .collect()
}

/// Least-squares straight line through `values` sampled at unit spacing.
///
/// Returns `(intercept, slope)`.
pub fn linear_fit(values: &[f64]) -> Result<(f64, f64), BurstError> {
    let n = values.len();
    if n == 0 {
        return Err(BurstError::EmptySeries {
            column: "hydro_depth",
        });
    }
    if n == 1 {
        return Ok((values[0], 0.0));
    }

    // A = [1, i]; solve (AᵀA) β = Aᵀy
    let mut ata = Mat::<f64>::zeros(2, 2);
    let mut aty = Mat::<f64>::zeros(2, 1);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        ata[(0, 0)] += 1.0;
        ata[(0, 1)] += x;
        ata[(1, 1)] += x * x;
        aty[(0, 0)] += y;
        aty[(1, 0)] += x * y;
    }
    ata[(1, 0)] = ata[(0, 1)];

    let lu = ata.as_ref().full_piv_lu();
    let beta = lu.solve(&aty);

    let intercept = beta[(0, 0)];
    let slope = beta[(1, 0)];
    if intercept.is_finite() && slope.is_finite() {
        Ok((intercept, slope))
    } else {
        Err(BurstError::NonPhysicalResult {
            quantity: "depth trend",
            value: slope,
        })
    }
}

/// Remove the least-squares linear trend from a series.
pub fn detrend_linear(values: &[f64]) -> Result<Vec<f64>, BurstError> {
    let (intercept, slope) = linear_fit(values)?;
    Ok(values
        .iter()
        .enumerate()
        .map(|(i, &y)| y - (intercept + slope * i as f64))
        .collect())
}
