//! Series statistics and hydrostatic-depth conversion.
//!
//! This module provides tools for:
//! - Summary statistics of a burst's sample columns (mean, sample standard deviation)
//! - Converting sea pressure into hydrostatic depth above the bed
//! - Removing the linear trend of a depth series
//!
//! # Example
//!
//! ```ignore
//! use burst_waves::analysis::{detrend_linear, hydrostatic_depth, mean};
//!
//! let depth = hydrostatic_depth(&pressure, mean_density, 0.15, 9.80665)?;
//! let detrended = detrend_linear(&depth)?;
//! println!("Mean depth: {:.2} m", mean(&depth).unwrap_or(f64::NAN));
//! ```

mod hydrostatic;

pub use hydrostatic::{detrend_linear, hydrostatic_depth, linear_fit};

/// Arithmetic mean, `None` for an empty series.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (n - 1 denominator), `None` below two samples.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Sample standard deviation (n - 1 denominator), `None` below two samples.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}
