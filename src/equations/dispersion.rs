//! Linear dispersion relation for surface gravity waves.
//!
//! # Mathematical Background
//!
//! For a wave of period T over mean water depth h, the wavelength L satisfies
//! ```text
//! L = (g / 2π) · T² · tanh(2π·h / L)
//! ```
//! The relation is solved by fixed-point iteration starting from the
//! deep-water wavelength L₀ = g·T²/2π. The slope of the map at the root is
//! -2kh / sinh(2kh): the iteration converges in a handful of steps in deep
//! water and slowly (alternating about the root) as kh → 0.
//!
//! The wavenumber K = 2π/L is reported rounded to two decimals, the precision
//! used by the published burst statistics.

use std::f64::consts::PI;

use tracing::trace;

use crate::config::DispersionConfig;
use crate::constants::{WAVENUMBER_DECIMALS, round_to};
use crate::error::{BurstError, require_positive};

/// Solution of the dispersion relation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DispersionSolution {
    /// Wavelength L (m).
    pub wavelength: f64,
    /// Wavenumber K = 2π/L (rad/m), rounded to two decimals.
    pub wavenumber: f64,
    /// Wavenumber 2π/L without rounding (rad/m).
    pub wavenumber_exact: f64,
    /// Fixed-point iterations performed.
    pub iterations: usize,
}

/// Fixed-point solver for the linear dispersion relation.
#[derive(Clone, Copy, Debug)]
pub struct DispersionSolver {
    /// Gravitational acceleration (m/s²)
    pub g: f64,
    /// Tolerance and iteration bound
    pub config: DispersionConfig,
}

impl DispersionSolver {
    /// Create a solver for the given gravity and iteration settings.
    pub fn new(g: f64, config: DispersionConfig) -> Self {
        Self { g, config }
    }

    /// Deep-water wavelength g·T²/2π, the initial guess.
    #[inline]
    pub fn deep_water_wavelength(&self, period: f64) -> f64 {
        (self.g / (2.0 * PI)) * period * period
    }

    /// Solve for wavelength and wavenumber.
    ///
    /// # Arguments
    /// * `period` - Wave period T (s)
    /// * `mean_depth` - Mean water depth h (m)
    ///
    /// # Errors
    /// - `InvalidInput` if `period` or `mean_depth` is non-positive or non-finite
    /// - `NoConvergence` if the iteration bound is reached first
    pub fn solve(&self, period: f64, mean_depth: f64) -> Result<DispersionSolution, BurstError> {
        require_positive("wave period", period)?;
        require_positive("mean depth", mean_depth)?;
        require_positive("gravity", self.g)?;

        let l0 = self.deep_water_wavelength(period);
        let mut wavelength = l0;
        let mut residual = f64::INFINITY;

        for iteration in 1..=self.config.max_iterations {
            let next = l0 * (2.0 * PI * mean_depth / wavelength).tanh();
            residual = (next - wavelength).abs();
            wavelength = next;

            if !wavelength.is_finite() || wavelength <= 0.0 {
                break;
            }
            if residual < self.config.tolerance {
                trace!(iteration, wavelength, "dispersion relation converged");
                let wavenumber_exact = 2.0 * PI / wavelength;
                return Ok(DispersionSolution {
                    wavelength,
                    wavenumber: round_to(wavenumber_exact, WAVENUMBER_DECIMALS),
                    wavenumber_exact,
                    iterations: iteration,
                });
            }
        }

        Err(BurstError::NoConvergence {
            iterations: self.config.max_iterations,
            residual,
        })
    }
}

/// Solve the dispersion relation with default gravity and settings.
pub fn solve_dispersion(period: f64, mean_depth: f64) -> Result<DispersionSolution, BurstError> {
    DispersionSolver::new(crate::constants::G, DispersionConfig::default()).solve(period, mean_depth)
}
