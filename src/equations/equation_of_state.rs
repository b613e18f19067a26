//! Equation of State for seawater density.
//!
//! Computes in-situ seawater density ρ(S, T, p) from practical salinity,
//! in-situ temperature and sea pressure. This module implements the UNESCO
//! EOS-80 formulation: the one-atmosphere density of Millero & Poisson
//! corrected for compressibility with the secant bulk modulus.
//!
//! # References
//!
//! - UNESCO (1981): Tenth report of the joint panel on oceanographic tables and standards.
//! - Millero & Poisson (1981): International one-atmosphere equation of state of seawater.
//! - Fofonoff & Millard (1983): Algorithms for computation of fundamental properties of seawater.
//!
//! # Units
//!
//! - Temperature: °C
//! - Salinity: PSU (practical salinity units)
//! - Sea pressure: dbar, gauge (atmospheric offset already removed)
//! - Density: kg/m³
//!
//! # Estuarine Context
//!
//! Bed-mounted loggers in a tidal estuary see 20-35 PSU and 10-25 °C;
//! densities fall between roughly 1012 and 1027 kg/m³, and a few dbar of
//! sea pressure add only ~0.02 kg/m³ per dbar.

use crate::error::BurstError;

/// Decibars per bar.
const DBAR_PER_BAR: f64 = 10.0;

/// Equation of State calculator for seawater.
#[derive(Clone, Debug)]
pub struct EquationOfState {
    /// Include pressure effects (if false, evaluates at the surface)
    pub include_pressure: bool,
}

impl Default for EquationOfState {
    fn default() -> Self {
        Self::new()
    }
}

impl EquationOfState {
    /// Create an equation of state with pressure effects included.
    pub fn new() -> Self {
        Self {
            include_pressure: true,
        }
    }

    /// Create an equation of state evaluated at surface pressure only.
    pub fn surface_only() -> Self {
        Self {
            include_pressure: false,
        }
    }

    /// Compute seawater density at surface pressure (p = 0).
    ///
    /// Uses the UNESCO EOS-80 one-atmosphere equation of state.
    ///
    /// # Example
    /// ```
    /// use burst_waves::EquationOfState;
    ///
    /// let eos = EquationOfState::new();
    ///
    /// // Standard seawater
    /// let rho = eos.density_surface(5.0, 35.0);
    /// assert!((rho - 1027.675).abs() < 0.01);
    /// ```
    pub fn density_surface(&self, temperature: f64, salinity: f64) -> f64 {
        let t = temperature;
        let s = salinity;

        // Standard mean ocean water (Bigg formula)
        let rho_w = 999.842594 + 6.793952e-2 * t - 9.095290e-3 * t.powi(2)
            + 1.001685e-4 * t.powi(3)
            - 1.120083e-6 * t.powi(4)
            + 6.536332e-9 * t.powi(5);

        let a = 8.24493e-1 - 4.0899e-3 * t + 7.6438e-5 * t.powi(2) - 8.2467e-7 * t.powi(3)
            + 5.3875e-9 * t.powi(4);
        let b = -5.72466e-3 + 1.0227e-4 * t - 1.6546e-6 * t.powi(2);
        let c = 4.8314e-4;

        rho_w + a * s + b * s.powf(1.5) + c * s.powi(2)
    }

    /// Compute in-situ seawater density.
    ///
    /// # Arguments
    /// * `temperature` - Temperature in °C
    /// * `salinity` - Salinity in PSU
    /// * `pressure` - Sea pressure in dbar
    ///
    /// # Returns
    /// Density in kg/m³
    pub fn density(&self, temperature: f64, salinity: f64, pressure: f64) -> f64 {
        let rho_0 = self.density_surface(temperature, salinity);
        if !self.include_pressure || pressure == 0.0 {
            return rho_0;
        }

        let p = pressure / DBAR_PER_BAR;
        let k = self.secant_bulk_modulus(temperature, salinity, p);
        rho_0 / (1.0 - p / k)
    }

    /// Compute density anomaly σ = ρ - 1000 kg/m³.
    pub fn sigma(&self, temperature: f64, salinity: f64, pressure: f64) -> f64 {
        self.density(temperature, salinity, pressure) - 1000.0
    }

    /// Secant bulk modulus K(S, T, p) in bar, with `pressure` in bar.
    pub fn secant_bulk_modulus(&self, temperature: f64, salinity: f64, pressure: f64) -> f64 {
        let t = temperature;
        let s = salinity;
        let p = pressure;

        // Pure water secant bulk modulus
        let kw = 19652.21 + 148.4206 * t - 2.327105 * t.powi(2) + 1.360477e-2 * t.powi(3)
            - 5.155288e-5 * t.powi(4);

        // Salinity contribution at p=0
        let k0 = kw
            + s * (54.6746 - 0.603459 * t + 1.09987e-2 * t.powi(2) - 6.1670e-5 * t.powi(3))
            + s.powf(1.5) * (7.944e-2 + 1.6483e-2 * t - 5.3009e-4 * t.powi(2));

        // Pressure contribution
        let aw = 3.239908 + 1.43713e-3 * t + 1.16092e-4 * t.powi(2) - 5.77905e-7 * t.powi(3);
        let a =
            aw + s * (2.2838e-3 - 1.0981e-5 * t - 1.6078e-6 * t.powi(2)) + s.powf(1.5) * 1.91075e-4;

        let bw = 8.50935e-5 - 6.12293e-6 * t + 5.2787e-8 * t.powi(2);
        let b = bw + s * (-9.9348e-7 + 2.0816e-8 * t + 9.1697e-10 * t.powi(2));

        k0 + p * (a + b * p)
    }

    /// Compute per-sample density for a burst.
    ///
    /// # Errors
    /// - `EmptySeries` if the salinity series is empty
    /// - `LengthMismatch` if the three series differ in length
    /// - `MissingValues` if any input is NaN or infinite
    /// - `NonPhysicalResult` if a density evaluates to a non-positive or non-finite value
    pub fn density_series(
        &self,
        salinity: &[f64],
        temperature: &[f64],
        sea_pressure: &[f64],
    ) -> Result<Vec<f64>, BurstError> {
        let n = salinity.len();
        if n == 0 {
            return Err(BurstError::EmptySeries { column: "salinity" });
        }
        for (column, series) in [("temperature", temperature), ("sea_pressure", sea_pressure)] {
            if series.len() != n {
                return Err(BurstError::LengthMismatch {
                    column,
                    expected: n,
                    actual: series.len(),
                });
            }
        }
        for (column, series) in [
            ("salinity", salinity),
            ("temperature", temperature),
            ("sea_pressure", sea_pressure),
        ] {
            let count = series.iter().filter(|v| !v.is_finite()).count();
            if count > 0 {
                return Err(BurstError::MissingValues {
                    column,
                    count,
                    total: n,
                });
            }
        }

        salinity
            .iter()
            .zip(temperature)
            .zip(sea_pressure)
            .map(|((&s, &t), &p)| {
                let rho = self.density(t, s, p);
                if rho.is_finite() && rho > 0.0 {
                    Ok(rho)
                } else {
                    Err(BurstError::NonPhysicalResult {
                        quantity: "density",
                        value: rho,
                    })
                }
            })
            .collect()
    }
}
