//! Physical constants and analysis defaults.
//!
//! These are the only values shared between bursts. They are immutable and
//! can be overridden per analysis through [`AnalysisConfig`](crate::AnalysisConfig).

/// Standard gravity (m/s²).
pub const G: f64 = 9.80665;

/// Pascals per decibar.
pub const PA_PER_DBAR: f64 = 10_000.0;

/// Default absolute tolerance on successive wavelength iterates (m).
pub const DEFAULT_DISPERSION_TOLERANCE: f64 = 1e-6;

/// Default iteration bound for the dispersion solver.
///
/// Shallow bursts (kh ≪ 1) converge slowly: the fixed-point map has a slope
/// close to -1 there, and T = 20 s over 0.1 m of water takes ~26 000 steps.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Default minimum horizontal separation between detected crests (samples).
pub const DEFAULT_PEAK_MIN_DISTANCE: usize = 10;

/// Decimal places kept on the wavenumber.
pub const WAVENUMBER_DECIMALS: i32 = 2;

/// Smallest `sinh(k·h)` accepted in the orbital-velocity denominator.
pub const MIN_SINH_KH: f64 = 1e-6;

/// Round `value` to `decimals` places (half away from zero).
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert!((round_to(0.1151, 2) - 0.12).abs() < 1e-12);
        assert!((round_to(0.1149, 2) - 0.11).abs() < 1e-12);
        assert!((round_to(47.996, 2) - 48.0).abs() < 1e-12);
        assert_eq!(round_to(0.004, 2), 0.0);
    }
}
