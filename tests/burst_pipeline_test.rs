//! Integration tests for the burst pipeline.
//!
//! Runs synthetic 6 Hz logger bursts through every estimation strategy and
//! checks the wave parameters against linear theory.

use burst_waves::spectral::segment_length;
use burst_waves::{
    AnalysisConfig, Burst, BurstError, BurstSamples, ErrorKind, PeakInput, SpectralDiagnostics,
    Strategy, solve_dispersion,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::f64::consts::PI;

const FS: f64 = 6.0;
const N: usize = 1024;
const ELEVATION: f64 = 0.15;

fn timestamps(n: usize) -> Vec<DateTime<Utc>> {
    let start = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
    (0..n)
        .map(|i| start + Duration::microseconds((i as f64 * 1e6 / FS).round() as i64))
        .collect()
}

/// Sea pressure p(t) = mean + trend·t/t_end + A·sin(2πt/T).
fn pressure(n: usize, mean: f64, trend: f64, amplitude: f64, period: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64 / FS;
            let t_end = (n - 1) as f64 / FS;
            mean + trend * t / t_end + amplitude * (2.0 * PI * t / period).sin()
        })
        .collect()
}

fn swell_burst() -> BurstSamples {
    BurstSamples::new(
        timestamps(N),
        vec![30.0; N],
        vec![20.0; N],
        pressure(N, 5.0, 0.0, 0.5, 8.0),
    )
    .unwrap()
}

#[test]
fn test_swell_scenario_all_strategies() {
    for strategy in Strategy::ALL {
        let burst = Burst::new(swell_burst(), FS, ELEVATION, strategy).unwrap();
        let t = burst.period();

        // Within one frequency bin of the true 0.125 Hz
        let bin = match burst.diagnostics() {
            SpectralDiagnostics::Welch(_) => FS / segment_length(N) as f64,
            _ => FS / N as f64,
        };
        assert!(
            (1.0 / t - 0.125).abs() <= bin,
            "{strategy}: T = {t:.4} s is more than one bin from 8 s"
        );

        // 5 dbar at ~1021.7 kg/m³ plus 0.15 m
        assert!(
            (burst.mean_depth() - 5.14).abs() < 0.02,
            "{strategy}: mean depth {:.4}",
            burst.mean_depth()
        );
        // Sinusoid of ~0.499 m amplitude
        assert!((burst.depth_std() - 0.353).abs() < 0.005);
    }
}

#[test]
fn test_wave_statistics_follow_linear_theory() {
    let burst = Burst::new(swell_burst(), FS, ELEVATION, Strategy::Welch).unwrap();
    let k = burst.wavenumber();
    let h = burst.mean_depth();
    let sd = burst.depth_std();

    let ratio = (k * h).cosh() / (k * (ELEVATION + h)).cosh();
    let expected_h = 4.0 * sd * ratio;
    assert!(
        (burst.wave_height() - expected_h).abs() < 1e-12,
        "H = {}, expected {expected_h}",
        burst.wave_height()
    );
    assert!(
        burst.wave_height() > 1.3 && burst.wave_height() < 1.5,
        "H = {:.3} m",
        burst.wave_height()
    );

    let expected_u = PI * expected_h / (burst.period() * (k * h).sinh());
    assert!((burst.orbital_velocity() - expected_u).abs() < 1e-9);
    assert!(burst.orbital_velocity() > 0.6 && burst.orbital_velocity() < 1.1);
}

#[test]
fn test_wavenumber_consistent_with_dispersion() {
    let burst = Burst::new(swell_burst(), FS, ELEVATION, Strategy::Welch).unwrap();
    let solution = solve_dispersion(burst.period(), burst.mean_depth()).unwrap();

    assert_eq!(burst.wavelength(), solution.wavelength);
    assert_eq!(burst.wavenumber(), solution.wavenumber);
    assert!((burst.wavenumber() - 0.12).abs() < 1e-12);

    let l = burst.wavelength();
    let g = burst_waves::constants::G;
    let rhs = g / (2.0 * PI) * burst.period().powi(2) * (2.0 * PI * burst.mean_depth() / l).tanh();
    assert!((l - rhs).abs() < 1e-4);
}

#[test]
fn test_idempotent() {
    for strategy in Strategy::ALL {
        let a = Burst::new(swell_burst(), FS, ELEVATION, strategy).unwrap();
        let b = Burst::new(swell_burst(), FS, ELEVATION, strategy).unwrap();
        assert_eq!(a.period().to_bits(), b.period().to_bits());
        assert_eq!(a.wavenumber().to_bits(), b.wavenumber().to_bits());
        assert_eq!(a.wavelength().to_bits(), b.wavelength().to_bits());
        assert_eq!(a.wave_height().to_bits(), b.wave_height().to_bits());
        assert_eq!(a.orbital_velocity().to_bits(), b.orbital_velocity().to_bits());
    }
}

#[test]
fn test_strategies_agree() {
    let periods: Vec<f64> = Strategy::ALL
        .iter()
        .map(|&s| Burst::new(swell_burst(), FS, ELEVATION, s).unwrap().period())
        .collect();
    for &a in &periods {
        for &b in &periods {
            assert!((a - b).abs() / a < 0.05, "periods disagree: {periods:?}");
        }
    }
}

#[test]
fn test_mostly_missing_pressure_rejected() {
    let mut p = pressure(N, 5.0, 0.0, 0.5, 8.0);
    for v in p.iter_mut().step_by(3) {
        *v = f64::NAN;
    }
    for v in p.iter_mut().skip(1).step_by(3) {
        *v = f64::NAN;
    }

    let err = BurstSamples::new(timestamps(N), vec![30.0; N], vec![20.0; N], p).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataQuality);
    match err {
        BurstError::MissingValues { column, count, total } => {
            assert_eq!(column, "sea_pressure");
            assert!(count * 2 > total);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_zero_period_rejected_by_solver() {
    let err = solve_dispersion(0.0, 5.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_short_burst_rejected_against_expected() {
    let n = 400;
    let samples = BurstSamples::new(
        timestamps(n),
        vec![30.0; n],
        vec![20.0; n],
        pressure(n, 5.0, 0.0, 0.5, 8.0),
    )
    .unwrap();
    let config = AnalysisConfig::default().with_expected_samples(N);
    let err = Burst::with_config(samples, FS, ELEVATION, &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataQuality);
}

#[test]
fn test_peaks_raw_and_detrended_under_tide() {
    // Rising tide of 3 dbar across the burst
    let p = pressure(N, 3.5, 3.0, 0.5, 8.0);
    let make = || BurstSamples::new(timestamps(N), vec![30.0; N], vec![20.0; N], p.clone()).unwrap();

    let raw_config = AnalysisConfig::default()
        .with_strategy(Strategy::Peaks)
        .with_peak_input(PeakInput::Raw);
    let detrended_config = raw_config.clone().with_peak_input(PeakInput::Detrended);

    let raw = Burst::with_config(make(), FS, ELEVATION, &raw_config).unwrap();
    let detrended = Burst::with_config(make(), FS, ELEVATION, &detrended_config).unwrap();

    let crests = |burst: &Burst| match burst.diagnostics() {
        SpectralDiagnostics::Peaks(detection) => detection.indices.len(),
        other => panic!("expected peak diagnostics, got {other:?}"),
    };
    // Crests below the mean water level are missed on the raw series
    assert!(crests(&detrended) > crests(&raw));

    for burst in [&raw, &detrended] {
        assert!(
            (burst.period() - 8.0).abs() < 0.1,
            "T = {:.4} s",
            burst.period()
        );
    }
}

#[test]
fn test_fourier_diagnostics_exposed() {
    let burst = Burst::new(swell_burst(), FS, ELEVATION, Strategy::Fourier).unwrap();
    let SpectralDiagnostics::Fourier(spectrum) = burst.diagnostics() else {
        panic!("expected Fourier diagnostics");
    };
    assert_eq!(spectrum.frequencies.len(), N);
    // 0.125 Hz sits between bins 21 and 22 of a 1024-point, 6 Hz DFT
    assert!(spectrum.peak_index == 21 || spectrum.peak_index == 22);
    assert!((1.0 / spectrum.peak_frequency - burst.period()).abs() < 1e-12);

    let recon = spectrum.lowpass_reconstruction();
    assert_eq!(recon.len(), N);
    assert!(recon.iter().all(|v| v.is_finite()));
}

#[test]
fn test_record_serializes() {
    let burst = Burst::new(swell_burst(), FS, ELEVATION, Strategy::Welch).unwrap();
    let record = burst.record();
    let text = toml::to_string(&record).unwrap();
    assert!(text.contains("strategy = \"welch\""));
    assert!(text.contains("period = 8.0"));
}
