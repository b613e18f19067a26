//! Benchmarks for period estimation and the burst pipeline.
//!
//! Run with: `cargo bench --bench estimator_bench`
//!
//! Compares the three estimators on a 1024-sample burst and times a full
//! burst analysis per strategy.

use burst_waves::spectral::{EstimatorInput, PeriodEstimator};
use burst_waves::{Burst, BurstSamples, PeakConfig, Strategy, solve_dispersion};
use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::f64::consts::PI;

const FS: f64 = 6.0;
const N: usize = 1024;

/// Swell plus a little chop, in dbar.
fn pressure() -> Vec<f64> {
    (0..N)
        .map(|i| {
            let t = i as f64 / FS;
            5.0 + 0.5 * (2.0 * PI * t / 8.0).sin() + 0.05 * (2.0 * PI * t / 1.7).sin()
        })
        .collect()
}

fn samples() -> BurstSamples {
    let start = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
    let timestamps = (0..N)
        .map(|i| start + Duration::microseconds((i as f64 * 1e6 / FS).round() as i64))
        .collect();
    BurstSamples::new(timestamps, vec![30.0; N], vec![20.0; N], pressure()).unwrap()
}

/// Benchmark the estimators on a prepared depth series.
fn bench_estimators(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimators");

    let depth: Vec<f64> = pressure().iter().map(|p| p * 0.998 + 0.15).collect();
    let detrended = burst_waves::detrend_linear(&depth).unwrap();
    let input = EstimatorInput {
        depth: &depth,
        depth_detrended: &detrended,
        sampling_frequency: FS,
        duration: (N - 1) as f64 / FS,
    };
    let peaks = PeakConfig::default();

    for strategy in Strategy::ALL {
        let estimator = strategy.estimator(&peaks);
        group.bench_with_input(
            BenchmarkId::from_parameter(strategy),
            &input,
            |b, input| b.iter(|| black_box(estimator.estimate(black_box(input)).unwrap().period)),
        );
    }

    group.finish();
}

/// Benchmark the full pipeline per strategy.
fn bench_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("burst");
    let samples = samples();

    for strategy in Strategy::ALL {
        group.bench_function(BenchmarkId::from_parameter(strategy), |b| {
            b.iter(|| {
                let burst = Burst::new(samples.clone(), FS, 0.15, strategy).unwrap();
                black_box(burst.uth())
            })
        });
    }

    group.finish();
}

/// Benchmark the dispersion solver in deep and shallow water.
fn bench_dispersion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispersion");
    for (label, depth) in [("deep", 50.0), ("intermediate", 5.0), ("shallow", 0.5)] {
        group.bench_function(label, |b| {
            b.iter(|| black_box(solve_dispersion(black_box(8.0), black_box(depth)).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_estimators, bench_burst, bench_dispersion);
criterion_main!(benches);
