//! Independent analysis of many bursts.
//!
//! Every burst is analyzed on its own; a failing burst is logged at `warn`
//! level and reported in place, so one degenerate burst never aborts a
//! deployment-long run. Bursts share no mutable state, which lets the
//! `parallel` feature fan them out over a rayon pool.

use std::collections::HashMap;

use tracing::warn;

use crate::burst::{Burst, BurstSamples};
use crate::config::AnalysisConfig;
use crate::error::{BurstError, ErrorKind};

/// One burst waiting to be analyzed.
#[derive(Clone, Debug)]
pub struct BurstInput {
    /// Validated samples.
    pub samples: BurstSamples,
    /// Sampling frequency (Hz).
    pub sampling_frequency: f64,
    /// Sensor elevation above the bed (m).
    pub elevation: f64,
}

impl BurstInput {
    /// Bundle samples with their sampling frequency and sensor elevation.
    pub fn new(samples: BurstSamples, sampling_frequency: f64, elevation: f64) -> Self {
        Self {
            samples,
            sampling_frequency,
            elevation,
        }
    }
}

fn analyze_one(input: BurstInput, config: &AnalysisConfig) -> Result<Burst, BurstError> {
    let start = input.samples.start();
    let end = input.samples.end();
    Burst::with_config(
        input.samples,
        input.sampling_frequency,
        input.elevation,
        config,
    )
    .inspect_err(|err| {
        warn!(%start, %end, kind = %err.kind(), error = %err, "skipping invalid burst");
    })
}

/// Analyze every burst in order, keeping failures in place.
pub fn analyze_bursts<I>(inputs: I, config: &AnalysisConfig) -> Vec<Result<Burst, BurstError>>
where
    I: IntoIterator<Item = BurstInput>,
{
    inputs
        .into_iter()
        .map(|input| analyze_one(input, config))
        .collect()
}

/// Analyze bursts on the rayon pool; output order matches input order.
#[cfg(feature = "parallel")]
pub fn analyze_bursts_parallel(
    inputs: Vec<BurstInput>,
    config: &AnalysisConfig,
) -> Vec<Result<Burst, BurstError>> {
    use rayon::prelude::*;

    inputs
        .into_par_iter()
        .map(|input| analyze_one(input, config))
        .collect()
}

/// Outcome counts of a batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Bursts analyzed successfully.
    pub analyzed: usize,
    /// Rejected bursts per failure kind.
    pub rejected: HashMap<ErrorKind, usize>,
}

impl BatchReport {
    /// Tally a batch of results.
    pub fn from_results(results: &[Result<Burst, BurstError>]) -> Self {
        let mut report = Self::default();
        for result in results {
            match result {
                Ok(_) => report.analyzed += 1,
                Err(err) => *report.rejected.entry(err.kind()).or_insert(0) += 1,
            }
        }
        report
    }

    /// Bursts rejected with the given kind.
    pub fn rejected_with(&self, kind: ErrorKind) -> usize {
        self.rejected.get(&kind).copied().unwrap_or(0)
    }

    /// All rejected bursts.
    pub fn total_rejected(&self) -> usize {
        self.rejected.values().sum()
    }

    /// All bursts seen.
    pub fn total(&self) -> usize {
        self.analyzed + self.total_rejected()
    }
}
