//! Raw logger samples of a single burst.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BurstError;

/// Minimum number of samples any burst must hold.
pub const MIN_BURST_SAMPLES: usize = 2;

/// One logger record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Sample time.
    pub timestamp: DateTime<Utc>,
    /// Practical salinity (PSU).
    pub salinity: f64,
    /// In-situ temperature (°C).
    pub temperature: f64,
    /// Sea (gauge) pressure (dbar).
    pub sea_pressure: f64,
}

/// Validated, column-oriented samples of one burst.
///
/// Construction guarantees equal column lengths, at least two samples,
/// strictly increasing timestamps and no NaN or infinite values.
#[derive(Clone, Debug, PartialEq)]
pub struct BurstSamples {
    timestamps: Vec<DateTime<Utc>>,
    salinity: Vec<f64>,
    temperature: Vec<f64>,
    sea_pressure: Vec<f64>,
}

impl BurstSamples {
    /// Build a burst from parallel columns.
    ///
    /// # Errors
    /// - `EmptySeries` if there are no timestamps
    /// - `LengthMismatch` if a column differs in length from the timestamps
    /// - `MissingValues` if a column holds NaN or infinite values
    /// - `InsufficientSamples` below two samples
    /// - `NonMonotonicTime` if timestamps do not strictly increase
    pub fn new(
        timestamps: Vec<DateTime<Utc>>,
        salinity: Vec<f64>,
        temperature: Vec<f64>,
        sea_pressure: Vec<f64>,
    ) -> Result<Self, BurstError> {
        let n = timestamps.len();
        if n == 0 {
            return Err(BurstError::EmptySeries {
                column: "timestamp",
            });
        }

        let columns: [(&'static str, &[f64]); 3] = [
            ("salinity", &salinity),
            ("temperature", &temperature),
            ("sea_pressure", &sea_pressure),
        ];
        for (column, values) in columns {
            if values.len() != n {
                return Err(BurstError::LengthMismatch {
                    column,
                    expected: n,
                    actual: values.len(),
                });
            }
        }
        for (column, values) in columns {
            let count = values.iter().filter(|v| !v.is_finite()).count();
            if count > 0 {
                return Err(BurstError::MissingValues {
                    column,
                    count,
                    total: n,
                });
            }
        }

        if n < MIN_BURST_SAMPLES {
            return Err(BurstError::InsufficientSamples {
                found: n,
                required: MIN_BURST_SAMPLES,
            });
        }
        if let Some(index) = timestamps.windows(2).position(|w| w[1] <= w[0]) {
            return Err(BurstError::NonMonotonicTime { index: index + 1 });
        }

        Ok(Self {
            timestamps,
            salinity,
            temperature,
            sea_pressure,
        })
    }

    /// Build a burst from row records.
    pub fn from_records<I>(records: I) -> Result<Self, BurstError>
    where
        I: IntoIterator<Item = Sample>,
    {
        let records = records.into_iter();
        let capacity = records.size_hint().0;
        let mut timestamps = Vec::with_capacity(capacity);
        let mut salinity = Vec::with_capacity(capacity);
        let mut temperature = Vec::with_capacity(capacity);
        let mut sea_pressure = Vec::with_capacity(capacity);

        for sample in records {
            timestamps.push(sample.timestamp);
            salinity.push(sample.salinity);
            temperature.push(sample.temperature);
            sea_pressure.push(sample.sea_pressure);
        }
        Self::new(timestamps, salinity, temperature, sea_pressure)
    }

    /// Reject a burst holding fewer than half of `expected` samples.
    pub fn require_expected(&self, expected: usize) -> Result<(), BurstError> {
        let required = expected.div_ceil(2).max(MIN_BURST_SAMPLES);
        if self.len() < required {
            return Err(BurstError::InsufficientSamples {
                found: self.len(),
                required,
            });
        }
        Ok(())
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always false: a burst holds at least two samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Sample times.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Practical salinity (PSU).
    pub fn salinity(&self) -> &[f64] {
        &self.salinity
    }

    /// In-situ temperature (°C).
    pub fn temperature(&self) -> &[f64] {
        &self.temperature
    }

    /// Sea pressure (dbar).
    pub fn sea_pressure(&self) -> &[f64] {
        &self.sea_pressure
    }

    /// First sample time.
    pub fn start(&self) -> DateTime<Utc> {
        self.timestamps[0]
    }

    /// Last sample time.
    pub fn end(&self) -> DateTime<Utc> {
        self.timestamps[self.timestamps.len() - 1]
    }

    /// Time from first to last sample in seconds.
    pub fn duration(&self) -> f64 {
        let span = self.end() - self.start();
        span.num_microseconds()
            .map_or(span.num_milliseconds() as f64 / 1e3, |us| us as f64 / 1e6)
    }

    /// Iterate over the samples as rows.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).map(move |i| Sample {
            timestamp: self.timestamps[i],
            salinity: self.salinity[i],
            temperature: self.temperature[i],
            sea_pressure: self.sea_pressure[i],
        })
    }
}
