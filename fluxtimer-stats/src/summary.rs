//! Summary Statistics
//!
//! Reduces the duration samples of a single candidate into mean, standard
//! deviation and extremes.
//!
//! The standard deviation is the *sample* estimator (divide by `n - 1`).
//! A set holding one sample has a standard deviation of zero.

use crate::NANOS_PER_SEC;
use std::time::Duration;

/// Summary of one candidate's timing samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleStatistics {
    /// Arithmetic mean of the samples
    pub mean: Duration,
    /// Sample standard deviation
    pub sd: Duration,
    /// Fastest sample
    pub min: Duration,
    /// Slowest sample
    pub max: Duration,
    /// Number of samples folded
    pub count: usize,
}

/// Errors from statistics computation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// No samples were supplied
    #[error("statistics requested over an empty sample set")]
    EmptySampleSet,
}

/// Collects the samples of one candidate before reducing them.
///
/// Storage is reserved up front so that `push` does not allocate while the
/// caller is in the middle of a measurement loop.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    samples: Vec<Duration>,
}

impl Accumulator {
    /// Create an accumulator with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Record one sample
    #[inline]
    pub fn push(&mut self, sample: Duration) {
        self.samples.push(sample);
    }

    /// Number of samples recorded so far
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no sample has been recorded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Recorded samples in insertion order
    pub fn samples(&self) -> &[Duration] {
        &self.samples
    }

    /// Reduce the recorded samples
    pub fn finish(self) -> Result<SampleStatistics, StatsError> {
        accumulate(&self.samples)
    }
}

/// Compute summary statistics over a set of duration samples
pub fn accumulate(samples: &[Duration]) -> Result<SampleStatistics, StatsError> {
    if samples.is_empty() {
        return Err(StatsError::EmptySampleSet);
    }

    let count = samples.len();

    // Mean in integer nanoseconds so that exact inputs give exact outputs
    let total_ns: u128 = samples.iter().map(Duration::as_nanos).sum();
    let mean = duration_from_nanos(total_ns / count as u128);

    let sd = if count < 2 {
        Duration::ZERO
    } else {
        let mean_ns = total_ns as f64 / count as f64;
        let variance = samples
            .iter()
            .map(|s| (s.as_nanos() as f64 - mean_ns).powi(2))
            .sum::<f64>()
            / (count - 1) as f64;
        duration_from_nanos(variance.sqrt().round() as u128)
    };

    // non-empty, checked above
    let min = samples.iter().copied().min().unwrap_or(Duration::ZERO);
    let max = samples.iter().copied().max().unwrap_or(Duration::ZERO);

    Ok(SampleStatistics {
        mean,
        sd,
        min,
        max,
        count,
    })
}

fn duration_from_nanos(nanos: u128) -> Duration {
    let secs = (nanos / NANOS_PER_SEC).min(u64::MAX as u128) as u64;
    let subsec = (nanos % NANOS_PER_SEC) as u32;
    Duration::new(secs, subsec)
}
