//! Report Data Structures

use chrono::{DateTime, Utc};
use fluxtimer_stats::SampleStatistics;
use serde::{Deserialize, Serialize};

/// Version of the JSON layout below
pub const SCHEMA_VERSION: u32 = 1;

/// Complete run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// One entry per candidate, in registration order
    pub results: Vec<CandidateResult>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Layout version
    pub schema_version: u32,
    /// Tool version that produced the report
    pub version: String,
    /// When the report was built
    pub timestamp: DateTime<Utc>,
    /// Suite that was run
    pub suite: String,
    /// Timed iterations per candidate
    pub iterations: usize,
    /// Untimed warmup calls per candidate
    pub warmup_iterations: usize,
    /// Length of the synthetic input vector
    pub length: usize,
    /// Seed of the synthetic input
    pub seed: u64,
    /// Relative tolerance used for result validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    /// Absolute tolerance used for result validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_tolerance: Option<f64>,
    /// Measured cycles per nanosecond, when a cycle counter is available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycles_per_ns: Option<f64>,
}

impl ReportMeta {
    /// Metadata stamped with the current time
    pub fn new(
        suite: impl Into<String>,
        iterations: usize,
        warmup_iterations: usize,
        length: usize,
        seed: u64,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            suite: suite.into(),
            iterations,
            warmup_iterations,
            length,
            seed,
            tolerance: None,
            absolute_tolerance: None,
            cycles_per_ns: None,
        }
    }
}

/// Timing summary of one candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResult {
    /// Registration index
    pub index: usize,
    /// Display name
    pub name: String,
    /// Mean time per call
    pub mean_ns: u64,
    /// Sample standard deviation
    pub sd_ns: u64,
    /// Standard error of the mean (`sd / sqrt(count)`)
    pub se_ns: f64,
    /// Fastest call
    pub min_ns: u64,
    /// Slowest call
    pub max_ns: u64,
    /// Number of timed calls
    pub count: usize,
}

impl CandidateResult {
    /// Build a report entry from runner statistics
    pub fn from_stats(index: usize, name: impl Into<String>, stats: &SampleStatistics) -> Self {
        let sd_ns = stats.sd.as_nanos() as f64;
        Self {
            index,
            name: name.into(),
            mean_ns: saturating_nanos(stats.mean.as_nanos()),
            sd_ns: saturating_nanos(stats.sd.as_nanos()),
            se_ns: standard_error(sd_ns, stats.count),
            min_ns: saturating_nanos(stats.min.as_nanos()),
            max_ns: saturating_nanos(stats.max.as_nanos()),
            count: stats.count,
        }
    }
}

fn standard_error(sd_ns: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sd_ns / (count as f64).sqrt()
    }
}

fn saturating_nanos(nanos: u128) -> u64 {
    u64::try_from(nanos).unwrap_or(u64::MAX)
}
