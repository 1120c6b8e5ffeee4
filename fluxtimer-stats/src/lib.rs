#![warn(missing_docs)]
//! FluxTimer Statistical Engine
//!
//! Folds the timing samples collected for one candidate into summary
//! statistics:
//! - Exact integer mean
//! - Sample standard deviation (n - 1), applied identically to every candidate
//! - Extremes of the sample set

mod summary;

pub use summary::{Accumulator, SampleStatistics, StatsError, accumulate};

/// Nanoseconds per second, used when rebuilding `Duration`s from `u128` totals
pub const NANOS_PER_SEC: u128 = 1_000_000_000;
