#![warn(missing_docs)]
//! # FluxTimer
//!
//! Statistical micro-benchmark harness for comparing equivalent implementations.
//!
//! FluxTimer runs a fixed set of candidates one after another and reports,
//! per candidate, the mean call time, its standard deviation and the number
//! of samples:
//! - **Sequential Timing**: candidates never share a measurement window
//! - **Result Validation**: a candidate whose output changes between calls aborts the run
//! - **Pluggable Policies**: exact, tolerance-based or no validation
//! - **High-Precision Timing**: monotonic wall clock plus RDTSC cycle counting on x86_64
//!
//! ## Quick Start
//!
//! ```
//! use fluxtimer::{ConsistencyValidator, Options, run};
//!
//! let data: Vec<f64> = (0..1000).map(|i| i as f64).collect();
//! let f = 3.0;
//! let r = 1.0 / f;
//!
//! let mut candidates: Vec<Box<dyn FnMut() -> f64 + '_>> = vec![
//!     Box::new(|| data.iter().map(|x| x / f).sum()),
//!     Box::new(|| data.iter().map(|x| x * r).sum()),
//! ];
//!
//! let results = run(
//!     &mut candidates,
//!     ConsistencyValidator::<f64>::new(),
//!     &Options::new(10),
//! )
//! .unwrap();
//!
//! for result in &results {
//!     let se = result.sd.as_secs_f64() / (result.count as f64).sqrt();
//!     println!("{:?} ± {:.3e}s", result.mean, se);
//! }
//! ```

// Re-export core types
pub use fluxtimer_core::{
    AggregateResult, BenchmarkRunner, Clock, ConsistencyValidator, DEFAULT_ITERATIONS,
    HarnessError, MonotonicClock, Observer, Options, ToleranceValidator, Unchecked, run,
};

// Re-export stats
pub use fluxtimer_stats::{Accumulator, SampleStatistics, StatsError, accumulate};

// Re-export report types
pub use fluxtimer_report::{CandidateResult, Report, ReportMeta, format_duration};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AggregateResult, BenchmarkRunner, ConsistencyValidator, HarnessError, Observer, Options,
    };
}

/// Run the FluxTimer CLI harness.
///
/// ```ignore
/// fn main() {
///     fluxtimer::run_cli().unwrap();
/// }
/// ```
pub use fluxtimer_cli::run as run_cli;
