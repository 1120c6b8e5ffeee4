#![warn(missing_docs)]
//! FluxTimer Core - Measurement Runtime
//!
//! This crate provides the execution environment for candidates:
//! - [`Clock`] with a low-overhead monotonic implementation (RDTSC with Instant)
//! - [`BenchmarkRunner`] for strictly sequential, per-candidate timing
//! - [`Observer`] implementations that reject candidates whose output drifts
//! - CPU affinity pinning for stable TSC readings

mod error;
mod measure;
mod runner;
mod validate;

pub use error::HarnessError;
/// Whether this platform provides hardware cycle counters (x86_64 RDTSCP or AArch64 CNTVCT_EL0).
/// When `false`, cycle counts are reported as 0 and only wall-clock time is available.
pub use measure::HAS_CYCLE_COUNTER;
pub use measure::{Clock, MonotonicClock, Timer, pin_to_cpu};
pub use runner::{AggregateResult, BenchmarkRunner, DEFAULT_ITERATIONS, Options, run};
pub use validate::{ConsistencyValidator, Observer, ToleranceValidator, Unchecked};
