//! Suite Executor
//!
//! Runs a planned suite and turns the runner output into a report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Suite + Input
//!       │
//!       ▼
//! ┌─────────────┐
//! │   planner   │  Regex selection, registration order kept
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  execution  │  BenchmarkRunner + result validation
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Report with standard errors
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```

mod execution;
mod formatting;
mod report;

pub use execution::{Execution, ExecutionConfig, build_observer, execute};
pub use formatting::format_human_output;
pub use report::build_report;
