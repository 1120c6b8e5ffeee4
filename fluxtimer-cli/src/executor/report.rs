//! Report Building
//!
//! Pairs each candidate's statistics with its name and the run settings.
//! Standard errors are derived here, not by the statistics engine.

use super::execution::{Execution, ExecutionConfig};
use fluxtimer_report::{CandidateResult, Report, ReportMeta};

/// Build a complete Report from a finished run
pub fn build_report(config: &ExecutionConfig, execution: &Execution) -> Report {
    let mut meta = ReportMeta::new(
        config.suite.id(),
        config.options.iterations,
        config.options.warmup_iterations,
        config.length,
        config.seed,
    );
    meta.tolerance = config.tolerance;
    meta.absolute_tolerance = config.absolute_tolerance;
    meta.cycles_per_ns = execution.cycles_per_ns;

    let results = execution
        .names
        .iter()
        .zip(&execution.results)
        .enumerate()
        .map(|(index, (name, stats))| CandidateResult::from_stats(index, *name, stats))
        .collect();

    Report { meta, results }
}
