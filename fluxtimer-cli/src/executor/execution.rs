//! Suite Execution
//!
//! Drives the planned candidates through a [`BenchmarkRunner`], validating
//! every result with the configured observer and reporting progress between
//! measurements.

use crate::planner::ExecutionPlan;
use crate::suites::Suite;
use anyhow::Context;
use fluxtimer_core::{
    AggregateResult, BenchmarkRunner, ConsistencyValidator, HAS_CYCLE_COUNTER, HarnessError,
    Observer, Options, ToleranceValidator,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Settings for one suite run, after layering config file and CLI flags
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Suite to run
    pub suite: Suite,
    /// Runner options
    pub options: Options,
    /// Length of the synthetic input
    pub length: usize,
    /// Seed of the synthetic input
    pub seed: u64,
    /// Relative tolerance for result comparison
    pub tolerance: Option<f64>,
    /// Absolute tolerance for result comparison
    ///
    /// Results are compared exactly when neither tolerance is set.
    pub absolute_tolerance: Option<f64>,
    /// CPU core to pin the benchmark thread to
    pub pin_cpu: Option<usize>,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            suite: Suite::DivMul,
            options: Options::default(),
            length: 10_000_000,
            seed: 69,
            tolerance: None,
            absolute_tolerance: None,
            pin_cpu: None,
            show_progress: true,
        }
    }
}

/// Output of a successful run
#[derive(Debug)]
pub struct Execution {
    /// Candidate names (parallel with `results`)
    pub names: Vec<&'static str>,
    /// Per-candidate statistics in run order
    pub results: Vec<AggregateResult>,
    /// Measured cycles per nanosecond, if the platform has a cycle counter
    pub cycles_per_ns: Option<f64>,
}

/// Choose the result validation policy
pub fn build_observer(
    relative: Option<f64>,
    absolute: Option<f64>,
) -> Result<Box<dyn Observer<f64>>, HarnessError> {
    let observer: Box<dyn Observer<f64>> = match (relative, absolute) {
        (None, None) => Box::new(ConsistencyValidator::<f64>::new()),
        (relative, absolute) => Box::new(ToleranceValidator::new(
            relative.unwrap_or(0.0),
            absolute.unwrap_or(0.0),
        )?),
    };
    Ok(observer)
}

/// Run every planned candidate
pub fn execute(plan: &mut ExecutionPlan<'_>, config: &ExecutionConfig) -> anyhow::Result<Execution> {
    let mut observer = build_observer(config.tolerance, config.absolute_tolerance)?;

    let total = plan
        .candidates
        .len()
        .saturating_mul(config.options.iterations) as u64;
    let pb = if config.show_progress {
        ProgressBar::new(total)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let names = &plan.names;
    let mut current: Option<usize> = None;
    let mut runner = BenchmarkRunner::new();

    let outcome = runner.run(
        &mut plan.candidates,
        |value: &f64, index: usize| -> Result<(), HarnessError> {
            observer.observe(value, index)?;
            if current != Some(index) {
                current = Some(index);
                debug!(candidate = names[index], value, "reference value");
                pb.set_message(names[index]);
            }
            pb.inc(1);
            Ok(())
        },
        &config.options,
    );

    let results = match outcome {
        Ok(results) => results,
        Err(e) => {
            pb.abandon();
            let context = match &e {
                HarnessError::ResultDivergence { index, .. } => {
                    format!("candidate '{}' is not deterministic", names[*index])
                }
                _ => "benchmark run failed".to_string(),
            };
            return Err(e).context(context);
        }
    };
    pb.finish_and_clear();

    let clock = runner.clock();
    let cycles_per_ns = (HAS_CYCLE_COUNTER && clock.total_cycles() > 0).then(|| clock.cycles_per_ns());
    debug!(
        measurements = clock.measurements(),
        elapsed_ms = clock.total_elapsed().as_secs_f64() * 1000.0,
        "run complete"
    );

    Ok(Execution {
        names: plan.names.clone(),
        results,
        cycles_per_ns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;
    use crate::planner::build_plan;
    use crate::suites::Candidate;
    use std::cell::Cell;

    fn quiet(iterations: usize) -> ExecutionConfig {
        ExecutionConfig {
            options: Options::new(iterations),
            show_progress: false,
            ..ExecutionConfig::default()
        }
    }

    #[test]
    fn test_execute_divmul() {
        let input = Input::generate(1024, 69).unwrap();
        let mut plan = build_plan(Suite::DivMul.build(&input), None);

        let execution = execute(&mut plan, &quiet(3)).unwrap();
        assert_eq!(execution.names, vec!["x / f", "x * r"]);
        assert_eq!(execution.results.len(), 2);
        assert!(execution.results.iter().all(|r| r.count == 3));
    }

    #[test]
    fn test_divergence_names_candidate() {
        let calls = Cell::new(0.0);
        let candidates = vec![Candidate {
            name: "drifting",
            run: Box::new(|| {
                calls.set(calls.get() + 1.0);
                calls.get()
            }),
        }];
        let mut plan = build_plan(candidates, None);

        let err = execute(&mut plan, &quiet(4)).unwrap_err();
        assert!(err.to_string().contains("drifting"));
        assert!(matches!(
            err.downcast_ref::<HarnessError>(),
            Some(HarnessError::ResultDivergence { index: 0, .. })
        ));
    }

    #[test]
    fn test_tolerance_absorbs_small_drift() {
        let calls = Cell::new(0u32);
        let candidates = vec![Candidate {
            name: "wobbly",
            run: Box::new(|| {
                calls.set(calls.get() + 1);
                1.0 + calls.get() as f64 * 1e-15
            }),
        }];
        let mut plan = build_plan(candidates, None);

        let config = ExecutionConfig {
            tolerance: Some(1e-12),
            ..quiet(5)
        };
        assert!(execute(&mut plan, &config).is_ok());
    }

    #[test]
    fn test_absolute_tolerance_absorbs_drift_from_zero() {
        let calls = Cell::new(0u32);
        let drifting = || {
            calls.set(calls.get() + 1);
            if calls.get() == 1 { 0.0 } else { 1e-300 }
        };

        let mut plan = build_plan(
            vec![Candidate {
                name: "settling",
                run: Box::new(drifting),
            }],
            None,
        );
        let relative_only = ExecutionConfig {
            tolerance: Some(1e-6),
            ..quiet(3)
        };
        assert!(execute(&mut plan, &relative_only).is_err());

        calls.set(0);
        let with_absolute = ExecutionConfig {
            absolute_tolerance: Some(1e-12),
            ..relative_only
        };
        assert!(execute(&mut plan, &with_absolute).is_ok());
    }

    #[test]
    fn test_huge_iteration_count_runs_until_divergence() {
        let calls = Cell::new(0.0);
        let mut plan = build_plan(
            vec![Candidate {
                name: "counter",
                run: Box::new(|| {
                    calls.set(calls.get() + 1.0);
                    calls.get()
                }),
            }],
            None,
        );

        let err = execute(&mut plan, &quiet(usize::MAX)).unwrap_err();
        assert!(err.to_string().contains("counter"));
        assert_eq!(calls.get(), 2.0);
    }

    #[test]
    fn test_invalid_tolerance_rejected() {
        assert!(build_observer(Some(-0.5), None).is_err());
        assert!(build_observer(None, Some(f64::NAN)).is_err());
        assert!(build_observer(None, None).is_ok());
        assert!(build_observer(None, Some(1e-12)).is_ok());
    }
}
