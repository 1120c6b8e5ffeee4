//! BenchmarkRunner - The Candidate Iteration Loop
//!
//! Runs every candidate in registration order, one timed call at a time:
//!
//! ```text
//! for each candidate i:
//!     warmup_iterations × call (untimed, unobserved)
//!     iterations × [ Clock::measure(call) → on_result(value, i)? → record ]
//!     accumulate → AggregateResult
//! ```
//!
//! Nothing is interleaved: a candidate's measurement window never contains
//! another candidate's execution, and the schedule depends only on the
//! candidate count and `Options`.

use crate::measure::{Clock, MonotonicClock};
use crate::{HarnessError, Observer};
use fluxtimer_stats::{Accumulator, SampleStatistics};
use tracing::debug;

/// Default number of timed iterations per candidate
pub const DEFAULT_ITERATIONS: usize = 10;

/// Upper bound on samples reserved before a candidate's first timed call
const MAX_PRERESERVED_SAMPLES: usize = 1 << 16;

/// Per-candidate timing summary returned by [`BenchmarkRunner::run`]
pub type AggregateResult = SampleStatistics;

/// Run configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Timed repetitions per candidate (must be at least 1)
    pub iterations: usize,
    /// Untimed calls made before a candidate's timed iterations
    pub warmup_iterations: usize,
}

impl Options {
    /// Options with `iterations` timed repetitions and no warmup
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            warmup_iterations: 0,
        }
    }

    /// Set the number of untimed warmup calls
    pub fn with_warmup(mut self, warmup_iterations: usize) -> Self {
        self.warmup_iterations = warmup_iterations;
        self
    }

    /// Reject options that cannot produce statistics
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.iterations == 0 {
            return Err(HarnessError::InvalidOptions(
                "iterations must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

/// Drives candidates through a [`Clock`]
#[derive(Debug, Clone, Default)]
pub struct BenchmarkRunner<C = MonotonicClock> {
    clock: C,
}

impl BenchmarkRunner<MonotonicClock> {
    /// Create a runner on the monotonic wall clock
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl<C: Clock> BenchmarkRunner<C> {
    /// Create a runner that measures with `clock`
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Clock used for measurements
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Consume the runner, returning its clock
    pub fn into_clock(self) -> C {
        self.clock
    }

    /// Time every candidate and return one result per candidate, in order.
    ///
    /// `on_result` sees each value before its duration is recorded. Any error
    /// it returns aborts the run immediately and no results are produced.
    /// Validators and plain closures both work as `on_result`.
    ///
    /// # Arguments
    /// * `candidates` - Computations under test; index = identity
    /// * `on_result` - Called with `(value, index)` after every timed call
    /// * `options` - Iteration counts, validated before any call is made
    pub fn run<R, F, O>(
        &mut self,
        candidates: &mut [F],
        mut on_result: O,
        options: &Options,
    ) -> Result<Vec<AggregateResult>, HarnessError>
    where
        F: FnMut() -> R,
        O: Observer<R>,
    {
        options.validate()?;

        let mut results = Vec::with_capacity(candidates.len());

        for (index, candidate) in candidates.iter_mut().enumerate() {
            for _ in 0..options.warmup_iterations {
                std::hint::black_box(candidate());
            }

            // Huge iteration counts grow the buffer instead of reserving it all
            let mut samples =
                Accumulator::with_capacity(options.iterations.min(MAX_PRERESERVED_SAMPLES));
            for _ in 0..options.iterations {
                let (value, elapsed) = self.clock.measure(&mut *candidate);
                on_result.observe(&value, index)?;
                samples.push(elapsed);
            }

            let stats = samples.finish()?;
            debug!(
                candidate = index,
                mean_ns = stats.mean.as_nanos() as u64,
                sd_ns = stats.sd.as_nanos() as u64,
                count = stats.count,
                "candidate complete"
            );
            results.push(stats);
        }

        Ok(results)
    }
}

/// Run `candidates` on a fresh [`MonotonicClock`]
pub fn run<R, F, O>(
    candidates: &mut [F],
    on_result: O,
    options: &Options,
) -> Result<Vec<AggregateResult>, HarnessError>
where
    F: FnMut() -> R,
    O: Observer<R>,
{
    BenchmarkRunner::new().run(candidates, on_result, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConsistencyValidator;
    use std::cell::Cell;
    use std::time::{Duration, Instant};

    /// Records the (start, end) of every measurement window
    #[derive(Default)]
    struct RecordingClock {
        windows: Vec<(Instant, Instant)>,
    }

    impl Clock for RecordingClock {
        fn measure<R, F: FnOnce() -> R>(&mut self, work: F) -> (R, Duration) {
            let start = Instant::now();
            let value = work();
            let end = Instant::now();
            self.windows.push((start, end));
            (value, end - start)
        }
    }

    /// Returns a fixed duration per call so statistics are exact
    struct FixedClock(Duration);

    impl Clock for FixedClock {
        fn measure<R, F: FnOnce() -> R>(&mut self, work: F) -> (R, Duration) {
            (work(), self.0)
        }
    }

    fn accept<R>(_: &R, _: usize) -> Result<(), HarnessError> {
        Ok(())
    }

    #[test]
    fn test_count_matches_iterations() {
        for n in [1, 2, 7] {
            let mut candidates: Vec<Box<dyn FnMut() -> u32>> =
                vec![Box::new(|| 1), Box::new(|| 2), Box::new(|| 3)];
            let results = run(&mut candidates, accept, &Options::new(n)).unwrap();

            assert_eq!(results.len(), 3);
            assert!(results.iter().all(|r| r.count == n));
        }
    }

    #[test]
    fn test_zero_iterations_rejected_before_calls() {
        let calls = Cell::new(0);
        let mut candidates = [|| calls.set(calls.get() + 1)];

        let err = run(&mut candidates, accept, &Options::new(0)).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidOptions(_)));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_warmup_calls_are_not_observed() {
        let calls = Cell::new(0);
        let observed = Cell::new(0);
        let mut candidates = [|| calls.set(calls.get() + 1)];

        let results = run(
            &mut candidates,
            |_: &(), _: usize| {
                observed.set(observed.get() + 1);
                Ok(())
            },
            &Options::new(4).with_warmup(3),
        )
        .unwrap();

        assert_eq!(calls.get(), 7);
        assert_eq!(observed.get(), 4);
        assert_eq!(results[0].count, 4);
    }

    #[test]
    fn test_divergence_aborts_run() {
        let first = Cell::new(true);
        let later_calls = Cell::new(0);
        let mut flipping = || if first.replace(false) { 1.0 } else { 2.0 };
        let mut later = || {
            later_calls.set(later_calls.get() + 1);
            0.0
        };
        let mut candidates: Vec<&mut dyn FnMut() -> f64> = vec![&mut flipping, &mut later];

        let err = run(
            &mut candidates,
            ConsistencyValidator::<f64>::new(),
            &Options::new(5),
        )
        .unwrap_err();

        assert_eq!(
            err,
            HarnessError::ResultDivergence {
                index: 0,
                reference: "1.0".to_string(),
                observed: "2.0".to_string(),
            }
        );
        assert_eq!(later_calls.get(), 0);
    }

    #[test]
    fn test_observer_sees_value_and_index() {
        let mut seen = Vec::new();
        let mut candidates: Vec<fn() -> i32> = vec![|| 10, || 20];
        run(
            &mut candidates,
            |v: &i32, i: usize| {
                seen.push((*v, i));
                Ok(())
            },
            &Options::new(2),
        )
        .unwrap();

        assert_eq!(seen, vec![(10, 0), (10, 0), (20, 1), (20, 1)]);
    }

    #[test]
    fn test_windows_do_not_overlap_across_candidates() {
        let iterations = 5;
        let mut candidates: Vec<Box<dyn FnMut() -> u64>> = vec![
            Box::new(|| (0..1000u64).sum()),
            Box::new(|| (0..10u64).product()),
        ];

        let mut runner = BenchmarkRunner::with_clock(RecordingClock::default());
        runner
            .run(&mut candidates, accept, &Options::new(iterations))
            .unwrap();

        let windows = runner.into_clock().windows;
        assert_eq!(windows.len(), 2 * iterations);

        let (first, second) = windows.split_at(iterations);
        for &(start_a, end_a) in first {
            for &(start_b, end_b) in second {
                assert!(end_a <= start_b || end_b <= start_a);
            }
        }
    }

    #[test]
    fn test_results_follow_registration_order() {
        let slow = || {
            std::thread::sleep(Duration::from_millis(2));
            1u8
        };
        let fast = || 2u8;
        let mut candidates: Vec<Box<dyn FnMut() -> u8>> = vec![Box::new(slow), Box::new(fast)];

        let results = run(&mut candidates, accept, &Options::new(5)).unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].mean > results[1].mean);
        assert!(results[0].mean >= Duration::from_millis(1));
    }

    #[test]
    fn test_fixed_clock_statistics() {
        let mut runner = BenchmarkRunner::with_clock(FixedClock(Duration::from_micros(3)));
        let mut candidates = [|| ()];
        let results = runner
            .run(&mut candidates, accept, &Options::new(4))
            .unwrap();

        assert_eq!(results[0].mean, Duration::from_micros(3));
        assert_eq!(results[0].sd, Duration::ZERO);
    }

    #[test]
    fn test_huge_iteration_count_does_not_preallocate() {
        let calls = Cell::new(0);
        let mut candidates = [|| {
            calls.set(calls.get() + 1);
            1u8
        }];

        let err = run(
            &mut candidates,
            |_: &u8, i: usize| Err(HarnessError::divergence(i, &1u8, &2u8)),
            &Options::new(usize::MAX),
        )
        .unwrap_err();

        assert!(err.is_divergence());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.iterations, DEFAULT_ITERATIONS);
        assert_eq!(options.warmup_iterations, 0);
        assert!(options.validate().is_ok());
    }
}
