//! Harness errors
//!
//! None of these are transient: each one points at a mistake in the
//! benchmark setup or in the code being measured, so the runner never
//! retries and never returns partial results.

use fluxtimer_stats::StatsError;
use std::fmt::Debug;

/// Errors raised while running candidates
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HarnessError {
    /// A candidate returned a value that differs from its first iteration
    #[error("candidate {index} diverged: first returned {reference}, then {observed}")]
    ResultDivergence {
        /// Registration index of the offending candidate
        index: usize,
        /// Value from the candidate's first iteration (`Debug` rendering)
        reference: String,
        /// Value that failed the comparison (`Debug` rendering)
        observed: String,
    },

    /// Statistics were requested over zero samples
    #[error(transparent)]
    EmptySampleSet(#[from] StatsError),

    /// Options rejected before any timing started
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl HarnessError {
    /// Build a divergence error from the two conflicting values
    pub fn divergence<R: Debug + ?Sized>(index: usize, reference: &R, observed: &R) -> Self {
        HarnessError::ResultDivergence {
            index,
            reference: format!("{:?}", reference),
            observed: format!("{:?}", observed),
        }
    }

    /// Whether this error reports a correctness defect in a candidate
    pub fn is_divergence(&self) -> bool {
        matches!(self, HarnessError::ResultDivergence { .. })
    }
}
