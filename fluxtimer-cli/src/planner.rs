//! Candidate Planner
//!
//! Selects the candidates of a suite to run.
//!
//! Filtering: regex pattern matching on the candidate name.
//!
//! Ordering: selected candidates keep their registration order, since the
//! runner reports results by position.

use crate::suites::Candidate;
use regex::Regex;

/// Candidates selected for a run
pub struct ExecutionPlan<'a> {
    /// Names in run order (parallel with `candidates`)
    pub names: Vec<&'static str>,
    /// Computations in run order
    pub candidates: Vec<Box<dyn FnMut() -> f64 + 'a>>,
}

impl ExecutionPlan<'_> {
    /// Whether nothing was selected
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Build an execution plan from a suite's candidates
pub fn build_plan<'a>(
    candidates: impl IntoIterator<Item = Candidate<'a>>,
    filter: Option<&Regex>,
) -> ExecutionPlan<'a> {
    let (names, candidates) = candidates
        .into_iter()
        .filter(|c| filter.is_none_or(|re| re.is_match(c.name)))
        .map(|c| (c.name, c.run))
        .unzip();

    ExecutionPlan { names, candidates }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_candidate(name: &'static str, value: f64) -> Candidate<'static> {
        Candidate {
            name,
            run: Box::new(move || value),
        }
    }

    fn sample() -> Vec<Candidate<'static>> {
        vec![
            make_candidate("log2(x / f + 1)", 1.0),
            make_candidate("x / f", 2.0),
            make_candidate("x * r", 3.0),
        ]
    }

    #[test]
    fn test_no_filter_keeps_order() {
        let plan = build_plan(sample(), None);
        assert_eq!(plan.names, vec!["log2(x / f + 1)", "x / f", "x * r"]);
    }

    #[test]
    fn test_regex_filter() {
        let re = Regex::new(r"^x ").unwrap();
        let mut plan = build_plan(sample(), Some(&re));

        assert_eq!(plan.names, vec!["x / f", "x * r"]);
        assert_eq!((plan.candidates[0])(), 2.0);
        assert_eq!((plan.candidates[1])(), 3.0);
    }

    #[test]
    fn test_filter_matching_nothing() {
        let re = Regex::new("sqrt").unwrap();
        assert!(build_plan(sample(), Some(&re)).is_empty());
    }
}
