//! Result Validation
//!
//! Observers inspect every value a candidate returns and decide whether the
//! run may continue. The runner only sees an [`Observer`], so the comparison
//! policy can change without touching it:
//! - [`ConsistencyValidator`]: exact equality against the first value
//! - [`ToleranceValidator`]: relative/absolute tolerance for `f64` results
//! - [`Unchecked`]: accepts everything
//!
//! Any `FnMut(&R, usize) -> Result<(), HarnessError>` closure is an observer
//! as well.

use crate::HarnessError;
use std::fmt::Debug;
use tracing::trace;

/// Inspects one candidate result per (candidate, iteration) pair
pub trait Observer<R> {
    /// Check `value` produced by candidate `index`
    fn observe(&mut self, value: &R, index: usize) -> Result<(), HarnessError>;
}

impl<R, F> Observer<R> for F
where
    F: FnMut(&R, usize) -> Result<(), HarnessError>,
{
    fn observe(&mut self, value: &R, index: usize) -> Result<(), HarnessError> {
        self(value, index)
    }
}

/// Per-candidate reference slots shared by the comparing validators
#[derive(Debug, Clone)]
struct References<R> {
    slots: Vec<Option<R>>,
}

impl<R: Clone + Debug> References<R> {
    fn new() -> Self {
        Self { slots: Vec::new() }
    }

    fn get(&self, index: usize) -> Option<&R> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Compare against the stored reference, storing `value` if there is none
    fn check<F>(&mut self, value: &R, index: usize, same: F) -> Result<(), HarnessError>
    where
        F: FnOnce(&R, &R) -> bool,
    {
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }

        if let Some(reference) = &self.slots[index] {
            return if same(reference, value) {
                Ok(())
            } else {
                Err(HarnessError::divergence(index, reference, value))
            };
        }

        trace!(candidate = index, reference = ?value, "stored reference value");
        self.slots[index] = Some(value.clone());
        Ok(())
    }
}

/// Requires every candidate to return exactly the value of its first call
#[derive(Debug, Clone)]
pub struct ConsistencyValidator<R> {
    references: References<R>,
}

impl<R: PartialEq + Clone + Debug> ConsistencyValidator<R> {
    /// Create a validator with no stored references
    pub fn new() -> Self {
        Self {
            references: References::new(),
        }
    }

    /// Reference value stored for candidate `index`
    pub fn reference(&self, index: usize) -> Option<&R> {
        self.references.get(index)
    }
}

impl<R: PartialEq + Clone + Debug> Default for ConsistencyValidator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: PartialEq + Clone + Debug> Observer<R> for ConsistencyValidator<R> {
    fn observe(&mut self, value: &R, index: usize) -> Result<(), HarnessError> {
        self.references.check(value, index, |a, b| a == b)
    }
}

/// Accepts `f64` results close to the first value.
///
/// Two values match when `|a - b| <= max(absolute, relative * max(|a|, |b|))`.
/// The absolute bound covers references at or near zero, where any relative
/// bound collapses. `NaN` never matches, not even another `NaN`.
#[derive(Debug, Clone)]
pub struct ToleranceValidator {
    relative: f64,
    absolute: f64,
    references: References<f64>,
}

impl ToleranceValidator {
    /// Create a validator with both a relative and an absolute bound
    pub fn new(relative: f64, absolute: f64) -> Result<Self, HarnessError> {
        check_tolerance("relative", relative)?;
        check_tolerance("absolute", absolute)?;
        Ok(Self {
            relative,
            absolute,
            references: References::new(),
        })
    }

    /// Create a validator accepting `|a - b| <= relative * max(|a|, |b|)`
    pub fn relative(relative: f64) -> Result<Self, HarnessError> {
        Self::new(relative, 0.0)
    }

    /// Create a validator accepting `|a - b| <= absolute`
    pub fn absolute(absolute: f64) -> Result<Self, HarnessError> {
        Self::new(0.0, absolute)
    }

    /// Reference value stored for candidate `index`
    pub fn reference(&self, index: usize) -> Option<f64> {
        self.references.get(index).copied()
    }
}

fn check_tolerance(kind: &str, tolerance: f64) -> Result<(), HarnessError> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(HarnessError::InvalidOptions(format!(
            "{} tolerance must be a finite non-negative number, got {}",
            kind, tolerance
        )));
    }
    Ok(())
}

impl Observer<f64> for ToleranceValidator {
    fn observe(&mut self, value: &f64, index: usize) -> Result<(), HarnessError> {
        let (relative, absolute) = (self.relative, self.absolute);
        self.references.check(value, index, |a, b| {
            let bound = absolute.max(relative * a.abs().max(b.abs()));
            a == b || (a - b).abs() <= bound
        })
    }
}

/// Skips validation entirely
#[derive(Debug, Clone, Copy, Default)]
pub struct Unchecked;

impl<R> Observer<R> for Unchecked {
    fn observe(&mut self, _value: &R, _index: usize) -> Result<(), HarnessError> {
        Ok(())
    }
}
