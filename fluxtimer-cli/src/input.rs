//! Synthetic Input
//!
//! Seeded uniform `[0, 1)` data shared by every candidate of a suite, plus a
//! denominator drawn from the same stream and its precomputed reciprocal.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Input vector and scalar constants for a run
#[derive(Debug, Clone)]
pub struct Input {
    values: Vec<f64>,
    denom: f64,
    recip: f64,
}

impl Input {
    /// Generate `length` values from `seed`
    pub fn generate(length: usize, seed: u64) -> anyhow::Result<Self> {
        if length == 0 {
            anyhow::bail!("input length must be at least 1");
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let values: Vec<f64> = (0..length).map(|_| rng.r#gen::<f64>()).collect();
        let denom: f64 = rng.r#gen();

        Ok(Self {
            values,
            denom,
            recip: 1.0 / denom,
        })
    }

    /// Simulated data (never empty)
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of simulated values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the input holds no values (never true once generated)
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Denominator `f`
    pub fn denom(&self) -> f64 {
        self.denom
    }

    /// Reciprocal `r = 1 / f`
    pub fn recip(&self) -> f64 {
        self.recip
    }
}
