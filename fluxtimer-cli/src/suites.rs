//! Candidate Suites
//!
//! Each suite compares algebraically equivalent ways of transforming the
//! synthetic input. Every candidate writes into its own output buffer and
//! returns `out[0] + out[len / 2] + out[len - 1]`, which the runner checks
//! for stability across iterations.

use crate::input::Input;
use std::f64::consts::LN_2;

/// A named candidate computation
pub struct Candidate<'a> {
    /// Display name
    pub name: &'static str,
    /// Computation under test
    pub run: Box<dyn FnMut() -> f64 + 'a>,
}

impl std::fmt::Debug for Candidate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate").field("name", &self.name).finish()
    }
}

/// Built-in suites
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Suite {
    /// Division versus reciprocal multiplication
    #[value(name = "divmul")]
    DivMul,
    /// Log-normalization variants
    #[value(name = "lognorm")]
    LogNorm,
}

const DIVMUL_NAMES: [&str; 2] = ["x / f", "x * r"];

const LOGNORM_NAMES: [&str; 6] = [
    "log1p(x / f) / M",
    "log1p(x * r) * N",
    "log2(x / f + 1)",
    "log2(x * r + 1)",
    "log(x / f + 1) / M",
    "log(x * r + 1) * N",
];

impl Suite {
    /// Every built-in suite
    pub const ALL: [Suite; 2] = [Suite::DivMul, Suite::LogNorm];

    /// Identifier used on the command line
    pub fn id(self) -> &'static str {
        match self {
            Suite::DivMul => "divmul",
            Suite::LogNorm => "lognorm",
        }
    }

    /// One-line description
    pub fn description(self) -> &'static str {
        match self {
            Suite::DivMul => "Division/multiplication performance tests",
            Suite::LogNorm => "Log-normalization performance tests",
        }
    }

    /// Candidate names in registration order
    pub fn candidate_names(self) -> &'static [&'static str] {
        match self {
            Suite::DivMul => &DIVMUL_NAMES,
            Suite::LogNorm => &LOGNORM_NAMES,
        }
    }

    /// Build the candidates over `input`, in registration order
    pub fn build(self, input: &Input) -> Vec<Candidate<'_>> {
        let f = input.denom();
        let r = input.recip();
        let x = input.values();

        match self {
            Suite::DivMul => vec![
                kernel(DIVMUL_NAMES[0], x, move |v| v / f),
                kernel(DIVMUL_NAMES[1], x, move |v| v * r),
            ],
            Suite::LogNorm => {
                // M = ln 2, N = 1 / M
                let m = LN_2;
                let n = 1.0 / LN_2;
                vec![
                    kernel(LOGNORM_NAMES[0], x, move |v| (v / f).ln_1p() / m),
                    kernel(LOGNORM_NAMES[1], x, move |v| (v * r).ln_1p() * n),
                    kernel(LOGNORM_NAMES[2], x, move |v| (v / f + 1.0).log2()),
                    kernel(LOGNORM_NAMES[3], x, move |v| (v * r + 1.0).log2()),
                    kernel(LOGNORM_NAMES[4], x, move |v| (v / f + 1.0).ln() / m),
                    kernel(LOGNORM_NAMES[5], x, move |v| (v * r + 1.0).ln() * n),
                ]
            }
        }
    }
}

/// Wrap an element-wise operation into a candidate with its own output buffer
fn kernel<'a, K>(name: &'static str, input: &'a [f64], op: K) -> Candidate<'a>
where
    K: Fn(f64) -> f64 + 'a,
{
    let mut out = vec![0.0; input.len()];
    Candidate {
        name,
        run: Box::new(move || {
            for (o, &v) in out.iter_mut().zip(input) {
                *o = op(v);
            }
            let len = out.len();
            out[0] + out[len / 2] + out[len - 1]
        }),
    }
}
