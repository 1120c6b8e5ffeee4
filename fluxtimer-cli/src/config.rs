//! Configuration loading from fluxtimer.toml
//!
//! Settings can be placed in a `fluxtimer.toml` file in the project root.
//! The file is discovered by walking up from the current directory, and
//! command-line flags override whatever it contains.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up by [`FluxTimerConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "fluxtimer.toml";

/// FluxTimer configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FluxTimerConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Synthetic input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Timed iterations per candidate
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Untimed warmup calls per candidate
    #[serde(default)]
    pub warmup_iterations: usize,
    /// Relative tolerance for comparing results
    #[serde(default)]
    pub tolerance: Option<f64>,
    /// Absolute tolerance for comparing results (exact comparison if neither is set)
    #[serde(default)]
    pub absolute_tolerance: Option<f64>,
    /// Pin the benchmarking thread to this CPU core
    #[serde(default)]
    pub pin_cpu: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            warmup_iterations: 0,
            tolerance: None,
            absolute_tolerance: None,
            pin_cpu: None,
        }
    }
}

fn default_iterations() -> usize {
    fluxtimer_core::DEFAULT_ITERATIONS
}

/// Synthetic input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Length of the simulated vector
    #[serde(default = "default_length")]
    pub length: usize,
    /// Seed for the simulated data
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            length: default_length(),
            seed: default_seed(),
        }
    }
}

fn default_length() -> usize {
    10_000_000
}
fn default_seed() -> u64 {
    69
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl FluxTimerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` looking for a configuration file
    pub fn discover_from(start: &Path) -> Option<Self> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), "ignoring config: {e}");
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }
}
