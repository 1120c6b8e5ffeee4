#![warn(missing_docs)]
//! FluxTimer CLI Library
//!
//! Command-line front end for the built-in suites: generates the synthetic
//! input, runs the selected candidates through the harness and prints one
//! line per candidate.
//!
//! # Example
//!
//! ```sh
//! fluxtimer divmul --iter 20 --length 1000000
//! fluxtimer lognorm 'log2' --format json -o lognorm.json
//! fluxtimer list
//! ```

mod config;
mod executor;
mod input;
mod planner;
mod suites;

pub use config::*;
pub use executor::{
    Execution, ExecutionConfig, build_observer, build_report, execute, format_human_output,
};
pub use input::Input;
pub use planner::{ExecutionPlan, build_plan};
pub use suites::{Candidate, Suite};

use anyhow::Context;
use clap::{Parser, Subcommand};
use fluxtimer_core::Options;
use fluxtimer_report::{OutputFormat, generate_json_report};
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// FluxTimer CLI arguments
#[derive(Parser, Debug)]
#[command(name = "fluxtimer")]
#[command(author, version, about = "FluxTimer - statistical micro-benchmark harness")]
pub struct Cli {
    /// Optional subcommand; runs the selected suite when absent
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suite to run
    #[arg(value_enum, default_value = "divmul")]
    pub suite: Suite,

    /// Filter candidates by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Length of the simulated vector
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Number of iterations
    #[arg(short = 'i', long = "iter")]
    pub iterations: Option<usize>,

    /// Seed for the simulated data
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Untimed warmup calls per candidate
    #[arg(long)]
    pub warmup: Option<usize>,

    /// Relative tolerance when comparing results across iterations
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Absolute tolerance when comparing results across iterations
    #[arg(long = "abs-tolerance")]
    pub abs_tolerance: Option<f64>,

    /// Output format: human, json
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pin the benchmark thread to this CPU core
    #[arg(long)]
    pub pin_cpu: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all suites and their candidates
    List,
}

/// Run the FluxTimer CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the FluxTimer CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    // Discover fluxtimer.toml configuration (CLI flags override)
    let config = FluxTimerConfig::discover().unwrap_or_default();

    match cli.command {
        Some(Commands::List) => {
            list_suites();
            Ok(())
        }
        None => run_suite(&cli, &config),
    }
}

/// Default `EnvFilter` directive; targets match by prefix, covering every fluxtimer crate
fn log_filter(verbose: bool) -> &'static str {
    if verbose { "fluxtimer=debug" } else { "fluxtimer=info" }
}

fn init_logging(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter(verbose)));

    // try_init: a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn list_suites() {
    println!("FluxTimer Suites:");
    for suite in Suite::ALL {
        println!("├── {}: {}", suite.id(), suite.description());
        for (index, name) in suite.candidate_names().iter().enumerate() {
            println!("│   ├── [{}] {}", index, name);
        }
    }
}

/// Build an ExecutionConfig by layering: fluxtimer.toml defaults → CLI overrides.
pub fn build_execution_config(cli: &Cli, config: &FluxTimerConfig) -> ExecutionConfig {
    let iterations = cli.iterations.unwrap_or(config.runner.iterations);
    let warmup = cli.warmup.unwrap_or(config.runner.warmup_iterations);

    ExecutionConfig {
        suite: cli.suite,
        options: Options::new(iterations).with_warmup(warmup),
        length: cli.length.unwrap_or(config.input.length),
        seed: cli.seed.unwrap_or(config.input.seed),
        tolerance: cli.tolerance.or(config.runner.tolerance),
        absolute_tolerance: cli.abs_tolerance.or(config.runner.absolute_tolerance),
        pin_cpu: cli.pin_cpu.or(config.runner.pin_cpu),
        show_progress: true,
    }
}

fn run_suite(cli: &Cli, config: &FluxTimerConfig) -> anyhow::Result<()> {
    let exec_config = build_execution_config(cli, config);
    exec_config.options.validate()?;

    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let filter = Regex::new(&cli.filter)
        .with_context(|| format!("invalid candidate filter '{}'", cli.filter))?;

    if let Some(cpu) = exec_config.pin_cpu {
        if let Err(e) = fluxtimer_core::pin_to_cpu(cpu) {
            warn!(cpu, "failed to pin thread: {}", e);
        }
    }

    info!(
        suite = exec_config.suite.id(),
        length = exec_config.length,
        seed = exec_config.seed,
        "generating input"
    );
    let input = Input::generate(exec_config.length, exec_config.seed)?;

    let mut plan = build_plan(exec_config.suite.build(&input), Some(&filter));
    if plan.is_empty() {
        anyhow::bail!(
            "no candidate of suite '{}' matches '{}'",
            exec_config.suite.id(),
            cli.filter
        );
    }

    info!(
        candidates = plan.names.len(),
        iterations = exec_config.options.iterations,
        "running suite"
    );
    let execution = execute(&mut plan, &exec_config)?;
    let report = build_report(&exec_config, &execution);

    let output = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Human => format_human_output(&report),
    };

    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_come_from_config() {
        let cli = Cli::parse_from(["fluxtimer"]);
        let mut config = FluxTimerConfig::default();
        config.runner.iterations = 4;
        config.input.seed = 1;

        let exec = build_execution_config(&cli, &config);
        assert_eq!(exec.suite, Suite::DivMul);
        assert_eq!(exec.options.iterations, 4);
        assert_eq!(exec.seed, 1);
        assert_eq!(exec.length, 10_000_000);
        assert!(exec.tolerance.is_none());
        assert!(exec.absolute_tolerance.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "fluxtimer", "lognorm", "log2", "-l", "500", "-i", "7", "-s", "3", "--warmup", "2",
            "--tolerance", "1e-9", "--abs-tolerance", "1e-15",
        ]);
        let exec = build_execution_config(&cli, &FluxTimerConfig::default());

        assert_eq!(exec.suite, Suite::LogNorm);
        assert_eq!(cli.filter, "log2");
        assert_eq!(exec.length, 500);
        assert_eq!(exec.options, Options::new(7).with_warmup(2));
        assert_eq!(exec.seed, 3);
        assert_eq!(exec.tolerance, Some(1e-9));
        assert_eq!(exec.absolute_tolerance, Some(1e-15));
    }

    #[test]
    fn test_absolute_tolerance_from_config() {
        let cli = Cli::parse_from(["fluxtimer"]);
        let mut config = FluxTimerConfig::default();
        config.runner.absolute_tolerance = Some(1e-12);

        let exec = build_execution_config(&cli, &config);
        assert_eq!(exec.absolute_tolerance, Some(1e-12));
        assert!(exec.tolerance.is_none());
    }

    #[test]
    fn test_suite_is_a_top_level_positional() {
        let cli = Cli::parse_from(["fluxtimer", "lognorm", "log2"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.suite, Suite::LogNorm);
        assert_eq!(cli.filter, "log2");
    }

    #[test]
    fn test_default_log_filter_parses() {
        assert!(EnvFilter::try_new(log_filter(false)).is_ok());
        assert_eq!(log_filter(true), "fluxtimer=debug");
    }

    #[test]
    fn test_list_subcommand() {
        let cli = Cli::parse_from(["fluxtimer", "list"]);
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let cli = Cli::parse_from(["fluxtimer", "-i", "0", "-l", "10"]);
        let err = run_suite(&cli, &FluxTimerConfig::default()).unwrap_err();
        assert!(err.to_string().contains("iterations"));
    }

    #[test]
    fn test_run_writes_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let cli = Cli::parse_from([
            "fluxtimer",
            "divmul",
            "-l",
            "256",
            "-i",
            "3",
            "--format",
            "json",
            "-o",
            path.to_str().unwrap(),
        ]);

        run_suite(&cli, &FluxTimerConfig::default()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["meta"]["length"], 256);
        assert_eq!(json["results"].as_array().unwrap().len(), 2);
        assert_eq!(json["results"][1]["name"], "x * r");
        assert_eq!(json["results"][0]["count"], 3);
    }
}
