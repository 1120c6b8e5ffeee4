//! Output Formatting
//!
//! Human-readable output: one line per candidate with the mean time per
//! call and its standard error, names padded to a common width.

use fluxtimer_report::{Report, format_duration};

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str(&format!(
        "FluxTimer Results: {} ({} iterations, length {}, seed {})\n",
        report.meta.suite, report.meta.iterations, report.meta.length, report.meta.seed
    ));
    output.push_str(&"=".repeat(60));
    output.push('\n');

    let width = report
        .results
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        + 1;

    for result in &report.results {
        let label = format!("{}:", result.name);
        output.push_str(&format!(
            "{:<width$} {} ± {}\n",
            label,
            format_duration(result.mean_ns as f64),
            format_duration(result.se_ns),
            width = width
        ));
    }

    if let Some(cycles_per_ns) = report.meta.cycles_per_ns {
        output.push_str(&format!("\ncycles/ns: {:.2}\n", cycles_per_ns));
    }

    output
}
