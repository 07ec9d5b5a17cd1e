//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use std::time::Duration;

use terminal_size::{terminal_size, Width};

use crate::reduction::dot_product::{ContentionReport, DotReport};
use crate::registry::{BenchmarkResult, KernelRegistry, KernelRunner};
use crate::vector::daxpy::DaxpyReport;

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Human-readable duration with a unit picked by magnitude
pub fn format_duration(d: Duration) -> String {
    let ns = d.as_nanos() as f64;
    if ns >= 1e9 {
        format!("{:.3} s", ns / 1e9)
    } else if ns >= 1e6 {
        format!("{:.3} ms", ns / 1e6)
    } else if ns >= 1e3 {
        format!("{:.3} µs", ns / 1e3)
    } else {
        format!("{:.0} ns", ns)
    }
}

/// Print kernel info box
pub fn print_kernel_info_box(kernel: &dyn KernelRunner, workers: usize) {
    let term_width = get_term_width();
    let max_content_width = term_width.saturating_sub(4).max(40);

    let lines = [
        format!("Kernel:   {}", kernel.name()),
        format!("Category: {}", kernel.category()),
        kernel.description().to_string(),
        format!("Variants: {}", kernel.available_variants().join(", ")),
        format!("Workers:  {}", workers),
    ];

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(60)
        .min(max_content_width);
    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    for (i, line) in lines.iter().enumerate() {
        if i == 3 {
            println!("├{}┤", border);
        }
        println!(
            "│ {:<width$} │",
            truncate(line, content_width),
            width = content_width
        );
    }
    println!("└{}┘", border);
    println!();
}

/// Print results table for a single size.
///
/// Speedup and relative error are against the first row.
pub fn print_results_table(results: &[BenchmarkResult], size: usize) {
    if results.is_empty() {
        return;
    }

    let term_width = get_term_width();
    let variant_col_width = term_width.saturating_sub(72).max(20);
    let table_width = variant_col_width + 64 + 6;

    let baseline_time = results
        .first()
        .map(|r| r.avg_nanos_f64)
        .unwrap_or(1.0);
    let baseline_result = results.first().and_then(|r| r.result_sample);

    println!("  Size: {} ({} runs)", size, results[0].iterations);
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<v_width$} {:>12} {:>12} {:>12} {:>9} {:>9} {:>10}",
        "Variant",
        "Median",
        "Min",
        "Max",
        "Speedup",
        "CV",
        "Rel. Error",
        v_width = variant_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for result in results {
        let speedup = if result.avg_nanos_f64 > 0.0 {
            baseline_time / result.avg_nanos_f64
        } else {
            0.0
        };
        let cv = if result.avg_nanos_f64 > 0.0 {
            result.std_dev.as_nanos() as f64 / result.avg_nanos_f64
        } else {
            0.0
        };
        let relative_error = match (result.result_sample, baseline_result) {
            (Some(res), Some(base)) => {
                let diff = (res - base).abs();
                if base.abs() > 1e-9 { diff / base.abs() } else { diff }
            }
            _ => 0.0,
        };

        println!(
            "  {:<v_width$} {:>12} {:>12} {:>12} {:>8.2}x {:>8.2}% {:>10.2e}",
            truncate(&result.name, variant_col_width),
            format_duration(result.median_time),
            format_duration(result.min_time),
            format_duration(result.max_time),
            speedup,
            cv * 100.0,
            relative_error,
            v_width = variant_col_width
        );
    }
    println!();
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " Fork-Join Kernels ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

/// Print the list of available kernels
pub fn print_available_kernels(registry: &KernelRegistry) {
    println!("Available kernels:");
    println!();
    for kernel in registry.all() {
        println!(
            "  {:<20} [{}] - {}",
            kernel.name(),
            kernel.category(),
            kernel.description()
        );
    }
}

/// Exponential notation with a signed, two-digit minimum exponent
/// (`1.86680e+09`), as printf's `%e` writes it.
pub fn format_exp(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*e}", precision, value);
    match formatted.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        // inf and NaN carry no exponent
        None => formatted,
    }
}

/// Expected and computed value of one reduction, in exponential notation
pub fn print_dot_report(report: &DotReport) {
    println!("Expected result: {}", format_exp(report.expected, 5));
    println!("Computed result: {}", format_exp(report.computed, 5));
    println!("Strategy:        {}", report.strategy.name());
    println!("Max threads:  {:3}", report.workers);
    println!("Elapsed time: {}s", format_exp(report.elapsed.as_secs_f64(), 3));
}

pub fn print_daxpy_report(report: &DaxpyReport) {
    println!("Max threads:  {:3}", report.workers);
    println!("Elapsed time: {}s", format_exp(report.elapsed.as_secs_f64(), 3));
}

pub fn print_contention_report(report: &ContentionReport, workers: usize) {
    println!(
        "Per-worker combine:  {} ({} workers)",
        format_duration(report.per_worker),
        workers
    );
    println!(
        "Per-element combine: {} ({:.1}x)",
        format_duration(report.per_element),
        report.ratio
    );
    if report.flagged {
        println!("Per-element combine is contended: one atomic add per element serializes the workers.");
    }
}
