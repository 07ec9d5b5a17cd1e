//! Benchmark execution and CSV export.

use std::io::Write;

use log::info;

use super::timer::{measure_variants, TimingConfig};
use crate::registry::{BenchmarkResult, KernelRunner};

/// Raw timing data for a single variant (used for CSV export)
pub struct RawTimingData {
    pub kernel: String,
    pub variant: String,
    pub input_size: usize,
    pub workers: usize,
    pub avg_nanos: u64,
    pub median_nanos: u64,
    pub result_sample: Option<f64>,
}

/// Measure every variant of `kernel` at one size and worker count.
pub fn run_kernel(
    kernel: &dyn KernelRunner,
    size: usize,
    workers: usize,
    config: &TimingConfig,
) -> Vec<BenchmarkResult> {
    info!(
        "benchmarking {} (size {}, {} workers, {} samples)",
        kernel.name(),
        size,
        workers,
        config.runs_per_variant
    );
    measure_variants(kernel.variant_closures(size, workers), config)
}

/// Flatten results into CSV rows.
pub fn to_rows(
    kernel: &str,
    size: usize,
    workers: usize,
    results: &[BenchmarkResult],
) -> Vec<RawTimingData> {
    results
        .iter()
        .map(|r| RawTimingData {
            kernel: kernel.to_string(),
            variant: r.name.clone(),
            input_size: size,
            workers,
            avg_nanos: r.avg_nanos_f64 as u64,
            median_nanos: r.median_time.as_nanos() as u64,
            result_sample: r.result_sample,
        })
        .collect()
}

/// Write rows as CSV with a header line
pub fn write_csv<W: Write>(mut out: W, data: &[RawTimingData]) -> std::io::Result<()> {
    writeln!(out, "kernel,variant,input_size,workers,avg_time_ns,median_time_ns,result")?;

    for entry in data {
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            entry.kernel,
            entry.variant,
            entry.input_size,
            entry.workers,
            entry.avg_nanos,
            entry.median_nanos,
            entry.result_sample.map(|v| v.to_string()).unwrap_or_default()
        )?;
    }

    Ok(())
}

/// Export timing data to CSV file
pub fn export_csv(path: &str, data: &[RawTimingData]) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(std::io::BufWriter::new(file), data)
}
