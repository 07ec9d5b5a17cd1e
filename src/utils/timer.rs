//! Unified timing system for kernel benchmarks.
//!
//! - Randomized variant execution to avoid ordering bias
//! - Optional pinning of the measuring thread
//! - All raw measurements preserved for export

use std::hint::black_box;
use std::time::Duration;

use super::bench::{shuffle, time_seed, to_nanos, Measurement};
use super::cpu_affinity::PinGuard;

/// Pinning strategy for the measuring thread.
///
/// On Linux a spawned thread inherits the affinity mask of its parent, so
/// pinning the measuring thread confines every worker it forks to one core.
/// Only use `Global` or `PerExecution` for single-threaded variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Leave affinity to the OS scheduler
    #[default]
    Off,
    /// Pin once before all measurements
    Global,
    /// Pin/unpin around each execution
    PerExecution,
}

/// Configuration for timing measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Number of samples to collect per variant (default: 10)
    pub runs_per_variant: usize,
    /// Number of warmup iterations before measurement (default: 2)
    pub warmup_iterations: usize,
    /// Pinning of the measuring thread (default: Off)
    pub pin_strategy: PinStrategy,
    /// Seed for the execution schedule; time-based when `None`
    pub seed: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            runs_per_variant: 10,
            warmup_iterations: 2,
            pin_strategy: PinStrategy::default(),
            seed: None,
        }
    }
}

/// A variant to be measured
pub struct Variant<'a> {
    /// Unique name of the variant
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Runs the variant once - returns (measurement, optional result value).
    /// Timing happens inside the closure so that input setup is excluded.
    pub run: Box<dyn FnMut() -> (Measurement, Option<f64>) + 'a>,
}

/// Result from measuring a single variant
#[derive(Clone, Debug)]
pub struct VariantResult {
    pub name: String,
    pub description: String,
    /// Precise average in nanoseconds
    pub avg_nanos_f64: f64,
    pub median_time: Duration,
    pub min_time: Duration,
    pub max_time: Duration,
    pub std_dev: Duration,
    /// Number of samples taken
    pub iterations: usize,
    /// Last result value, kept for a sanity check against the other variants
    pub result_sample: Option<f64>,
}

/// Measure multiple variants with randomized execution order.
///
/// 1. Warms up all variants
/// 2. Creates a shuffled (variant, sample) schedule
/// 3. Measures each entry under the configured pinning
/// 4. Returns one `VariantResult` per variant, in input order
pub fn measure_variants(mut variants: Vec<Variant>, config: &TimingConfig) -> Vec<VariantResult> {
    if variants.is_empty() {
        return Vec::new();
    }

    let samples = config.runs_per_variant;

    for variant in &mut variants {
        for _ in 0..config.warmup_iterations {
            black_box((variant.run)());
        }
    }

    let mut tasks: Vec<(usize, usize)> = (0..variants.len())
        .flat_map(|v| (0..samples).map(move |s| (v, s)))
        .collect();
    shuffle(&mut tasks, config.seed.unwrap_or_else(time_seed));

    let mut measurements: Vec<Vec<Measurement>> = (0..variants.len())
        .map(|_| Vec::with_capacity(samples))
        .collect();
    let mut result_samples: Vec<Option<f64>> = vec![None; variants.len()];

    let _global_pin = (config.pin_strategy == PinStrategy::Global).then(PinGuard::new);

    for (variant_idx, _) in tasks {
        let variant = &mut variants[variant_idx];
        let _per_exec_pin =
            (config.pin_strategy == PinStrategy::PerExecution).then(PinGuard::new);
        let (elapsed_time, result) = (variant.run)();

        measurements[variant_idx].push(elapsed_time);
        result_samples[variant_idx] = result;
    }

    variants
        .into_iter()
        .enumerate()
        .map(|(idx, variant)| {
            let times = std::mem::take(&mut measurements[idx]);
            compute_variant_result(
                variant.name,
                variant.description,
                &times,
                result_samples[idx].take(),
            )
        })
        .collect()
}

/// Compute statistics from raw measurements
fn compute_variant_result(
    name: &'static str,
    description: &'static str,
    measurements: &[Measurement],
    result_sample: Option<f64>,
) -> VariantResult {
    if measurements.is_empty() {
        return VariantResult {
            name: name.to_string(),
            description: description.to_string(),
            avg_nanos_f64: 0.0,
            median_time: Duration::ZERO,
            min_time: Duration::ZERO,
            max_time: Duration::ZERO,
            std_dev: Duration::ZERO,
            iterations: 0,
            result_sample: None,
        };
    }

    let nanos: Vec<u64> = measurements.iter().map(|m| to_nanos(*m)).collect();

    let mut sorted = nanos.clone();
    sorted.sort_unstable();

    let sum: u64 = nanos.iter().sum();
    let avg_nanos_f64 = sum as f64 / nanos.len() as f64;

    let variance: f64 = nanos
        .iter()
        .map(|&n| {
            let diff = n as f64 - avg_nanos_f64;
            diff * diff
        })
        .sum::<f64>()
        / (nanos.len() - 1).max(1) as f64;

    VariantResult {
        name: name.to_string(),
        description: description.to_string(),
        avg_nanos_f64,
        median_time: Duration::from_nanos(sorted[sorted.len() / 2]),
        min_time: Duration::from_nanos(sorted[0]),
        max_time: Duration::from_nanos(sorted[sorted.len() - 1]),
        std_dev: Duration::from_nanos(variance.sqrt() as u64),
        iterations: measurements.len(),
        result_sample,
    }
}

/// Calculate median from a slice of durations.
pub fn calculate_median(times: &[Duration]) -> Duration {
    if times.is_empty() {
        return Duration::ZERO;
    }
    let mut sorted: Vec<_> = times.to_vec();
    sorted.sort();
    sorted[sorted.len() / 2]
}
