//! Timing helpers for the dot product variants.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use super::code::{available_variants, Strategy};
use crate::config::ReduceConfig;
use crate::error::KernelResult;
use crate::registry::VariantClosure;
use crate::utils::bench::{elapsed, now};
use crate::utils::timer::calculate_median;

/// Slowdown of the per-element variant over the per-worker one above which
/// it is flagged.
pub const CONTENTION_FACTOR: f64 = 2.0;

/// Wall-clock comparison of the per-worker and per-element combine.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentionReport {
    pub per_worker: Duration,
    pub per_element: Duration,
    /// `per_element / per_worker`
    pub ratio: f64,
    /// `ratio > CONTENTION_FACTOR`
    pub flagged: bool,
}

/// Compare two timings of the same reduction.
pub fn flag_contention(per_worker: Duration, per_element: Duration) -> ContentionReport {
    let base = per_worker.as_secs_f64().max(1e-9);
    let ratio = per_element.as_secs_f64() / base;
    ContentionReport {
        per_worker,
        per_element,
        ratio,
        flagged: ratio > CONTENTION_FACTOR,
    }
}

fn median_time(
    x: &[f64],
    y: &[f64],
    config: &ReduceConfig,
    strategy: Strategy,
    runs: usize,
) -> KernelResult<Duration> {
    let func = strategy.function();
    let mut times = Vec::with_capacity(runs);
    for _ in 0..runs.max(1) {
        let start = now();
        std::hint::black_box(func(x, y, config)?);
        times.push(elapsed(start));
    }
    Ok(calculate_median(&times))
}

/// Time `PerWorkerAtomic` against `PerElementAtomic` on the same inputs.
pub fn measure_contention(
    x: &[f64],
    y: &[f64],
    config: &ReduceConfig,
    runs: usize,
) -> KernelResult<ContentionReport> {
    let per_worker = median_time(x, y, config, Strategy::PerWorkerAtomic, runs)?;
    let per_element = median_time(x, y, config, Strategy::PerElementAtomic, runs)?;
    let report = flag_contention(per_worker, per_element);
    if report.flagged {
        warn!(
            "per-element combine is {:.1}x slower than per-worker combine with {} workers",
            report.ratio, config.workers
        );
    } else {
        debug!("contention ratio {:.2} with {} workers", report.ratio, config.workers);
    }
    Ok(report)
}

/// One timed closure per variant over shared inputs.
pub fn variant_closures<'a>(x: Arc<Vec<f64>>, y: Arc<Vec<f64>>, workers: usize) -> Vec<VariantClosure<'a>> {
    let config = ReduceConfig::new(x.len(), workers);

    available_variants()
        .into_iter()
        .map(|v| {
            let x = Arc::clone(&x);
            let y = Arc::clone(&y);
            let config = config.clone();
            let func = v.function;

            VariantClosure {
                name: v.name,
                description: v.description,
                run: Box::new(move || {
                    let start = now();
                    let result = func(&x, &y, &config);
                    let time = elapsed(start);
                    (time, std::hint::black_box(result).ok())
                }),
            }
        })
        .collect()
}
