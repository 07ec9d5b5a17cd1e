//! Contended combine inside the parallel loop.
//!
//! Every element's product goes through one atomic add on the shared
//! accumulator. The result is correct, but all workers serialize on the
//! same cache line for every element, so adding workers makes it slower.
//! Kept as the counterpart the per-worker variants are measured against.

use crate::config::ReduceConfig;
use crate::error::KernelResult;
use crate::utils::atomic::{AtomicF64, SharedSum};
use crate::utils::workers::fork_ranges;

pub fn dot_per_element_atomic(x: &[f64], y: &[f64], config: &ReduceConfig) -> KernelResult<f64> {
    let total = AtomicF64::new(0.0);
    combine_per_element(x, y, config, &total)?;
    Ok(total.into_inner())
}

/// Fold every product straight into `total`, one combine per element.
pub(crate) fn combine_per_element<S: SharedSum>(
    x: &[f64],
    y: &[f64],
    config: &ReduceConfig,
    total: &S,
) -> KernelResult<()> {
    let ranges = super::check_inputs(x, y, config)?;
    fork_ranges(&ranges, config.pin_workers, |_, range| {
        for i in range {
            total.combine(x[i] * y[i]);
        }
    })?;
    Ok(())
}
