//! Private accumulator per worker, one serialized combine per worker.
//!
//! Workers only read `x` and `y` while accumulating. The shared sum is
//! touched exactly once per worker, after its loop has finished.

use std::sync::Mutex;

use log::trace;

use super::serial::private_dot;
use crate::config::ReduceConfig;
use crate::error::{KernelError, KernelResult};
use crate::utils::atomic::{AtomicF64, SharedSum};
use crate::utils::workers::fork_ranges;

/// Combine through one atomic add per worker.
pub fn dot_per_worker_atomic(x: &[f64], y: &[f64], config: &ReduceConfig) -> KernelResult<f64> {
    let total = AtomicF64::new(0.0);
    combine_per_worker(x, y, config, &total)?;
    Ok(total.into_inner())
}

/// Accumulate privately, then fold each worker's partial into `total` once.
pub(crate) fn combine_per_worker<S: SharedSum>(
    x: &[f64],
    y: &[f64],
    config: &ReduceConfig,
    total: &S,
) -> KernelResult<()> {
    let ranges = super::check_inputs(x, y, config)?;
    fork_ranges(&ranges, config.pin_workers, |id, range| {
        let partial = private_dot(&x[range.clone()], &y[range]);
        trace!("worker {} combining partial {:e}", id, partial);
        total.combine(partial);
    })?;
    Ok(())
}

/// Combine through one mutex-guarded add per worker.
pub fn dot_per_worker_mutex(x: &[f64], y: &[f64], config: &ReduceConfig) -> KernelResult<f64> {
    let ranges = super::check_inputs(x, y, config)?;
    let total = Mutex::new(0.0_f64);

    let combined = fork_ranges(&ranges, config.pin_workers, |id, range| {
        let partial = private_dot(&x[range.clone()], &y[range]);
        let mut sum = total.lock().map_err(|_| KernelError::WorkerPanicked(id))?;
        *sum += partial;
        Ok::<(), KernelError>(())
    })?;
    combined.into_iter().collect::<KernelResult<Vec<()>>>()?;

    total
        .into_inner()
        .map_err(|_| KernelError::WorkerPanicked(ranges.len()))
}
