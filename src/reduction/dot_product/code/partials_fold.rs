//! Per-worker partials folded on the calling thread.
//!
//! Each worker returns its private partial sum. After the join, the partials
//! are summed in worker order, so no memory is written by two threads and
//! the result is bit-identical for a given `(n, workers)`.

use log::trace;

use super::serial::private_dot;
use crate::config::ReduceConfig;
use crate::error::KernelResult;
use crate::utils::workers::fork_ranges;

pub fn dot_partials_fold(x: &[f64], y: &[f64], config: &ReduceConfig) -> KernelResult<f64> {
    let ranges = super::check_inputs(x, y, config)?;

    let partials = fork_ranges(&ranges, config.pin_workers, |_, range| {
        private_dot(&x[range.clone()], &y[range])
    })?;

    trace!("folding {} partials", partials.len());
    Ok(partials.iter().sum())
}
