//! Fork-join primitives over scoped threads.
//!
//! `fork` spawns a fixed number of workers and joins every one of them
//! before returning. Nothing a worker produces is visible to the caller
//! until all workers are done.

use std::ops::Range;
use std::thread;

use log::trace;

use super::cpu_affinity::PinGuard;
use crate::error::{KernelError, KernelResult};

/// Split `[0, n)` into contiguous balanced ranges, one per worker.
///
/// Range sizes differ by at most one, the first `n % workers` ranges taking
/// the extra element. When `workers > n` only `n` ranges are produced, so no
/// worker is ever handed an empty range.
pub fn partition(n: usize, workers: usize) -> Vec<Range<usize>> {
    let parts = workers.min(n);
    if parts == 0 {
        return Vec::new();
    }
    let base = n / parts;
    let extra = n % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let len = base + usize::from(i < extra);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// Run `work(worker_id)` on `workers` threads and collect the outputs in
/// worker order.
pub fn fork<T, F>(workers: usize, pin: bool, work: F) -> KernelResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    trace!("forking {} workers (pinned: {})", workers, pin);
    thread::scope(|scope| {
        let work = &work;
        let handles: Vec<_> = (0..workers)
            .map(|id| {
                scope.spawn(move || {
                    let _pin = pin.then(|| PinGuard::for_worker(id));
                    work(id)
                })
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(id, handle)| handle.join().map_err(|_| KernelError::WorkerPanicked(id)))
            .collect()
    })
}

/// Fork one worker per range; `work` receives the worker id and its range.
pub fn fork_ranges<T, F>(ranges: &[Range<usize>], pin: bool, work: F) -> KernelResult<Vec<T>>
where
    T: Send,
    F: Fn(usize, Range<usize>) -> T + Sync,
{
    fork(ranges.len(), pin, |id| work(id, ranges[id].clone()))
}
