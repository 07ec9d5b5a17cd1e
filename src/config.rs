//! Run configuration records.
//!
//! Problem size and worker count are explicit values validated at entry
//! instead of constants baked into each kernel.

use crate::error::{KernelError, KernelResult};

/// Default vector length for the dot product.
pub const DEFAULT_REDUCE_LEN: usize = 10_000_000;

/// Default vector length for daxpy.
pub const DEFAULT_DAXPY_LEN: usize = 100_000_000;

/// Default daxpy scale factor.
pub const DEFAULT_ALPHA: f64 = 2.23;

/// Number of workers the platform reports, falling back to 1.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn require_nonzero(what: &str, value: usize) -> KernelResult<()> {
    if value == 0 {
        return Err(KernelError::InvalidArgument(format!(
            "{} must be at least 1",
            what
        )));
    }
    Ok(())
}

/// Linear coefficients of the generated inputs: `x[i] = c1 * i`, `y[i] = c2 * i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    pub c1: f64,
    pub c2: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self { c1: 1.23, c2: 4.56 }
    }
}

/// Configuration for a parallel reduction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReduceConfig {
    /// Vector length (default: 10_000_000)
    pub n: usize,
    /// Number of workers (default: available parallelism)
    pub workers: usize,
    /// Pin each worker to a core while it runs (default: false)
    pub pin_workers: bool,
}

impl ReduceConfig {
    pub fn new(n: usize, workers: usize) -> Self {
        Self {
            n,
            workers,
            pin_workers: false,
        }
    }

    pub fn validate(&self) -> KernelResult<()> {
        require_nonzero("vector length", self.n)?;
        require_nonzero("worker count", self.workers)
    }

    /// Workers that actually receive a range: never more than `n`.
    pub fn active_workers(&self) -> usize {
        self.workers.min(self.n)
    }
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REDUCE_LEN, available_workers())
    }
}

/// Configuration for the daxpy update
#[derive(Clone, Debug, PartialEq)]
pub struct DaxpyConfig {
    /// Vector length (default: 100_000_000)
    pub n: usize,
    /// Size of the worker pool (default: available parallelism)
    pub workers: usize,
    /// Scale factor applied to `x` (default: 2.23)
    pub alpha: f64,
}

impl DaxpyConfig {
    pub fn validate(&self) -> KernelResult<()> {
        require_nonzero("vector length", self.n)?;
        require_nonzero("worker count", self.workers)
    }
}

impl Default for DaxpyConfig {
    fn default() -> Self {
        Self {
            n: DEFAULT_DAXPY_LEN,
            workers: available_workers(),
            alpha: DEFAULT_ALPHA,
        }
    }
}
