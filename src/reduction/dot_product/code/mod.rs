//! Dot product reduction implementations.
//!
//! Every variant has the same signature and validates its inputs the same
//! way before any worker is spawned.

mod partials_fold;
mod per_element_atomic;
mod per_worker;
mod serial;

use std::ops::Range;

pub use partials_fold::dot_partials_fold;
pub use per_element_atomic::dot_per_element_atomic;
pub(crate) use per_element_atomic::combine_per_element;
pub use per_worker::{dot_per_worker_atomic, dot_per_worker_mutex};
pub(crate) use per_worker::combine_per_worker;
pub use serial::{dot_serial, private_dot};

use crate::config::ReduceConfig;
use crate::error::{KernelError, KernelResult};
use crate::utils::workers::partition;
use crate::utils::VariantInfo;

/// Type alias for the reduction function signature
pub type ReduceFn = fn(&[f64], &[f64], &ReduceConfig) -> KernelResult<f64>;

/// Validate `config` against the inputs and return the worker ranges.
pub(crate) fn check_inputs(
    x: &[f64],
    y: &[f64],
    config: &ReduceConfig,
) -> KernelResult<Vec<Range<usize>>> {
    config.validate()?;
    if x.len() != config.n || y.len() != config.n {
        return Err(KernelError::InvalidArgument(format!(
            "expected two vectors of length {}, got {} and {}",
            config.n,
            x.len(),
            y.len()
        )));
    }
    Ok(partition(config.n, config.workers))
}

/// How partial results reach the final sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Single thread, no combine phase
    Serial,
    /// One contended atomic add per element
    PerElementAtomic,
    /// Private partial, one atomic add per worker
    PerWorkerAtomic,
    /// Private partial, one mutex-guarded add per worker
    PerWorkerMutex,
    /// Private partials joined, then folded on the caller
    #[default]
    PartialsFold,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Serial,
        Strategy::PerElementAtomic,
        Strategy::PerWorkerAtomic,
        Strategy::PerWorkerMutex,
        Strategy::PartialsFold,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Serial => "serial",
            Strategy::PerElementAtomic => "per_element_atomic",
            Strategy::PerWorkerAtomic => "per_worker_atomic",
            Strategy::PerWorkerMutex => "per_worker_mutex",
            Strategy::PartialsFold => "partials_fold",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Strategy::Serial => "Single-threaded reference fold",
            Strategy::PerElementAtomic => "Atomic add per element (contended)",
            Strategy::PerWorkerAtomic => "Private partial, atomic add per worker",
            Strategy::PerWorkerMutex => "Private partial, mutex add per worker",
            Strategy::PartialsFold => "Private partials folded after join",
        }
    }

    pub fn function(self) -> ReduceFn {
        match self {
            Strategy::Serial => dot_serial,
            Strategy::PerElementAtomic => dot_per_element_atomic,
            Strategy::PerWorkerAtomic => dot_per_worker_atomic,
            Strategy::PerWorkerMutex => dot_per_worker_mutex,
            Strategy::PartialsFold => dot_partials_fold,
        }
    }

    /// Number of contended combine operations for `n` elements over `workers`.
    pub fn contended_combines(self, n: usize, workers: usize) -> usize {
        match self {
            Strategy::Serial | Strategy::PartialsFold => 0,
            Strategy::PerElementAtomic => n,
            Strategy::PerWorkerAtomic | Strategy::PerWorkerMutex => workers.min(n),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

/// Get all reduction variants
pub fn available_variants() -> Vec<VariantInfo<ReduceFn>> {
    Strategy::ALL
        .into_iter()
        .map(|s| VariantInfo {
            name: s.name(),
            description: s.description(),
            function: s.function(),
        })
        .collect()
}
