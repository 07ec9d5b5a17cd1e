//! Error type shared by every kernel.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    /// Rejected before any work begins: zero length, zero workers, mismatched lengths.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Allocation failure: could not reserve {elements} elements")]
    AllocationFailure { elements: usize },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),
}

pub type KernelResult<T> = std::result::Result<T, KernelError>;
