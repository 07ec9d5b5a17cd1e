//! # Fork-Join Kernels
//!
//! Small data-parallel kernels showing how work is split across workers and
//! how their results are combined: a daxpy vector update, a dot-product
//! reduction with contended and private combine strategies, and a minimal
//! fork-join region.

pub mod config;
pub mod error;
pub mod fork_join;
pub mod reduction;
pub mod registry;
pub mod utils;
pub mod vector;

/// Re-export tui from utils
pub use utils::tui;

pub use error::{KernelError, KernelResult};

/// Re-export commonly used items
pub mod prelude {
    pub use crate::config::{Coefficients, DaxpyConfig, ReduceConfig};
    pub use crate::error::{KernelError, KernelResult};
    pub use crate::reduction::dot_product::{reduce, reduce_with, Strategy};
    pub use crate::registry::{build_registry, KernelRegistry, KernelRunner};
}
