//! Utility modules for timing, worker management and output.

pub mod atomic;
pub mod bench;
pub mod cpu_affinity;
pub mod runner;
pub mod timer;
pub mod tui;
pub mod vectors;
pub mod workers;

// Re-export commonly used items
pub use atomic::{AtomicF64, SharedSum};
pub use bench::{elapsed, now, shuffle, time_seed, SeededRng};
pub use cpu_affinity::PinGuard;
pub use timer::{calculate_median, measure_variants, PinStrategy, TimingConfig, Variant, VariantResult};
pub use workers::{fork, fork_ranges, partition};

/// Information about a kernel implementation variant.
/// Generic over F which is the function signature.
pub struct VariantInfo<F> {
    /// Unique identifier for this variant (e.g., "partials_fold")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// The specific implementation function
    pub function: F,
}
