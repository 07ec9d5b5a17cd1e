//! Kernel registry for discovery and execution.
//!
//! Every kernel implements [`KernelRunner`], so the CLI and the test suite
//! can list, verify and time them without knowing their concrete types.

use crate::utils::timer::{Variant, VariantResult};

/// Result from running a variant benchmark (alias for VariantResult)
pub type BenchmarkResult = VariantResult;

/// A closure that runs one timed execution of a variant
pub type VariantClosure<'a> = Variant<'a>;

/// Trait that all kernels must implement
pub trait KernelRunner: Send + Sync {
    /// Name of the kernel (e.g., "dot_product")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Category (e.g., "reduction", "vector", "fork_join")
    fn category(&self) -> &'static str;

    /// Get list of available variant names
    fn available_variants(&self) -> Vec<&'static str>;

    /// Get one closure per variant over inputs of `size` elements using
    /// `workers` threads. Each closure does ONE execution and returns its
    /// own timing. The runner handles warmup, scheduling and repetition.
    fn variant_closures<'a>(&'a self, size: usize, workers: usize) -> Vec<VariantClosure<'a>>;

    /// Verify correctness of all variants against the reference
    fn verify(&self) -> Result<(), String>;
}

/// Registry of all kernels
pub struct KernelRegistry {
    kernels: Vec<Box<dyn KernelRunner>>,
}

impl KernelRegistry {
    pub fn new() -> Self {
        Self {
            kernels: Vec::new(),
        }
    }

    pub fn register<K: KernelRunner + 'static>(&mut self, kernel: K) {
        self.kernels.push(Box::new(kernel));
    }

    pub fn all(&self) -> &[Box<dyn KernelRunner>] {
        &self.kernels
    }

    /// Find kernel by name
    pub fn find(&self, name: &str) -> Option<&dyn KernelRunner> {
        self.kernels
            .iter()
            .find(|k| k.name() == name)
            .map(|k| k.as_ref())
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.kernels.iter().map(|k| k.name()).collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&dyn KernelRunner> {
        self.kernels
            .iter()
            .filter(|k| k.category() == category)
            .map(|k| k.as_ref())
            .collect()
    }
}

impl Default for KernelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with all kernels
pub fn build_registry() -> KernelRegistry {
    let mut registry = KernelRegistry::new();

    registry.register(crate::reduction::dot_product::DotProductRunner);
    registry.register(crate::vector::daxpy::DaxpyRunner);
    registry.register(crate::fork_join::parallel_region::ParallelRegionRunner);

    registry
}
