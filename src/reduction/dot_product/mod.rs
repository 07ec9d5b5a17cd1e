//! # Parallel Dot Product Reduction
//!
//! Computes `s = Σ x[i] * y[i]` with a fixed number of workers over
//! disjoint contiguous ranges of `[0, n)`.
//!
//! A reduction runs in two phases:
//!
//! 1. **Private accumulation**: each worker folds its own range into a
//!    worker-local partial. Workers share nothing but read access to `x` and `y`.
//! 2. **Combine**: partials are merged into the single result. The merge is
//!    either one serialized add per worker (atomic or mutex) or a fold on
//!    the calling thread once every worker has joined.
//!
//! `PerElementAtomic` skips phase 1 and combines every product directly.
//! It gives the same answer within rounding and is kept so that the
//! per-worker variants have something to be timed against.
//!
//! Floating-point addition is not associative, so results differ in the
//! low bits between worker counts. Compare them with a relative tolerance.

pub mod bench;
pub mod code;
pub mod test;

pub use bench::{flag_contention, measure_contention, ContentionReport, CONTENTION_FACTOR};
pub use code::*;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace};
use rand::Rng;

use crate::config::{available_workers, Coefficients, ReduceConfig};
use crate::error::KernelResult;
use crate::registry::{KernelRunner, VariantClosure};
use crate::utils::bench::{elapsed, now};
use crate::utils::vectors;

/// Reduce with the default strategy over every available core.
pub fn reduce(x: &[f64], y: &[f64], n: usize) -> KernelResult<f64> {
    reduce_with(x, y, &ReduceConfig::new(n, available_workers()), Strategy::default())
}

/// Reduce with an explicit configuration and combine strategy.
pub fn reduce_with(
    x: &[f64],
    y: &[f64],
    config: &ReduceConfig,
    strategy: Strategy,
) -> KernelResult<f64> {
    debug!(
        "reducing n={} over {} workers with {}",
        config.n,
        config.workers,
        strategy.name()
    );
    let result = (strategy.function())(x, y, config)?;
    trace!("reduction done: {:e}", result);
    Ok(result)
}

/// Closed form of `Σ (c1 * i) * (c2 * i)` for `i` in `[0, n)`.
///
/// Uses the sum of the first `n - 1` squares, `(n-1) * n * (2n-1) / 6`.
pub fn expected_dot(n: usize, coeffs: Coefficients) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    coeffs.c1 * coeffs.c2 * (n - 1.0) * n * (2.0 * n - 1.0) / 6.0
}

/// Generate `x[i] = c1 * i` and `y[i] = c2 * i`.
pub fn linear_inputs(n: usize, coeffs: Coefficients) -> KernelResult<(Vec<f64>, Vec<f64>)> {
    Ok((vectors::linear(n, coeffs.c1)?, vectors::linear(n, coeffs.c2)?))
}

/// Outcome of one timed reduction
#[derive(Clone, Debug)]
pub struct DotReport {
    pub expected: f64,
    pub computed: f64,
    pub workers: usize,
    pub strategy: Strategy,
    pub elapsed: Duration,
}

impl DotReport {
    pub fn relative_error(&self) -> f64 {
        if self.expected == 0.0 {
            return (self.computed - self.expected).abs();
        }
        ((self.computed - self.expected) / self.expected).abs()
    }
}

/// Generate inputs, reduce them once, and time the reduction.
pub fn run(config: &ReduceConfig, coeffs: Coefficients, strategy: Strategy) -> KernelResult<DotReport> {
    config.validate()?;
    let (x, y) = linear_inputs(config.n, coeffs)?;
    let expected = expected_dot(config.n, coeffs);

    let start = now();
    let computed = reduce_with(&x, &y, config, strategy)?;
    let elapsed = elapsed(start);

    Ok(DotReport {
        expected,
        computed,
        workers: config.active_workers(),
        strategy,
        elapsed,
    })
}

/// Runner for the dot product reduction
pub struct DotProductRunner;

impl KernelRunner for DotProductRunner {
    fn name(&self) -> &'static str {
        "dot_product"
    }

    fn description(&self) -> &'static str {
        "Parallel sum of elementwise products with private or contended combine"
    }

    fn category(&self) -> &'static str {
        "reduction"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_variants().iter().map(|v| v.name).collect()
    }

    fn variant_closures<'a>(&'a self, size: usize, workers: usize) -> Vec<VariantClosure<'a>> {
        let coeffs = Coefficients::default();
        match linear_inputs(size, coeffs) {
            Ok((x, y)) => bench::variant_closures(Arc::new(x), Arc::new(y), workers),
            Err(e) => {
                log::error!("dot_product inputs for size {}: {}", size, e);
                Vec::new()
            }
        }
    }

    fn verify(&self) -> Result<(), String> {
        let mut rng = rand::rng();
        // Odd size so that ranges are uneven
        let size = 1023;
        let x: Vec<f64> = (0..size).map(|_| rng.random_range(-1.0..1.0)).collect();
        let y: Vec<f64> = (0..size).map(|_| rng.random_range(-1.0..1.0)).collect();

        let variants = code::available_variants();
        let reference = variants
            .iter()
            .find(|v| v.name == Strategy::Serial.name())
            .ok_or("No 'serial' variant found for reference")?;
        let expected = (reference.function)(&x, &y, &ReduceConfig::new(size, 1))
            .map_err(|e| e.to_string())?;

        for workers in [1, 3, 8] {
            let config = ReduceConfig::new(size, workers);
            for variant in &variants {
                let result = (variant.function)(&x, &y, &config).map_err(|e| e.to_string())?;
                let diff = (result - expected).abs();
                if diff > 1e-9 {
                    return Err(format!(
                        "Variant '{}' with {} workers failed verification. Expected {}, got {}, diff {}",
                        variant.name, workers, expected, result, diff
                    ));
                }
            }
        }

        let coeffs = Coefficients::default();
        let (x, y) = linear_inputs(1000, coeffs).map_err(|e| e.to_string())?;
        let closed = expected_dot(1000, coeffs);
        let got = reduce_with(&x, &y, &ReduceConfig::new(1000, 4), Strategy::default())
            .map_err(|e| e.to_string())?;
        if ((got - closed) / closed).abs() > 1e-6 {
            return Err(format!(
                "Closed form mismatch: expected {:e}, got {:e}",
                closed, got
            ));
        }

        Ok(())
    }
}
