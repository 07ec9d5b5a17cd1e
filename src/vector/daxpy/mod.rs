//! # daxpy
//!
//! `z <- alpha * x + y` over double-precision vectors, as a data-parallel
//! loop on a fixed-size `rayon` pool. Filling the inputs and computing `z`
//! both run on the pool; every element is independent, so the only
//! synchronization is the implicit join at the end of each loop.

pub mod code;
pub mod test;

pub use code::*;

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::{Coefficients, DaxpyConfig};
use crate::error::{KernelError, KernelResult};
use crate::registry::{KernelRunner, VariantClosure};
use crate::utils::bench::{elapsed, now};
use crate::utils::vectors::try_zeroed;

/// Build a pool of exactly `workers` threads.
pub fn build_pool(workers: usize) -> KernelResult<ThreadPool> {
    if workers == 0 {
        return Err(KernelError::InvalidArgument(
            "worker count must be at least 1".to_string(),
        ));
    }
    Ok(ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("daxpy-{}", i))
        .build()?)
}

/// Fill `x[i] = c1 * i` and `y[i] = c2 * i` in parallel.
pub fn fill_inputs(
    pool: &ThreadPool,
    n: usize,
    coeffs: Coefficients,
) -> KernelResult<(Vec<f64>, Vec<f64>)> {
    let mut x = try_zeroed(n)?;
    let mut y = try_zeroed(n)?;
    pool.install(|| {
        x.par_iter_mut()
            .zip(y.par_iter_mut())
            .enumerate()
            .for_each(|(i, (xi, yi))| {
                *xi = coeffs.c1 * i as f64;
                *yi = coeffs.c2 * i as f64;
            })
    });
    Ok((x, y))
}

/// `z[i] = kernel(alpha, x[i], y[i])` in parallel.
pub fn daxpy_with(
    pool: &ThreadPool,
    alpha: f64,
    x: &[f64],
    y: &[f64],
    kernel: AxpyFn,
) -> KernelResult<Vec<f64>> {
    if x.is_empty() || x.len() != y.len() {
        return Err(KernelError::InvalidArgument(format!(
            "expected two non-empty vectors of equal length, got {} and {}",
            x.len(),
            y.len()
        )));
    }
    let mut z = try_zeroed(x.len())?;
    pool.install(|| {
        z.par_iter_mut()
            .zip(x.par_iter().zip(y.par_iter()))
            .for_each(|(zi, (&xi, &yi))| *zi = kernel(alpha, xi, yi))
    });
    Ok(z)
}

pub fn daxpy(pool: &ThreadPool, alpha: f64, x: &[f64], y: &[f64]) -> KernelResult<Vec<f64>> {
    daxpy_with(pool, alpha, x, y, axpy)
}

pub fn daxpy_expensive(
    pool: &ThreadPool,
    alpha: f64,
    x: &[f64],
    y: &[f64],
) -> KernelResult<Vec<f64>> {
    daxpy_with(pool, alpha, x, y, axpy_expensive)
}

/// Outcome of one timed daxpy run
#[derive(Clone, Debug)]
pub struct DaxpyReport {
    /// Threads in the pool
    pub workers: usize,
    /// Wall-clock time for fill plus update
    pub elapsed: Duration,
    pub len: usize,
    /// `z[n - 1]`, kept so the computation cannot be optimized away
    pub last: f64,
}

/// Fill the inputs and compute `z` once, timing both loops together.
pub fn run(config: &DaxpyConfig, kernel: AxpyFn) -> KernelResult<DaxpyReport> {
    config.validate()?;
    let pool = build_pool(config.workers)?;
    debug!(
        "daxpy n={} alpha={} on {} threads",
        config.n,
        config.alpha,
        pool.current_num_threads()
    );

    let start = now();
    let (x, y) = fill_inputs(&pool, config.n, Coefficients::default())?;
    let z = daxpy_with(&pool, config.alpha, &x, &y, kernel)?;
    let elapsed = elapsed(start);

    Ok(DaxpyReport {
        workers: pool.current_num_threads(),
        elapsed,
        len: z.len(),
        last: z.last().copied().unwrap_or(0.0),
    })
}

/// Runner for the daxpy update
pub struct DaxpyRunner;

impl KernelRunner for DaxpyRunner {
    fn name(&self) -> &'static str {
        "daxpy"
    }

    fn description(&self) -> &'static str {
        "Data-parallel z = alpha*x + y on a fixed-size worker pool"
    }

    fn category(&self) -> &'static str {
        "vector"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_variants().iter().map(|v| v.name).collect()
    }

    fn variant_closures<'a>(&'a self, size: usize, workers: usize) -> Vec<VariantClosure<'a>> {
        let prepared = build_pool(workers).and_then(|pool| {
            let (x, y) = fill_inputs(&pool, size, Coefficients::default())?;
            Ok((Arc::new(pool), Arc::new(x), Arc::new(y)))
        });
        let (pool, x, y) = match prepared {
            Ok(p) => p,
            Err(e) => {
                log::error!("daxpy inputs for size {}: {}", size, e);
                return Vec::new();
            }
        };
        let alpha = DaxpyConfig::default().alpha;

        code::available_variants()
            .into_iter()
            .map(|v| {
                let (pool, x, y) = (Arc::clone(&pool), Arc::clone(&x), Arc::clone(&y));
                let kernel = v.function;
                VariantClosure {
                    name: v.name,
                    description: v.description,
                    run: Box::new(move || {
                        let start = now();
                        let z = daxpy_with(&pool, alpha, &x, &y, kernel);
                        let time = elapsed(start);
                        let last = z.ok().and_then(|z| z.last().copied());
                        (time, std::hint::black_box(last))
                    }),
                }
            })
            .collect()
    }

    fn verify(&self) -> Result<(), String> {
        // exp(alpha*x + y) stays finite only while alpha*c1*i + c2*i < ~709.
        let size = 64;
        let alpha = DaxpyConfig::default().alpha;
        let coeffs = Coefficients::default();
        let pool = build_pool(3).map_err(|e| e.to_string())?;
        let (x, y) = fill_inputs(&pool, size, coeffs).map_err(|e| e.to_string())?;

        for variant in code::available_variants() {
            let z = daxpy_with(&pool, alpha, &x, &y, variant.function)
                .map_err(|e| e.to_string())?;
            for (i, &zi) in z.iter().enumerate() {
                let expected = alpha * coeffs.c1 * i as f64 + coeffs.c2 * i as f64;
                if (zi - expected).abs() > 1e-9 * expected.abs().max(1.0) {
                    return Err(format!(
                        "Variant '{}' failed verification at {}. Expected {}, got {}",
                        variant.name, i, expected, zi
                    ));
                }
            }
        }
        Ok(())
    }
}
