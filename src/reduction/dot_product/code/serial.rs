//! Single-threaded reference implementation.

use crate::config::ReduceConfig;
use crate::error::KernelResult;

/// Sum of elementwise products of two equal-length slices.
///
/// Every parallel variant uses this as its private inner loop.
///
/// # Example
/// ```
/// use fork_join_kernels::reduction::dot_product::private_dot;
///
/// let x = [1.0, 2.0, 3.0];
/// let y = [4.0, 5.0, 6.0];
/// assert_eq!(private_dot(&x, &y), 32.0);
/// ```
#[inline]
pub fn private_dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

/// Reference reduction on the calling thread; `config.workers` is ignored.
pub fn dot_serial(x: &[f64], y: &[f64], config: &ReduceConfig) -> KernelResult<f64> {
    super::check_inputs(x, y, config)?;
    Ok(private_dot(x, y))
}
