//! Fallible allocation of input vectors.

use crate::error::{KernelError, KernelResult};

/// Allocate a zeroed vector of `n` elements, reporting failure instead of aborting.
pub fn try_zeroed(n: usize) -> KernelResult<Vec<f64>> {
    let mut v = Vec::new();
    v.try_reserve_exact(n)
        .map_err(|_| KernelError::AllocationFailure { elements: n })?;
    v.resize(n, 0.0);
    Ok(v)
}

/// `v[i] = coeff * i` for `i` in `[0, n)`.
pub fn linear(n: usize, coeff: f64) -> KernelResult<Vec<f64>> {
    let mut v = Vec::new();
    v.try_reserve_exact(n)
        .map_err(|_| KernelError::AllocationFailure { elements: n })?;
    v.extend((0..n).map(|i| coeff * i as f64));
    Ok(v)
}
