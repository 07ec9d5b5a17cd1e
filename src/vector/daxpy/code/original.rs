//! Plain multiply-add element kernel.

/// `alpha * x + y`
///
/// # Example
/// ```
/// use fork_join_kernels::vector::daxpy::axpy;
///
/// assert_eq!(axpy(2.0, 3.0, 1.0), 7.0);
/// ```
#[inline(always)]
pub fn axpy(alpha: f64, x: f64, y: f64) -> f64 {
    alpha * x + y
}
