//! Transcendental element kernel.
//!
//! `ln(exp(alpha * x) * exp(y))` equals `alpha * x + y` in exact arithmetic
//! but costs two exponentials and a logarithm per element, which turns the
//! loop from memory-bound into compute-bound. `exp` overflows to infinity
//! once its argument passes ~709.78, so the result is only finite for
//! small inputs.

#[inline]
pub fn axpy_expensive(alpha: f64, x: f64, y: f64) -> f64 {
    ((alpha * x).exp() * y.exp()).ln()
}
