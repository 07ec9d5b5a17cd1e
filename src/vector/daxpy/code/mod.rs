//! daxpy element kernels.

mod expensive;
mod original;

pub use expensive::axpy_expensive;
pub use original::axpy;

use crate::utils::VariantInfo;

/// Type alias for the element kernel signature: `(alpha, x, y) -> z`
pub type AxpyFn = fn(f64, f64, f64) -> f64;

/// Get all element kernels
pub fn available_variants() -> Vec<VariantInfo<AxpyFn>> {
    vec![
        VariantInfo {
            name: "original",
            description: "z = alpha * x + y",
            function: axpy,
        },
        VariantInfo {
            name: "expensive",
            description: "z = ln(exp(alpha * x) * exp(y))",
            function: axpy_expensive,
        },
    ]
}
