//! Fork-join region demos.

pub mod parallel_region;
