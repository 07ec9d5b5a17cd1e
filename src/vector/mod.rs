//! Data-parallel vector updates.

pub mod daxpy;
