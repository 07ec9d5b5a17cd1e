//! Parallel reductions.

pub mod dot_product;
