//! Atomic `f64` built on `AtomicU64` bit patterns.

use std::sync::atomic::{AtomicU64, Ordering};

/// An `f64` that can be updated from several threads.
///
/// `fetch_add` is a compare-exchange loop over the bit pattern; every call
/// is a contended read-modify-write on one cache line.
#[derive(Debug, Default)]
pub struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    pub fn load(&self, order: Ordering) -> f64 {
        f64::from_bits(self.bits.load(order))
    }

    /// Add `value`, returning the previous value.
    pub fn fetch_add(&self, value: f64, order: Ordering) -> f64 {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + value).to_bits();
            match self
                .bits
                .compare_exchange_weak(current, next, order, Ordering::Relaxed)
            {
                Ok(previous) => return f64::from_bits(previous),
                Err(actual) => current = actual,
            }
        }
    }

    pub fn into_inner(self) -> f64 {
        f64::from_bits(self.bits.into_inner())
    }
}

/// A sum shared by every worker, updated in place.
pub trait SharedSum: Sync {
    fn combine(&self, value: f64);
}

impl SharedSum for AtomicF64 {
    fn combine(&self, value: f64) {
        self.fetch_add(value, Ordering::AcqRel);
    }
}
