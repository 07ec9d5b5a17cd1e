//! Shared benchmark utilities.
//!
//! Measurements are wall-clock durations: a parallel kernel spans several
//! cores, so per-core cycle counters would not describe it.

use std::time::{Duration, Instant};

/// Measurement value type
pub type Measurement = Duration;

/// Read the current instant
#[inline(always)]
pub fn now() -> Instant {
    Instant::now()
}

/// Calculate elapsed measurement
#[inline(always)]
pub fn elapsed(start: Instant) -> Measurement {
    start.elapsed()
}

/// Convert measurement to nanoseconds for display
pub fn to_nanos(m: Measurement) -> u64 {
    m.as_nanos() as u64
}

/// Time an expression, yielding `(Measurement, value)`.
#[macro_export]
macro_rules! measure {
    ($e:expr) => {{
        let start = $crate::utils::bench::now();
        let value = ::std::hint::black_box($e);
        ($crate::utils::bench::elapsed(start), value)
    }};
}

/// Simple fast random shuffle using Fisher-Yates algorithm
pub fn shuffle<T>(slice: &mut [T], seed: u64) {
    let mut rng = SeededRng::new(seed);
    for i in (1..slice.len()).rev() {
        let j = (rng.next_u64() >> 33) as usize % (i + 1);
        slice.swap(i, j);
    }
}

/// Get a seed from current time for randomization
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x12345678)
}

/// Simple seeded PRNG for reproducible schedules
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }
}
