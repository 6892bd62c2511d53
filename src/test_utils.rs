//! Shared helpers for the unit tests.

use crate::counter::{Backend, Counter};

/// Fills `bytes` with xorshift noise. Same seed, same bytes.
pub(crate) fn fill_random(bytes: &mut [u8], seed: u64) {
    let mut y = seed;
    for byte in bytes.iter_mut() {
        y ^= y << 11;
        y ^= y >> 31;
        y ^= y << 18;
        *byte = y as u8;
    }
}

/// Every counter this machine can run, scalar included.
pub(crate) fn supported_counters() -> impl Iterator<Item = Counter> {
    Backend::ALL.into_iter().filter_map(Counter::with_backend)
}
