//! Counting `u32` values in a byte buffer.
//!
//! The buffer is read as native-endian `u32`s; up to 3 trailing bytes are ignored.
//!
//! # Vector kernels
//!
//! The comparison masks (`0` or `-1` per 32-bit lane) are added straight into 32-bit
//! accumulators, so each lane holds minus the number of matches it has seen. Every
//! [`LOOPS_PER_FLUSH`] loops the accumulators are negated and reduced into a 64-bit total, which
//! keeps the lanes far away from `i32::MIN` however large the buffer is.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod avx2;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod sse2;

use crate::counter::Counter;
use crate::element::count_scalar;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const LOOPS_PER_FLUSH: usize = 32768;

/// Counts the `u32` elements in `bytes` which equal `value`, using the fastest available
/// implementation.
///
/// # Example
///
/// ```
/// use element_count::count_u32;
///
/// let values = [100u32, 200, 100, 100];
/// let bytes: Vec<u8> = values.iter().flat_map(|x| x.to_ne_bytes()).collect();
/// assert_eq!(count_u32(&bytes, 100), 3);
/// ```
#[inline]
pub fn count_u32(bytes: &[u8], value: u32) -> usize {
    Counter::detect().count_u32(bytes, value)
}

/// Counts the `u32` elements in `bytes` which equal `value`, one element at a time.
#[inline]
pub fn count_u32_scalar(bytes: &[u8], value: u32) -> usize {
    count_scalar(bytes, value)
}

/// Counts the `u32` elements in `bytes` which equal `value` with the SSE2 kernel.
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
#[inline]
pub fn count_u32_vector(bytes: &[u8], value: u32) -> usize {
    // SAFETY: SSE2 is enabled for the whole build.
    unsafe { sse2::count_u32_sse2(bytes, value) }
}
