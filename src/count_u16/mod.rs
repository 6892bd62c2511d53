//! Counting `u16` values in a byte buffer.
//!
//! The buffer is read as native-endian `u16`s; an odd trailing byte is ignored.
//!
//! # Vector kernels
//!
//! A comparison yields `0xFFFF` (i.e. `-1`) in every matching 16-bit lane, so adding the masks
//! with 16-bit arithmetic counts matches as negative numbers. A lane can take at most
//! [`LOOPS_PER_FLUSH`] additions of `-1` before it would leave the `i16` range, so the
//! vector-aligned region is processed in slices of that many loops. At the end of each slice,
//! `pmaddwd` against all `-1` turns every pair of 16-bit lanes into a positive 32-bit count
//! (`(-a * -1) + (-b * -1) == a + b`), which is then reduced into a 64-bit running total.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod avx2;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod sse2;

use crate::counter::Counter;
use crate::element::count_scalar;

/// Loops between two flushes of the 16-bit accumulators. `-32768` is the smallest `i16`.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const LOOPS_PER_FLUSH: usize = 32768;

/// Counts the `u16` elements in `bytes` which equal `value`, using the fastest available
/// implementation.
///
/// # Example
///
/// ```
/// use element_count::count_u16;
///
/// let values = [5u16, 7, 5, 5, 9, 5, 7, 5];
/// let bytes: Vec<u8> = values.iter().flat_map(|x| x.to_ne_bytes()).collect();
/// assert_eq!(count_u16(&bytes, 5), 5);
/// ```
#[inline]
pub fn count_u16(bytes: &[u8], value: u16) -> usize {
    Counter::detect().count_u16(bytes, value)
}

/// Counts the `u16` elements in `bytes` which equal `value`, one element at a time.
#[inline]
pub fn count_u16_scalar(bytes: &[u8], value: u16) -> usize {
    count_scalar(bytes, value)
}

/// Counts the `u16` elements in `bytes` which equal `value` with the SSE2 kernel.
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
#[inline]
pub fn count_u16_vector(bytes: &[u8], value: u16) -> usize {
    // SAFETY: SSE2 is enabled for the whole build.
    unsafe { sse2::count_u16_sse2(bytes, value) }
}
