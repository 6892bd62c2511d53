//! Counting `u8` values in a byte buffer.
//!
//! This is the routine behind byte-frequency style tallies, i.e. 'how many times does byte `x`
//! appear in this data?'.
//!
//! # Vector kernels
//!
//! Comparing 16 (or 32) bytes against the target at once is cheap; the hard part is adding up the
//! comparison masks. Each matching lane is `0xFF`, so accumulating masks byte-wise overflows after
//! a single iteration. Instead, the kernels feed each mask into `psadbw` against a constant bias
//! of `0x7F`, which sums every group of 8 byte lanes into one 64-bit lane:
//!
//! - a matching byte contributes `|0xFF - 0x7F| == 0x80`
//! - a non matching byte contributes `|0x00 - 0x7F| == 0x7F`
//!
//! So every byte adds `0x7F`, plus 1 if it matched. Rather than subtracting the bias every
//! iteration, the biased sums are accumulated over the whole vector-aligned region and
//! `0x7F * bytes_in_region` is subtracted once at the end. The 64-bit lanes gain at most
//! `0x80 * 8` per iteration, so they can't overflow for any buffer that fits in memory.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod avx2;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod sse2;

use crate::counter::Counter;
use crate::element::count_scalar;

/// Bias fed to `psadbw` alongside the comparison masks.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const SAD_BIAS: u8 = 0x7F;

/// Counts the bytes in `bytes` which equal `value`, using the fastest available implementation.
///
/// # Example
///
/// ```
/// use element_count::count_u8;
///
/// let bytes = [0x00, 0x01, 0x00, 0x02, 0x00].repeat(4);
/// assert_eq!(count_u8(&bytes, 0x00), 12);
/// ```
#[inline]
pub fn count_u8(bytes: &[u8], value: u8) -> usize {
    Counter::detect().count_u8(bytes, value)
}

/// Counts the bytes in `bytes` which equal `value`, one byte at a time.
///
/// This is the reference implementation, and the fallback on machines without vector support.
#[inline]
pub fn count_u8_scalar(bytes: &[u8], value: u8) -> usize {
    count_scalar(bytes, value)
}

/// Counts the bytes in `bytes` which equal `value` with the SSE2 kernel.
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
#[inline]
pub fn count_u8_vector(bytes: &[u8], value: u8) -> usize {
    // SAFETY: SSE2 is enabled for the whole build.
    unsafe { sse2::count_u8_sse2(bytes, value) }
}
