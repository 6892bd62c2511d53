use super::SAD_BIAS;
use crate::element::count_scalar;
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// 4 registers per loop, to hide the latency of `psadbw`.
const BYTES_PER_LOOP: usize = 16 * 4;

/// How far ahead of the current chunk to prefetch.
const PREFETCH_DISTANCE: usize = 4096;

/// SSE2 implementation of [`count_u8`](super::count_u8).
///
/// # Safety
///
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn count_u8_sse2(bytes: &[u8], value: u8) -> usize {
    let chunks = bytes.chunks_exact(BYTES_PER_LOOP);
    let tail = chunks.remainder();
    let bias_total = SAD_BIAS as u64 * BYTES_PER_LOOP as u64 * chunks.len() as u64;

    let needle = _mm_set1_epi8(value as i8);
    let bias = _mm_set1_epi8(SAD_BIAS as i8);
    let mut sum0 = _mm_setzero_si128();
    let mut sum1 = _mm_setzero_si128();
    let mut sum2 = _mm_setzero_si128();
    let mut sum3 = _mm_setzero_si128();

    for chunk in chunks {
        let ptr = chunk.as_ptr();
        let cmp0 = _mm_cmpeq_epi8(needle, _mm_loadu_si128(ptr as *const __m128i));
        let cmp1 = _mm_cmpeq_epi8(needle, _mm_loadu_si128(ptr.add(16) as *const __m128i));
        let cmp2 = _mm_cmpeq_epi8(needle, _mm_loadu_si128(ptr.add(32) as *const __m128i));
        let cmp3 = _mm_cmpeq_epi8(needle, _mm_loadu_si128(ptr.add(48) as *const __m128i));

        // Only a hint, the address is never dereferenced.
        _mm_prefetch::<_MM_HINT_T0>(ptr.wrapping_add(PREFETCH_DISTANCE) as *const i8);

        sum0 = _mm_add_epi64(sum0, _mm_sad_epu8(cmp0, bias));
        sum1 = _mm_add_epi64(sum1, _mm_sad_epu8(cmp1, bias));
        sum2 = _mm_add_epi64(sum2, _mm_sad_epu8(cmp2, bias));
        sum3 = _mm_add_epi64(sum3, _mm_sad_epu8(cmp3, bias));
    }

    let sum = _mm_add_epi64(_mm_add_epi64(sum0, sum1), _mm_add_epi64(sum2, sum3));
    let vector_part = horizontal_sum_u64x2(sum) - bias_total;
    vector_part as usize + count_scalar(tail, value)
}

#[target_feature(enable = "sse2")]
#[inline]
unsafe fn horizontal_sum_u64x2(v: __m128i) -> u64 {
    let mut lanes = [0u64; 2];
    _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, v);
    lanes[0] + lanes[1]
}
