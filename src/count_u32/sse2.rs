use super::LOOPS_PER_FLUSH;
use crate::element::count_scalar;
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// 6 registers per loop; `pcmpeqd` + `paddd` are cheap enough to keep more loads in flight.
const BYTES_PER_LOOP: usize = 16 * 6;
const PREFETCH_DISTANCE: usize = 4096;

/// SSE2 implementation of [`count_u32`](super::count_u32).
///
/// # Safety
///
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn count_u32_sse2(bytes: &[u8], value: u32) -> usize {
    let bytes = &bytes[..bytes.len() & !3];
    let tail_len = bytes.len() % BYTES_PER_LOOP;
    let (aligned, tail) = bytes.split_at(bytes.len() - tail_len);

    let needle = _mm_set1_epi32(value as i32);
    let mut total = 0u64;

    for slice in aligned.chunks(BYTES_PER_LOOP * LOOPS_PER_FLUSH) {
        let mut sum0 = _mm_setzero_si128();
        let mut sum1 = _mm_setzero_si128();
        let mut sum2 = _mm_setzero_si128();
        let mut sum3 = _mm_setzero_si128();
        let mut sum4 = _mm_setzero_si128();
        let mut sum5 = _mm_setzero_si128();

        for chunk in slice.chunks_exact(BYTES_PER_LOOP) {
            let ptr = chunk.as_ptr();
            let cmp0 = _mm_cmpeq_epi32(needle, _mm_loadu_si128(ptr as *const __m128i));
            let cmp1 = _mm_cmpeq_epi32(needle, _mm_loadu_si128(ptr.add(16) as *const __m128i));
            let cmp2 = _mm_cmpeq_epi32(needle, _mm_loadu_si128(ptr.add(32) as *const __m128i));
            let cmp3 = _mm_cmpeq_epi32(needle, _mm_loadu_si128(ptr.add(48) as *const __m128i));
            let cmp4 = _mm_cmpeq_epi32(needle, _mm_loadu_si128(ptr.add(64) as *const __m128i));
            let cmp5 = _mm_cmpeq_epi32(needle, _mm_loadu_si128(ptr.add(80) as *const __m128i));

            _mm_prefetch::<_MM_HINT_T0>(ptr.wrapping_add(PREFETCH_DISTANCE) as *const i8);

            sum0 = _mm_add_epi32(sum0, cmp0);
            sum1 = _mm_add_epi32(sum1, cmp1);
            sum2 = _mm_add_epi32(sum2, cmp2);
            sum3 = _mm_add_epi32(sum3, cmp3);
            sum4 = _mm_add_epi32(sum4, cmp4);
            sum5 = _mm_add_epi32(sum5, cmp5);
        }

        // Lanes are >= -6 * 32768 here, no overflow when combining.
        let sum = _mm_add_epi32(
            _mm_add_epi32(_mm_add_epi32(sum0, sum1), _mm_add_epi32(sum2, sum3)),
            _mm_add_epi32(sum4, sum5),
        );
        total += negated_horizontal_sum_i32x4(sum);
    }

    total as usize + count_scalar(tail, value)
}

/// Sums the lanes of an accumulator of (non-positive) comparison masks, negating each lane.
#[target_feature(enable = "sse2")]
#[inline]
unsafe fn negated_horizontal_sum_i32x4(v: __m128i) -> u64 {
    let mut lanes = [0i32; 4];
    _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, v);
    lanes.iter().map(|&lane| (-(lane as i64)) as u64).sum()
}
