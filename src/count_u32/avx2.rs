use super::LOOPS_PER_FLUSH;
use crate::element::count_scalar;
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

const BYTES_PER_LOOP: usize = 32 * 4;
const PREFETCH_DISTANCE: usize = 4096;

/// AVX2 implementation of [`count_u32`](super::count_u32).
///
/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn count_u32_avx2(bytes: &[u8], value: u32) -> usize {
    let bytes = &bytes[..bytes.len() & !3];
    let tail_len = bytes.len() % BYTES_PER_LOOP;
    let (aligned, tail) = bytes.split_at(bytes.len() - tail_len);

    let needle = _mm256_set1_epi32(value as i32);
    let mut total = 0u64;

    for slice in aligned.chunks(BYTES_PER_LOOP * LOOPS_PER_FLUSH) {
        let mut sum0 = _mm256_setzero_si256();
        let mut sum1 = _mm256_setzero_si256();
        let mut sum2 = _mm256_setzero_si256();
        let mut sum3 = _mm256_setzero_si256();

        for chunk in slice.chunks_exact(BYTES_PER_LOOP) {
            let ptr = chunk.as_ptr();
            let cmp0 = _mm256_cmpeq_epi32(needle, _mm256_loadu_si256(ptr as *const __m256i));
            let cmp1 =
                _mm256_cmpeq_epi32(needle, _mm256_loadu_si256(ptr.add(32) as *const __m256i));
            let cmp2 =
                _mm256_cmpeq_epi32(needle, _mm256_loadu_si256(ptr.add(64) as *const __m256i));
            let cmp3 =
                _mm256_cmpeq_epi32(needle, _mm256_loadu_si256(ptr.add(96) as *const __m256i));

            _mm_prefetch::<_MM_HINT_T0>(ptr.wrapping_add(PREFETCH_DISTANCE) as *const i8);

            sum0 = _mm256_add_epi32(sum0, cmp0);
            sum1 = _mm256_add_epi32(sum1, cmp1);
            sum2 = _mm256_add_epi32(sum2, cmp2);
            sum3 = _mm256_add_epi32(sum3, cmp3);
        }

        let sum = _mm256_add_epi32(_mm256_add_epi32(sum0, sum1), _mm256_add_epi32(sum2, sum3));
        total += negated_horizontal_sum_i32x8(sum);
    }

    total as usize + count_scalar(tail, value)
}

#[target_feature(enable = "avx2")]
#[inline]
unsafe fn negated_horizontal_sum_i32x8(v: __m256i) -> u64 {
    let mut lanes = [0i32; 8];
    _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, v);
    lanes.iter().map(|&lane| (-(lane as i64)) as u64).sum()
}
