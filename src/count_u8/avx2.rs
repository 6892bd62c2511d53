use super::SAD_BIAS;
use crate::element::count_scalar;
#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

const BYTES_PER_LOOP: usize = 32 * 4;
const PREFETCH_DISTANCE: usize = 4096;

/// AVX2 implementation of [`count_u8`](super::count_u8).
///
/// Same scheme as the SSE2 kernel, with `vpsadbw` folding 32 bytes into 4 lanes per register.
///
/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn count_u8_avx2(bytes: &[u8], value: u8) -> usize {
    let chunks = bytes.chunks_exact(BYTES_PER_LOOP);
    let tail = chunks.remainder();
    let bias_total = SAD_BIAS as u64 * BYTES_PER_LOOP as u64 * chunks.len() as u64;

    let needle = _mm256_set1_epi8(value as i8);
    let bias = _mm256_set1_epi8(SAD_BIAS as i8);
    let mut sum0 = _mm256_setzero_si256();
    let mut sum1 = _mm256_setzero_si256();
    let mut sum2 = _mm256_setzero_si256();
    let mut sum3 = _mm256_setzero_si256();

    for chunk in chunks {
        let ptr = chunk.as_ptr();
        let cmp0 = _mm256_cmpeq_epi8(needle, _mm256_loadu_si256(ptr as *const __m256i));
        let cmp1 = _mm256_cmpeq_epi8(needle, _mm256_loadu_si256(ptr.add(32) as *const __m256i));
        let cmp2 = _mm256_cmpeq_epi8(needle, _mm256_loadu_si256(ptr.add(64) as *const __m256i));
        let cmp3 = _mm256_cmpeq_epi8(needle, _mm256_loadu_si256(ptr.add(96) as *const __m256i));

        _mm_prefetch::<_MM_HINT_T0>(ptr.wrapping_add(PREFETCH_DISTANCE) as *const i8);

        sum0 = _mm256_add_epi64(sum0, _mm256_sad_epu8(cmp0, bias));
        sum1 = _mm256_add_epi64(sum1, _mm256_sad_epu8(cmp1, bias));
        sum2 = _mm256_add_epi64(sum2, _mm256_sad_epu8(cmp2, bias));
        sum3 = _mm256_add_epi64(sum3, _mm256_sad_epu8(cmp3, bias));
    }

    let sum = _mm256_add_epi64(_mm256_add_epi64(sum0, sum1), _mm256_add_epi64(sum2, sum3));
    let vector_part = horizontal_sum_u64x4(sum) - bias_total;
    vector_part as usize + count_scalar(tail, value)
}

#[target_feature(enable = "avx2")]
#[inline]
unsafe fn horizontal_sum_u64x4(v: __m256i) -> u64 {
    let mut lanes = [0u64; 4];
    _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, v);
    lanes.iter().sum()
}
