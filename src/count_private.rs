//! This contains all implementations that don't ship to the public API, for testing and
//! benchmarking.

use crate::element::{Element, ElementView};

/// The most obvious way to write it. Left to the compiler to optimize.
pub fn count_naive<T: Element>(bytes: &[u8], value: T) -> usize {
    ElementView::<T>::new(bytes)
        .iter()
        .filter(|&element| element == value)
        .count()
}

/// Branchless scalar count, 4 elements per iteration into independent counters.
///
/// # Remarks
///
/// Splitting the running total into 4 counters removes the loop carried dependency on a single
/// register, so the adds can retire in parallel.
pub fn count_branchless_unroll_4<T: Element>(bytes: &[u8], value: T) -> usize {
    let view = ElementView::<T>::new(bytes);
    let mut chunks = view.as_bytes().chunks_exact(T::WIDTH * 4);

    let mut sum0 = 0usize;
    let mut sum1 = 0usize;
    let mut sum2 = 0usize;
    let mut sum3 = 0usize;

    for chunk in &mut chunks {
        let (first, second) = chunk.split_at(T::WIDTH * 2);
        sum0 += (T::from_ne_slice(&first[..T::WIDTH]) == value) as usize;
        sum1 += (T::from_ne_slice(&first[T::WIDTH..]) == value) as usize;
        sum2 += (T::from_ne_slice(&second[..T::WIDTH]) == value) as usize;
        sum3 += (T::from_ne_slice(&second[T::WIDTH..]) == value) as usize;
    }

    let tail = ElementView::<T>::new(chunks.remainder()).count(value);
    sum0 + sum1 + sum2 + sum3 + tail
}
