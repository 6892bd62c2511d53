#![doc = include_str!("../README.MD")]
#![no_std]

#[cfg(feature = "c-exports")]
pub mod exports;

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod count_u16;
pub mod count_u32;
pub mod count_u8;
pub mod counter;
pub mod element;

#[cfg(any(test, feature = "bench"))]
pub(crate) mod count_private;

#[cfg(test)]
pub(crate) mod test_utils;

pub use count_u16::{count_u16, count_u16_scalar};
pub use count_u32::{count_u32, count_u32_scalar};
pub use count_u8::{count_u8, count_u8_scalar};
pub use counter::{count, Backend, Counter};
pub use element::{count_scalar, Element, ElementView};

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
pub use count_u16::count_u16_vector;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
pub use count_u32::count_u32_vector;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2"))]
pub use count_u8::count_u8_vector;

/// Benchmark only re-exports.
#[cfg(feature = "bench")]
pub mod bench {
    use crate::element::Element;

    pub fn count_naive<T: Element>(bytes: &[u8], value: T) -> usize {
        crate::count_private::count_naive(bytes, value)
    }

    pub fn count_branchless_unroll_4<T: Element>(bytes: &[u8], value: T) -> usize {
        crate::count_private::count_branchless_unroll_4(bytes, value)
    }
}
