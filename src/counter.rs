//! Selection of the counting implementation.
//!
//! A [`Counter`] wraps a [`Backend`] that is known to be supported by the current CPU. The best
//! backend is probed once per process by [`Counter::detect`], cached, and reused by every call to
//! [`count`], [`count_u8`](crate::count_u8), [`count_u16`](crate::count_u16) and
//! [`count_u32`](crate::count_u32).
//!
//! With the `std` feature the probe uses runtime CPU feature detection. Without it, the probe can
//! only see the target features the crate was compiled with (e.g. `-C target-cpu=native`).

use crate::count_u16::count_u16_scalar;
use crate::count_u32::count_u32_scalar;
use crate::count_u8::count_u8_scalar;
use crate::element::Element;
use core::sync::atomic::{AtomicU8, Ordering};
use log::debug;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use crate::{count_u16, count_u32, count_u8};

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "std"))]
macro_rules! has_x86_feature {
    ($feature:tt) => {
        std::is_x86_feature_detected!($feature)
    };
}

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(feature = "std")))]
macro_rules! has_x86_feature {
    ($feature:tt) => {
        cfg!(target_feature = $feature)
    };
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
macro_rules! has_x86_feature {
    ($feature:tt) => {
        false
    };
}

/// An implementation of the counting routines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Backend {
    /// One element at a time. Available everywhere.
    Scalar = 1,
    /// 128-bit SSE2 kernels.
    Sse2 = 2,
    /// 256-bit AVX2 kernels.
    Avx2 = 3,
}

impl Backend {
    /// Every backend, from slowest to fastest.
    pub const ALL: [Backend; 3] = [Backend::Scalar, Backend::Sse2, Backend::Avx2];

    /// Whether this backend can run on the current machine.
    pub fn is_supported(self) -> bool {
        match self {
            Backend::Scalar => true,
            Backend::Sse2 => has_x86_feature!("sse2"),
            Backend::Avx2 => has_x86_feature!("avx2"),
        }
    }

    /// Whether this backend uses vector instructions.
    pub fn is_vectorized(self) -> bool {
        self != Backend::Scalar
    }

    pub fn name(self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::Sse2 => "sse2",
            Backend::Avx2 => "avx2",
        }
    }

    fn from_u8(value: u8) -> Option<Backend> {
        match value {
            1 => Some(Backend::Scalar),
            2 => Some(Backend::Sse2),
            3 => Some(Backend::Avx2),
            _ => None,
        }
    }
}

// 0 == not probed yet, otherwise a `Backend` discriminant.
static DETECTED_BACKEND: AtomicU8 = AtomicU8::new(0);

/// Counts elements using a backend supported by the current machine.
///
/// A `Counter` can only be obtained for a supported backend, which is what makes calling the
/// vector kernels through it safe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Counter {
    backend: Backend,
}

impl Counter {
    /// The scalar counter, which is supported everywhere.
    pub const SCALAR: Counter = Counter {
        backend: Backend::Scalar,
    };

    /// Returns the fastest counter supported by this machine.
    ///
    /// The CPU is only probed on the first call; later calls read the cached result.
    #[inline]
    pub fn detect() -> Counter {
        let backend = match Backend::from_u8(DETECTED_BACKEND.load(Ordering::Relaxed)) {
            Some(backend) => backend,
            None => {
                let backend = probe_backend();
                debug!("element-count: using {} backend", backend.name());
                DETECTED_BACKEND.store(backend as u8, Ordering::Relaxed);
                backend
            }
        };

        Counter { backend }
    }

    /// Returns a counter for `backend`, or [`None`] if this machine can't run it.
    pub fn with_backend(backend: Backend) -> Option<Counter> {
        backend.is_supported().then_some(Counter { backend })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn is_vectorized(&self) -> bool {
        self.backend.is_vectorized()
    }

    /// Counts the `T` elements in `bytes` which equal `value`.
    #[inline]
    pub fn count<T: Element>(self, bytes: &[u8], value: T) -> usize {
        T::count_with(self, bytes, value)
    }

    /// Counts the bytes in `bytes` which equal `value`.
    #[inline]
    pub fn count_u8(self, bytes: &[u8], value: u8) -> usize {
        match self.backend {
            Backend::Scalar => count_u8_scalar(bytes, value),
            // SAFETY: `self` can only hold a backend that passed `is_supported`.
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::Sse2 => unsafe { count_u8::sse2::count_u8_sse2(bytes, value) },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::Avx2 => unsafe { count_u8::avx2::count_u8_avx2(bytes, value) },
            #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
            _ => count_u8_scalar(bytes, value),
        }
    }

    /// Counts the native-endian `u16` elements in `bytes` which equal `value`.
    #[inline]
    pub fn count_u16(self, bytes: &[u8], value: u16) -> usize {
        match self.backend {
            Backend::Scalar => count_u16_scalar(bytes, value),
            // SAFETY: `self` can only hold a backend that passed `is_supported`.
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::Sse2 => unsafe { count_u16::sse2::count_u16_sse2(bytes, value) },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::Avx2 => unsafe { count_u16::avx2::count_u16_avx2(bytes, value) },
            #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
            _ => count_u16_scalar(bytes, value),
        }
    }

    /// Counts the native-endian `u32` elements in `bytes` which equal `value`.
    #[inline]
    pub fn count_u32(self, bytes: &[u8], value: u32) -> usize {
        match self.backend {
            Backend::Scalar => count_u32_scalar(bytes, value),
            // SAFETY: `self` can only hold a backend that passed `is_supported`.
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::Sse2 => unsafe { count_u32::sse2::count_u32_sse2(bytes, value) },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::Avx2 => unsafe { count_u32::avx2::count_u32_avx2(bytes, value) },
            #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
            _ => count_u32_scalar(bytes, value),
        }
    }
}

fn probe_backend() -> Backend {
    if Backend::Avx2.is_supported() {
        Backend::Avx2
    } else if Backend::Sse2.is_supported() {
        Backend::Sse2
    } else {
        Backend::Scalar
    }
}

/// Counts the `T` elements in `bytes` which equal `value`, using the fastest available backend.
///
/// ```
/// use element_count::count;
///
/// let bytes = [0u8, 1, 0, 2, 0];
/// assert_eq!(count(&bytes, 0u8), 3);
/// ```
#[inline]
pub fn count<T: Element>(bytes: &[u8], value: T) -> usize {
    Counter::detect().count(bytes, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn detect_is_cached_and_supported() {
        let first = Counter::detect();
        let second = Counter::detect();

        assert_eq!(first, second);
        assert!(first.backend().is_supported());
    }

    #[test]
    fn detect_picks_fastest_supported_backend() {
        let expected = Backend::ALL
            .into_iter()
            .rev()
            .find(|backend| backend.is_supported())
            .unwrap();
        assert_eq!(Counter::detect().backend(), expected);
    }

    #[rstest]
    #[case(Backend::Scalar)]
    #[case(Backend::Sse2)]
    #[case(Backend::Avx2)]
    fn with_backend_respects_support(#[case] backend: Backend) {
        match Counter::with_backend(backend) {
            Some(counter) => {
                assert!(backend.is_supported());
                assert_eq!(counter.backend(), backend);
                assert_eq!(counter.is_vectorized(), backend != Backend::Scalar);
            }
            None => assert!(!backend.is_supported()),
        }
    }

    #[test]
    fn scalar_is_always_supported() {
        assert_eq!(
            Counter::with_backend(Backend::Scalar),
            Some(Counter::SCALAR)
        );
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn sse2_is_supported_on_x86_64() {
        assert!(Backend::Sse2.is_supported());
    }

    #[test]
    fn generic_count_matches_width_specific() {
        let bytes = [5u8, 0, 7, 0, 5, 0, 5, 0, 1];
        let counter = Counter::detect();

        assert_eq!(count(&bytes, 5u8), counter.count_u8(&bytes, 5));
        assert_eq!(count(&bytes, 5u16), counter.count_u16(&bytes, 5));
        assert_eq!(count(&bytes, 0x0007_0005u32), counter.count_u32(&bytes, 0x0007_0005));
    }
}
