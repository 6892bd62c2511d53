//! Element types that can be counted, and a bounds-checked view over a byte buffer.
//!
//! A buffer is always handed to the counters as raw bytes. [`ElementView`] reinterprets those
//! bytes as a sequence of fixed-width integers without any pointer casts: every element is read
//! out of a `WIDTH` byte slice of the original buffer, in native byte order.
//!
//! If the buffer length is not a multiple of the element width, the trailing bytes that do not
//! form a complete element are ignored.

use crate::counter::Counter;
use core::marker::PhantomData;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// An unsigned integer type that can be counted in a byte buffer.
///
/// Implemented for [`u8`], [`u16`] and [`u32`] only.
pub trait Element: Copy + Eq + 'static + sealed::Sealed {
    /// Width of the element in bytes.
    const WIDTH: usize;

    /// Reads an element from exactly [`Self::WIDTH`] bytes, in native byte order.
    fn from_ne_slice(raw: &[u8]) -> Self;

    /// Counts `value` in `bytes` using the given counter.
    #[doc(hidden)]
    fn count_with(counter: Counter, bytes: &[u8], value: Self) -> usize;
}

impl Element for u8 {
    const WIDTH: usize = 1;

    #[inline(always)]
    fn from_ne_slice(raw: &[u8]) -> Self {
        raw[0]
    }

    #[inline]
    fn count_with(counter: Counter, bytes: &[u8], value: Self) -> usize {
        counter.count_u8(bytes, value)
    }
}

impl Element for u16 {
    const WIDTH: usize = 2;

    #[inline(always)]
    fn from_ne_slice(raw: &[u8]) -> Self {
        u16::from_ne_bytes([raw[0], raw[1]])
    }

    #[inline]
    fn count_with(counter: Counter, bytes: &[u8], value: Self) -> usize {
        counter.count_u16(bytes, value)
    }
}

impl Element for u32 {
    const WIDTH: usize = 4;

    #[inline(always)]
    fn from_ne_slice(raw: &[u8]) -> Self {
        u32::from_ne_bytes([raw[0], raw[1], raw[2], raw[3]])
    }

    #[inline]
    fn count_with(counter: Counter, bytes: &[u8], value: Self) -> usize {
        counter.count_u32(bytes, value)
    }
}

/// A read-only view of a byte buffer as a sequence of `T` elements.
///
/// The view never extends past the last complete element; see [`ElementView::new`].
#[derive(Debug)]
pub struct ElementView<'a, T: Element> {
    bytes: &'a [u8],
    _element: PhantomData<T>,
}

impl<T: Element> Clone for ElementView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Element> Copy for ElementView<'_, T> {}

impl<'a, T: Element> ElementView<'a, T> {
    /// Creates a view over `bytes`, dropping the trailing `bytes.len() % T::WIDTH` bytes.
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        let whole = bytes.len() - bytes.len() % T::WIDTH;
        Self {
            bytes: &bytes[..whole],
            _element: PhantomData,
        }
    }

    /// Number of complete elements in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len() / T::WIDTH
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The bytes covered by the view. Always a multiple of `T::WIDTH` long.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the element at `index`, or [`None`] if it's out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        let start = index.checked_mul(T::WIDTH)?;
        let end = start.checked_add(T::WIDTH)?;
        self.bytes.get(start..end).map(T::from_ne_slice)
    }

    /// Iterates the elements in index order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        self.bytes.chunks_exact(T::WIDTH).map(T::from_ne_slice)
    }

    /// Splits the view into the first `mid` elements and the rest.
    ///
    /// `mid` is clamped to [`Self::len`].
    #[inline]
    pub fn split_at(&self, mid: usize) -> (Self, Self) {
        let mid_bytes = mid.min(self.len()) * T::WIDTH;
        let (head, tail) = self.bytes.split_at(mid_bytes);
        (
            Self {
                bytes: head,
                _element: PhantomData,
            },
            Self {
                bytes: tail,
                _element: PhantomData,
            },
        )
    }

    /// Counts the elements equal to `value`, one element at a time.
    #[inline]
    pub fn count(&self, value: T) -> usize {
        let mut counter = 0;
        for element in self.iter() {
            if element == value {
                counter += 1;
            }
        }
        counter
    }
}

/// Counts the complete `T` elements of `bytes` which equal `value`.
///
/// This is the reference implementation every other counter is tested against, and the fallback
/// used when no vector instructions are available. The vector kernels also use it for the bytes
/// left over after their last full chunk.
#[inline]
pub fn count_scalar<T: Element>(bytes: &[u8], value: T) -> usize {
    ElementView::<T>::new(bytes).count(value)
}
