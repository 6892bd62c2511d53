//! C exports.
//!
//! Every function takes a pointer to the start of the buffer and its length in *bytes*.
//! Trailing bytes which don't form a complete element are ignored.

use core::ffi::c_void;
use core::slice;

/// Borrows the caller's buffer. A null pointer is treated as an empty buffer.
///
/// # Safety
///
/// If `data` is not null, it must point to `length` readable bytes.
unsafe fn as_bytes<'a>(data: *const c_void, length: usize) -> &'a [u8] {
    if data.is_null() || length == 0 {
        &[]
    } else {
        slice::from_raw_parts(data as *const u8, length)
    }
}

/// Counts the bytes equal to `value` in the given buffer.
///
/// Uses the fastest implementation supported by the current CPU.
///
/// # Arguments
///
/// * `data` - Address of the first byte
/// * `length` - Length of the buffer, in bytes
/// * `value` - The byte to count
///
/// # Returns
///
/// The number of matching bytes. 0 if `data` is null.
///
/// # Safety
///
/// `data` must be null, or point to `length` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn count_u8(data: *const c_void, length: usize, value: u8) -> usize {
    crate::count_u8::count_u8(as_bytes(data, length), value)
}

/// Same as [`count_u8`], but always uses the scalar reference implementation.
///
/// # Safety
///
/// `data` must be null, or point to `length` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn count_u8_scalar(data: *const c_void, length: usize, value: u8) -> usize {
    crate::count_u8::count_u8_scalar(as_bytes(data, length), value)
}

/// Counts the native-endian `uint16_t` elements equal to `value` in the given buffer.
///
/// # Arguments
///
/// * `data` - Address of the first byte
/// * `length` - Length of the buffer, in bytes. An odd trailing byte is ignored.
/// * `value` - The element to count
///
/// # Safety
///
/// `data` must be null, or point to `length` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn count_u16(data: *const c_void, length: usize, value: u16) -> usize {
    crate::count_u16::count_u16(as_bytes(data, length), value)
}

/// Same as [`count_u16`], but always uses the scalar reference implementation.
///
/// # Safety
///
/// `data` must be null, or point to `length` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn count_u16_scalar(
    data: *const c_void,
    length: usize,
    value: u16,
) -> usize {
    crate::count_u16::count_u16_scalar(as_bytes(data, length), value)
}

/// Counts the native-endian `uint32_t` elements equal to `value` in the given buffer.
///
/// # Arguments
///
/// * `data` - Address of the first byte
/// * `length` - Length of the buffer, in bytes. Up to 3 trailing bytes are ignored.
/// * `value` - The element to count
///
/// # Safety
///
/// `data` must be null, or point to `length` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn count_u32(data: *const c_void, length: usize, value: u32) -> usize {
    crate::count_u32::count_u32(as_bytes(data, length), value)
}

/// Same as [`count_u32`], but always uses the scalar reference implementation.
///
/// # Safety
///
/// `data` must be null, or point to `length` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn count_u32_scalar(
    data: *const c_void,
    length: usize,
    value: u32,
) -> usize {
    crate::count_u32::count_u32_scalar(as_bytes(data, length), value)
}
