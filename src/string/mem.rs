// src/string/mem.rs

//! Checked byte-span primitives.
//!
//! Each function takes the classic `n` argument and verifies it against
//! the slices before doing any work, so a bad length becomes an error
//! instead of a stray write.

use super::raw;
use crate::errors::MemoryError;
use crate::memory::{validate_range, validate_span};

/// Set the first `n` bytes of `dst` to the low byte of `c`.
///
/// Returns `dst` for chaining, like C `memset`.
///
/// # Errors
///
/// [`MemoryError::OutOfBounds`] if `n > dst.len()`.
pub fn memset(dst: &mut [u8], c: i32, n: usize) -> Result<&mut [u8], MemoryError> {
    validate_span(dst.len(), n)?;
    dst[..n].fill(c as u8);
    Ok(dst)
}

/// Copy the first `n` bytes of `src` into `dst`.
///
/// Two slices borrowed like this can never overlap; overlapping moves
/// inside one buffer go through [`memmove`].
///
/// # Errors
///
/// [`MemoryError::OutOfBounds`] if either slice is shorter than `n`.
pub fn memcpy<'a>(dst: &'a mut [u8], src: &[u8], n: usize) -> Result<&'a mut [u8], MemoryError> {
    validate_span(dst.len(), n)?;
    validate_span(src.len(), n)?;
    dst[..n].copy_from_slice(&src[..n]);
    Ok(dst)
}

/// Move `n` bytes inside `buf` from offset `src` to offset `dst`.
///
/// The ranges may overlap in either direction.
///
/// # Errors
///
/// [`MemoryError::OutOfBounds`] or [`MemoryError::Overflow`] if either
/// range does not fit in `buf`.
pub fn memmove(buf: &mut [u8], dst: usize, src: usize, n: usize) -> Result<&mut [u8], MemoryError> {
    validate_range(src, n, buf.len())?;
    validate_range(dst, n, buf.len())?;
    let base = buf.as_mut_ptr();
    // SAFETY: both ranges were validated against buf.
    unsafe { raw::memmove(base.add(dst), base.add(src), n) };
    Ok(buf)
}

/// Compare the first `n` bytes of `a` and `b` as unsigned values.
///
/// # Errors
///
/// [`MemoryError::OutOfBounds`] if either slice is shorter than `n`.
pub fn memcmp(a: &[u8], b: &[u8], n: usize) -> Result<i32, MemoryError> {
    validate_span(a.len(), n)?;
    validate_span(b.len(), n)?;
    Ok(a[..n]
        .iter()
        .zip(&b[..n])
        .find(|(x, y)| x != y)
        .map_or(0, |(&x, &y)| i32::from(x) - i32::from(y)))
}

/// Index of the first byte equal to the low byte of `c` in `s[..n]`.
///
/// # Errors
///
/// [`MemoryError::OutOfBounds`] if `n > s.len()`.
pub fn memchr(s: &[u8], c: i32, n: usize) -> Result<Option<usize>, MemoryError> {
    validate_span(s.len(), n)?;
    let needle = c as u8;
    Ok(s[..n].iter().position(|&b| b == needle))
}

/// Zero the first `n` bytes of `s`.
///
/// # Errors
///
/// [`MemoryError::OutOfBounds`] if `n > s.len()`.
pub fn bzero(s: &mut [u8], n: usize) -> Result<(), MemoryError> {
    memset(s, 0, n).map(|_| ())
}
