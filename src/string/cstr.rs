// src/string/cstr.rs

//! Checked NUL-terminated byte string primitives.
//!
//! A byte string here is a slice whose terminator must lie inside the
//! slice. Bytes after the terminator are never examined.

use crate::errors::MemoryError;

/// Number of bytes before the first NUL.
///
/// # Errors
///
/// [`MemoryError::Unterminated`] if `s` contains no NUL.
pub fn strlen(s: &[u8]) -> Result<usize, MemoryError> {
    s.iter().position(|&b| b == 0).ok_or(MemoryError::Unterminated)
}

/// Length of `s` up to its first NUL, examining at most `max` bytes.
///
/// Never fails: an unterminated slice yields `min(max, s.len())`.
pub fn strnlen(s: &[u8], max: usize) -> usize {
    let window = &s[..max.min(s.len())];
    window.iter().position(|&b| b == 0).unwrap_or(window.len())
}

/// Compare two byte strings as unsigned bytes.
///
/// Stops at the first mismatch or at a common terminator.
///
/// # Errors
///
/// [`MemoryError::Unterminated`] if the comparison runs off the end of
/// either slice before it is decided.
pub fn strcmp(a: &[u8], b: &[u8]) -> Result<i32, MemoryError> {
    let mut i = 0;
    loop {
        let (Some(&x), Some(&y)) = (a.get(i), b.get(i)) else {
            return Err(MemoryError::Unterminated);
        };
        if x != y || x == 0 {
            return Ok(i32::from(x) - i32::from(y));
        }
        i += 1;
    }
}

/// Copy `src` and its terminator to the start of `dst`.
///
/// Returns `dst`.
///
/// # Errors
///
/// [`MemoryError::Unterminated`] if `src` has no NUL, or
/// [`MemoryError::InsufficientSpace`] if `dst` cannot hold it.
pub fn strcpy<'a>(dst: &'a mut [u8], src: &[u8]) -> Result<&'a mut [u8], MemoryError> {
    let required = strlen(src)? + 1;
    if required > dst.len() {
        return Err(MemoryError::InsufficientSpace {
            required,
            available: dst.len(),
        });
    }
    dst[..required].copy_from_slice(&src[..required]);
    Ok(dst)
}
