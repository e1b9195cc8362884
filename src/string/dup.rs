// src/string/dup.rs

//! Duplicating operations.
//!
//! `strdup`/`strndup` hand the caller a [`CStrBuf`] that owns a block of
//! exactly `len + 1` bytes from the allocator it was given. Dropping the
//! buffer returns the block to that same allocator.

use super::cstr;
use crate::errors::MemoryError;
use crate::memory::ByteAllocator;
use core::fmt;
use core::ptr::NonNull;

/// Owned NUL-terminated copy allocated from `A`.
pub struct CStrBuf<'a, A: ByteAllocator + ?Sized> {
    ptr: NonNull<u8>,
    len: usize,
    alloc: &'a A,
}

impl<'a, A: ByteAllocator + ?Sized> CStrBuf<'a, A> {
    /// Length without the terminator.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.as_bytes_with_nul()[..self.len]
    }

    pub fn as_bytes_with_nul(&self) -> &[u8] {
        // SAFETY: ptr owns len + 1 initialized bytes.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len + 1) }
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Give up ownership of the block without freeing it.
    ///
    /// The block is `len + 1` bytes; release it with
    /// [`CStrBuf::from_raw`] or `ByteAllocator::deallocate`.
    pub fn into_raw(self) -> NonNull<u8> {
        let ptr = self.ptr;
        core::mem::forget(self);
        ptr
    }

    /// Take back a block produced by [`CStrBuf::into_raw`].
    ///
    /// # Safety
    ///
    /// `ptr` must come from `into_raw` on a buffer allocated from `alloc`,
    /// and its contents must still be NUL-terminated at the original length.
    pub unsafe fn from_raw(ptr: NonNull<u8>, alloc: &'a A) -> Self {
        // SAFETY: the block is NUL-terminated per the caller's contract.
        let len = unsafe { super::raw::strlen(ptr.as_ptr()) };
        Self { ptr, len, alloc }
    }
}

impl<A: ByteAllocator + ?Sized> Drop for CStrBuf<'_, A> {
    fn drop(&mut self) {
        // SAFETY: the block came from self.alloc with exactly len + 1 bytes.
        unsafe { self.alloc.deallocate(self.ptr, self.len + 1) };
    }
}

impl<A: ByteAllocator + ?Sized> fmt::Debug for CStrBuf<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CStrBuf")
            .field("ptr", &self.ptr)
            .field("bytes", &self.as_bytes())
            .finish()
    }
}

fn dup_bytes<'a, A: ByteAllocator + ?Sized>(
    bytes: &[u8],
    alloc: &'a A,
) -> Result<CStrBuf<'a, A>, MemoryError> {
    let len = bytes.len();
    let size = len.checked_add(1).ok_or(MemoryError::Overflow)?;
    let Some(ptr) = alloc.allocate(size) else {
        log::warn!("string duplicate: allocation of {} bytes failed", size);
        return Err(MemoryError::AllocationFailed { size });
    };

    // SAFETY: ptr is a fresh block of len + 1 bytes, disjoint from bytes.
    unsafe {
        core::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr.as_ptr(), len);
        ptr.as_ptr().add(len).write(0);
    }
    Ok(CStrBuf { ptr, len, alloc })
}

/// Copy `s` (up to its terminator) into `strlen(s) + 1` bytes from `alloc`.
///
/// # Errors
///
/// [`MemoryError::Unterminated`] if `s` has no NUL;
/// [`MemoryError::AllocationFailed`] if the allocator is exhausted.
pub fn strdup<'a, A: ByteAllocator + ?Sized>(
    s: &[u8],
    alloc: &'a A,
) -> Result<CStrBuf<'a, A>, MemoryError> {
    let len = cstr::strlen(s)?;
    dup_bytes(&s[..len], alloc)
}

/// Copy at most `n` bytes of `s` into `min(strlen(s), n) + 1` bytes from
/// `alloc`, always terminating the copy.
///
/// `s` need not be terminated if it holds at least `n` bytes.
///
/// # Errors
///
/// [`MemoryError::Unterminated`] if `s` ends before both `n` bytes and a
/// NUL; [`MemoryError::AllocationFailed`] if the allocator is exhausted.
pub fn strndup<'a, A: ByteAllocator + ?Sized>(
    s: &[u8],
    n: usize,
    alloc: &'a A,
) -> Result<CStrBuf<'a, A>, MemoryError> {
    let len = cstr::strnlen(s, n);
    if len == s.len() && len < n {
        return Err(MemoryError::Unterminated);
    }
    dup_bytes(&s[..len], alloc)
}
