// src/string/raw.rs

//! Unchecked pointer primitives with the classic freestanding contracts.
//!
//! Nothing here validates its arguments: every function is `unsafe` and
//! mirrors the C library signature closely (sentinel return values, `i32`
//! comparison results, the low byte of an `i32` fill/search value). Use the
//! slice-based wrappers in [`crate::string`] unless a raw address is all
//! you have.

use crate::memory::{ByteAllocator, spans_overlap};
use core::ptr;

/// Write the low byte of `c` to `n` bytes at `dst`. Returns `dst`.
///
/// # Safety
///
/// `dst` must be valid for writes of `n` bytes.
#[inline]
pub unsafe fn memset(dst: *mut u8, c: i32, n: usize) -> *mut u8 {
    // SAFETY: the caller guarantees dst is writable for n bytes.
    unsafe { ptr::write_bytes(dst, c as u8, n) };
    dst
}

/// Copy `n` bytes from `src` to `dst`. Returns `dst`.
///
/// # Safety
///
/// Both ranges must be valid for `n` bytes and must not overlap; use
/// [`memmove`] for overlapping ranges.
#[inline]
pub unsafe fn memcpy(dst: *mut u8, src: *const u8, n: usize) -> *mut u8 {
    debug_assert!(!spans_overlap(dst, src, n), "memcpy on overlapping ranges");
    // SAFETY: validity and disjointness are guaranteed by the caller.
    unsafe { ptr::copy_nonoverlapping(src, dst, n) };
    dst
}

/// Copy `n` bytes from `src` to `dst`, correct even when the ranges
/// overlap. Returns `dst`.
///
/// Copies front to back when `dst` lies below `src` (or the ranges are
/// disjoint), back to front otherwise, so no source byte is overwritten
/// before it has been read.
///
/// # Safety
///
/// `src` must be valid for reads and `dst` for writes of `n` bytes.
pub unsafe fn memmove(dst: *mut u8, src: *const u8, n: usize) -> *mut u8 {
    if n == 0 || ptr::eq(dst, src) {
        return dst;
    }

    if (dst as usize) < (src as usize) || !spans_overlap(dst, src, n) {
        for i in 0..n {
            // SAFETY: i < n and both ranges are valid for n bytes.
            unsafe { *dst.add(i) = *src.add(i) };
        }
    } else {
        for i in (0..n).rev() {
            // SAFETY: as above.
            unsafe { *dst.add(i) = *src.add(i) };
        }
    }
    dst
}

/// Compare `n` bytes as unsigned values.
///
/// Returns the difference of the first mismatching pair, or 0.
///
/// # Safety
///
/// Both pointers must be valid for reads of `n` bytes.
pub unsafe fn memcmp(a: *const u8, b: *const u8, n: usize) -> i32 {
    for i in 0..n {
        // SAFETY: i < n and both ranges are readable for n bytes.
        let (x, y) = unsafe { (*a.add(i), *b.add(i)) };
        if x != y {
            return i32::from(x) - i32::from(y);
        }
    }
    0
}

/// Find the low byte of `c` in the first `n` bytes of `s`.
///
/// Returns a pointer to the match or null.
///
/// # Safety
///
/// `s` must be valid for reads of `n` bytes.
pub unsafe fn memchr(s: *const u8, c: i32, n: usize) -> *const u8 {
    let needle = c as u8;
    for i in 0..n {
        // SAFETY: i < n.
        let p = unsafe { s.add(i) };
        if unsafe { *p } == needle {
            return p;
        }
    }
    ptr::null()
}

/// Zero `n` bytes at `s`.
///
/// # Safety
///
/// `s` must be valid for writes of `n` bytes.
#[inline]
pub unsafe fn bzero(s: *mut u8, n: usize) {
    // SAFETY: forwarded from the caller.
    unsafe { memset(s, 0, n) };
}

/// Number of bytes before the first NUL.
///
/// # Safety
///
/// `s` must point to a NUL-terminated byte string.
pub unsafe fn strlen(s: *const u8) -> usize {
    let mut len = 0;
    // SAFETY: every byte up to and including the terminator is readable.
    while unsafe { *s.add(len) } != 0 {
        len += 1;
    }
    len
}

/// Like [`strlen`] but never examines more than `max` bytes.
///
/// # Safety
///
/// `s` must be readable up to its terminator or `max` bytes, whichever
/// comes first.
pub unsafe fn strnlen(s: *const u8, max: usize) -> usize {
    let mut len = 0;
    // SAFETY: len < max and no terminator seen yet.
    while len < max && unsafe { *s.add(len) } != 0 {
        len += 1;
    }
    len
}

/// Compare two NUL-terminated strings as unsigned bytes.
///
/// # Safety
///
/// Both pointers must point to NUL-terminated byte strings.
pub unsafe fn strcmp(a: *const u8, b: *const u8) -> i32 {
    let mut i = 0;
    loop {
        // SAFETY: neither string has ended before index i.
        let (x, y) = unsafe { (*a.add(i), *b.add(i)) };
        if x != y || x == 0 {
            return i32::from(x) - i32::from(y);
        }
        i += 1;
    }
}

/// Copy `src` including its terminator to `dst`. Returns `dst`.
///
/// # Safety
///
/// `src` must be NUL-terminated; `dst` must hold `strlen(src) + 1` bytes
/// and must not overlap `src`.
pub unsafe fn strcpy(dst: *mut u8, src: *const u8) -> *mut u8 {
    // SAFETY: forwarded from the caller.
    unsafe {
        let len = strlen(src);
        memcpy(dst, src, len + 1)
    }
}

/// Copy `len` bytes of `src` into a fresh `len + 1` byte block and
/// terminate it. Null on allocation failure.
unsafe fn dup_bytes<A: ByteAllocator + ?Sized>(src: *const u8, len: usize, alloc: &A) -> *mut u8 {
    let Some(size) = len.checked_add(1) else {
        return ptr::null_mut();
    };
    match alloc.allocate(size) {
        Some(block) => {
            let dst = block.as_ptr();
            // SAFETY: dst is a fresh block of len + 1 bytes; src is readable
            // for len bytes per the callers' contracts.
            unsafe {
                memcpy(dst, src, len);
                *dst.add(len) = 0;
            }
            dst
        }
        None => ptr::null_mut(),
    }
}

/// Duplicate `s` into `strlen(s) + 1` bytes from `alloc`.
///
/// Returns null when the allocator fails. The caller owns the block and
/// must return it with `alloc.deallocate(ptr, strlen(ptr) + 1)`.
///
/// # Safety
///
/// `s` must be NUL-terminated.
pub unsafe fn strdup<A: ByteAllocator + ?Sized>(s: *const u8, alloc: &A) -> *mut u8 {
    // SAFETY: forwarded from the caller.
    unsafe { dup_bytes(s, strlen(s), alloc) }
}

/// Duplicate at most `n` bytes of `s` into `min(strlen(s), n) + 1` bytes
/// from `alloc`, always terminating the copy.
///
/// Returns null when the allocator fails.
///
/// # Safety
///
/// `s` must be readable up to its terminator or `n` bytes, whichever comes
/// first.
pub unsafe fn strndup<A: ByteAllocator + ?Sized>(s: *const u8, n: usize, alloc: &A) -> *mut u8 {
    // SAFETY: forwarded from the caller.
    unsafe { dup_bytes(s, strnlen(s, n), alloc) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::GlobalByteAllocator;
    use core::ptr::NonNull;
    use std::vec::Vec;

    struct NoMemory;

    impl ByteAllocator for NoMemory {
        fn allocate(&self, _size: usize) -> Option<NonNull<u8>> {
            None
        }

        unsafe fn deallocate(&self, _ptr: NonNull<u8>, _size: usize) {
            unreachable!("nothing was allocated");
        }
    }

    fn naive_move(buf: &[u8], dst: usize, src: usize, n: usize) -> Vec<u8> {
        let tmp = buf[src..src + n].to_vec();
        let mut out = buf.to_vec();
        out[dst..dst + n].copy_from_slice(&tmp);
        out
    }

    #[test]
    fn memmove_forward_overlap() {
        let mut buf: Vec<u8> = (0..16).collect();
        let expected = naive_move(&buf, 0, 3, 10);
        let base = buf.as_mut_ptr();
        let ret = unsafe { memmove(base, base.add(3), 10) };
        assert_eq!(ret, base);
        assert_eq!(buf, expected);
    }

    #[test]
    fn memmove_backward_overlap() {
        let mut buf: Vec<u8> = (0..16).collect();
        let expected = naive_move(&buf, 3, 0, 10);
        let base = buf.as_mut_ptr();
        unsafe { memmove(base.add(3), base, 10) };
        assert_eq!(buf, expected);
        assert_eq!(&buf[..6], &[0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn memcmp_uses_unsigned_bytes() {
        let a = [0x01u8, 0x80];
        let b = [0x01u8, 0x7f];
        assert!(unsafe { memcmp(a.as_ptr(), b.as_ptr(), 2) } > 0);
        assert_eq!(unsafe { memcmp(a.as_ptr(), b.as_ptr(), 1) }, 0);
        assert_eq!(unsafe { memcmp(a.as_ptr(), b.as_ptr(), 0) }, 0);
    }

    #[test]
    fn memset_uses_low_byte() {
        let mut buf = [0u8; 4];
        unsafe { memset(buf.as_mut_ptr(), 0x1234, 3) };
        assert_eq!(buf, [0x34, 0x34, 0x34, 0]);
    }

    #[test]
    fn memchr_finds_first_or_null() {
        let s = b"abcabc";
        let hit = unsafe { memchr(s.as_ptr(), i32::from(b'c') | 0x100, s.len()) };
        assert_eq!(hit, s.as_ptr().wrapping_add(2));
        assert!(unsafe { memchr(s.as_ptr(), i32::from(b'c'), 2) }.is_null());
    }

    #[test]
    fn strlen_stops_at_first_nul() {
        assert_eq!(unsafe { strlen(b"\0garbage".as_ptr()) }, 0);
        assert_eq!(unsafe { strlen(b"abc\0def\0".as_ptr()) }, 3);
        assert_eq!(unsafe { strnlen(b"abcdef\0".as_ptr(), 4) }, 4);
    }

    #[test]
    fn strcmp_sign_convention() {
        unsafe {
            assert_eq!(strcmp(b"abc\0".as_ptr(), b"abc\0".as_ptr()), 0);
            assert!(strcmp(b"abc\0".as_ptr(), b"abd\0".as_ptr()) < 0);
            assert!(strcmp(b"ab\0".as_ptr(), b"abc\0".as_ptr()) < 0);
            assert!(strcmp(b"\xff\0".as_ptr(), b"a\0".as_ptr()) > 0);
        }
    }

    #[test]
    fn strcpy_copies_terminator() {
        let mut dst = [0xffu8; 8];
        let ret = unsafe { strcpy(dst.as_mut_ptr(), b"hi\0".as_ptr()) };
        assert_eq!(ret, dst.as_mut_ptr());
        assert_eq!(&dst[..4], b"hi\0\xff");
    }

    #[test]
    fn strdup_and_strndup_allocate_exact_copies() {
        let alloc = GlobalByteAllocator;
        unsafe {
            let src = b"hello\0";
            let dup = strdup(src.as_ptr(), &alloc);
            assert!(!dup.is_null());
            assert_ne!(dup as *const u8, src.as_ptr());
            assert_eq!(strcmp(dup, src.as_ptr()), 0);
            alloc.deallocate(NonNull::new_unchecked(dup), strlen(dup) + 1);

            let short = strndup(b"hello".as_ptr(), 3, &alloc);
            assert_eq!(strcmp(short, b"hel\0".as_ptr()), 0);
            alloc.deallocate(NonNull::new_unchecked(short), 4);
        }
    }

    #[test]
    fn duplicates_return_null_on_allocation_failure() {
        unsafe {
            assert!(strdup(b"x\0".as_ptr(), &NoMemory).is_null());
            assert!(strndup(b"xyz\0".as_ptr(), 2, &NoMemory).is_null());
        }
    }
}
