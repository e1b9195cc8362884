// src/memory/safety.rs

//! Span validation
//!
//! The safe primitive wrappers check every `(start, n)` request against the
//! slice they operate on before touching memory. The helpers here do the
//! overflow-aware arithmetic once.

use crate::errors::MemoryError;

/// Address range descriptor with validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRegion {
    start: usize,
    size: usize,
}

impl MemoryRegion {
    /// Create a new memory region
    ///
    /// Returns None if the region is empty or would overflow
    pub const fn new(start: usize, size: usize) -> Option<Self> {
        if size == 0 {
            return None;
        }

        match start.checked_add(size) {
            Some(_) => Some(Self { start, size }),
            None => None,
        }
    }

    /// Region covered by `len` bytes at `ptr`
    pub fn of_ptr(ptr: *const u8, len: usize) -> Option<Self> {
        Self::new(ptr as usize, len)
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    /// Get end address (exclusive)
    pub const fn end(&self) -> usize {
        self.start + self.size
    }

    pub const fn contains(&self, addr: usize) -> bool {
        addr >= self.start && addr < self.end()
    }

    /// Check if another region overlaps with this one
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// Whether `n` bytes at `a` and `n` bytes at `b` intersect.
pub fn spans_overlap(a: *const u8, b: *const u8, n: usize) -> bool {
    match (MemoryRegion::of_ptr(a, n), MemoryRegion::of_ptr(b, n)) {
        (Some(a), Some(b)) => a.overlaps(&b),
        _ => false,
    }
}

/// Check that an `n`-byte operation fits a span of `len` bytes.
///
/// # Errors
///
/// Returns [`MemoryError::OutOfBounds`] when `n > len`.
#[inline]
pub const fn validate_span(len: usize, n: usize) -> Result<(), MemoryError> {
    if n > len {
        return Err(MemoryError::OutOfBounds {
            required: n,
            available: len,
        });
    }
    Ok(())
}

/// Check that `n` bytes starting at offset `start` fit in `capacity`.
///
/// # Errors
///
/// Returns [`MemoryError::Overflow`] if `start + n` overflows, or
/// [`MemoryError::OutOfBounds`] if the range ends past `capacity`.
#[inline]
pub const fn validate_range(start: usize, n: usize, capacity: usize) -> Result<(), MemoryError> {
    let end = match start.checked_add(n) {
        Some(end) => end,
        None => return Err(MemoryError::Overflow),
    };

    if end > capacity {
        return Err(MemoryError::OutOfBounds {
            required: end,
            available: capacity,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_rejects_empty_and_overflow() {
        assert!(MemoryRegion::new(0x1000, 0).is_none());
        assert!(MemoryRegion::new(usize::MAX, 2).is_none());
        let region = MemoryRegion::new(0x1000, 0x10).unwrap();
        assert_eq!(region.end(), 0x1010);
        assert!(region.contains(0x100f));
        assert!(!region.contains(0x1010));
    }

    #[test]
    fn overlap_is_half_open() {
        let a = MemoryRegion::new(0, 4).unwrap();
        let b = MemoryRegion::new(4, 4).unwrap();
        let c = MemoryRegion::new(3, 4).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn spans_overlap_handles_zero_length() {
        let buf = [0u8; 8];
        let p = buf.as_ptr();
        assert!(!spans_overlap(p, p, 0));
        assert!(spans_overlap(p, p.wrapping_add(2), 4));
        assert!(!spans_overlap(p, p.wrapping_add(4), 4));
    }

    #[test]
    fn range_validation() {
        assert_eq!(validate_range(2, 3, 5), Ok(()));
        assert_eq!(
            validate_range(3, 3, 5),
            Err(MemoryError::OutOfBounds {
                required: 6,
                available: 5
            })
        );
        assert_eq!(validate_range(usize::MAX, 1, 5), Err(MemoryError::Overflow));
        assert_eq!(validate_span(4, 4), Ok(()));
        assert!(validate_span(4, 5).is_err());
    }
}
