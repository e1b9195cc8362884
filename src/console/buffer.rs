// src/console/buffer.rs

//! Character cell storage.
//!
//! [`CellBuffer`] lets the console target the real text-mode buffer at
//! `0xB8000` or an in-memory grid used by tests and off-screen rendering.

use crate::config::{CELL_COUNT, VGA_BUFFER_ADDR};
use crate::errors::ConsoleError;
use core::ptr::NonNull;
use core::sync::atomic::{Ordering, compiler_fence};

/// Abstraction over the character buffer memory.
pub trait CellBuffer {
    /// Total number of addressable character cells.
    fn cell_count(&self) -> usize {
        CELL_COUNT
    }

    /// Store `value` at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`CellBuffer::cell_count`].
    unsafe fn write_cell_unchecked(&mut self, index: usize, value: u16);

    /// Load the cell at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`CellBuffer::cell_count`].
    unsafe fn read_cell_unchecked(&self, index: usize) -> u16;

    /// Read the encoded value at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidIndex`] when `index` is outside the
    /// buffer.
    fn read_cell(&self, index: usize) -> Result<u16, ConsoleError> {
        if index >= self.cell_count() {
            return Err(ConsoleError::InvalidIndex { index });
        }
        // SAFETY: bounds checked above.
        Ok(unsafe { self.read_cell_unchecked(index) })
    }

    /// Write `value` to the cell at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidIndex`] when `index` is outside the
    /// buffer.
    fn write_cell(&mut self, index: usize, value: u16) -> Result<(), ConsoleError> {
        if index >= self.cell_count() {
            return Err(ConsoleError::InvalidIndex { index });
        }
        // SAFETY: bounds checked above.
        unsafe { self.write_cell_unchecked(index, value) };
        Ok(())
    }

    /// Fill every cell with `value`.
    fn fill(&mut self, value: u16) {
        for index in 0..self.cell_count() {
            // SAFETY: index < cell_count.
            unsafe { self.write_cell_unchecked(index, value) };
        }
    }
}

/// Backend that talks to the legacy PC/AT text-mode buffer.
#[derive(Debug)]
pub struct TextModeBuffer {
    ptr: NonNull<u16>,
}

impl TextModeBuffer {
    /// Backend at the canonical address `0xB8000`.
    ///
    /// # Safety
    ///
    /// `0xB8000` must be identity mapped, writable, and not aliased by
    /// any other live `TextModeBuffer`.
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self {
            // SAFETY: VGA_BUFFER_ADDR is a non-zero constant.
            ptr: unsafe { NonNull::new_unchecked(VGA_BUFFER_ADDR as *mut u16) },
        }
    }

    /// Backend at a caller-supplied mapping of the text buffer.
    ///
    /// Returns `None` for a null or misaligned address.
    ///
    /// # Safety
    ///
    /// `addr` must map `CELL_COUNT` writable `u16` cells for the lifetime
    /// of the returned value, with no other live alias.
    pub unsafe fn at(addr: usize) -> Option<Self> {
        if addr % core::mem::align_of::<u16>() != 0 {
            return None;
        }
        NonNull::new(addr as *mut u16).map(|ptr| Self { ptr })
    }

    pub const fn as_ptr(&self) -> *mut u16 {
        self.ptr.as_ptr()
    }
}

// SAFETY: the buffer is a fixed MMIO region; ownership of the handle is
// exclusive by construction, so moving it between contexts is fine.
unsafe impl Send for TextModeBuffer {}

impl CellBuffer for TextModeBuffer {
    #[inline]
    unsafe fn write_cell_unchecked(&mut self, index: usize, value: u16) {
        // SAFETY: the caller guarantees index < CELL_COUNT.
        unsafe { core::ptr::write_volatile(self.ptr.as_ptr().add(index), value) };
        compiler_fence(Ordering::SeqCst);
    }

    #[inline]
    unsafe fn read_cell_unchecked(&self, index: usize) -> u16 {
        // SAFETY: the caller guarantees index < CELL_COUNT.
        unsafe { core::ptr::read_volatile(self.ptr.as_ptr().add(index)) }
    }
}

/// In-memory text grid with the same layout as the hardware buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCellBuffer {
    cells: [u16; CELL_COUNT],
}

impl MemoryCellBuffer {
    /// Grid with every cell zeroed.
    pub const fn new() -> Self {
        Self {
            cells: [0; CELL_COUNT],
        }
    }

    pub fn cells(&self) -> &[u16] {
        &self.cells
    }
}

impl Default for MemoryCellBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CellBuffer for MemoryCellBuffer {
    #[inline]
    unsafe fn write_cell_unchecked(&mut self, index: usize, value: u16) {
        // SAFETY: the caller guarantees index < CELL_COUNT.
        unsafe { *self.cells.get_unchecked_mut(index) = value };
    }

    #[inline]
    unsafe fn read_cell_unchecked(&self, index: usize) -> u16 {
        // SAFETY: the caller guarantees index < CELL_COUNT.
        unsafe { *self.cells.get_unchecked(index) }
    }

    fn fill(&mut self, value: u16) {
        self.cells.fill(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_access_rejects_index_past_end() {
        let mut buffer = MemoryCellBuffer::new();
        assert_eq!(
            buffer.write_cell(CELL_COUNT, 0x0741),
            Err(ConsoleError::InvalidIndex { index: CELL_COUNT })
        );
        assert_eq!(
            buffer.read_cell(CELL_COUNT),
            Err(ConsoleError::InvalidIndex { index: CELL_COUNT })
        );
    }

    #[test]
    fn last_cell_is_addressable() {
        let mut buffer = MemoryCellBuffer::new();
        buffer.write_cell(CELL_COUNT - 1, 0x1f58).unwrap();
        assert_eq!(buffer.read_cell(CELL_COUNT - 1), Ok(0x1f58));
        assert_eq!(buffer.cells()[CELL_COUNT - 1], 0x1f58);
    }

    #[test]
    fn text_mode_buffer_rejects_null_and_misaligned() {
        assert!(unsafe { TextModeBuffer::at(0) }.is_none());
        assert!(unsafe { TextModeBuffer::at(0xb8001) }.is_none());
    }

    #[test]
    fn text_mode_buffer_over_host_memory() {
        let mut backing = std::vec![0u16; CELL_COUNT];
        let mut buffer = unsafe { TextModeBuffer::at(backing.as_mut_ptr() as usize) }.unwrap();
        buffer.fill(0x0720);
        buffer.write_cell(3, 0x0f41).unwrap();
        assert_eq!(buffer.read_cell(3), Ok(0x0f41));
        drop(buffer);
        assert!(backing.iter().enumerate().all(|(i, &c)| c == if i == 3 { 0x0f41 } else { 0x0720 }));
    }
}
