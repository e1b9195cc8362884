// src/console/mod.rs

//! VGA text-mode console driver
//!
//! [`Console`] owns a character buffer and the CRT controller. It keeps no
//! software cursor: every cursor operation is a complete, idempotent
//! register write.
//!
//! # Checked and unchecked writes
//!
//! [`Console::put_char_color`] stores a cell without validating the
//! coordinates, like the firmware-era drivers it replaces; it is `unsafe`
//! because an out-of-grid coordinate writes past the buffer.
//! [`Console::try_put_char_color`] and [`Console::try_move_cursor`] reject
//! such coordinates and leave the hardware untouched.
//!
//! # Examples
//!
//! ```
//! use tiny_rt::arch::PortBus;
//! use tiny_rt::console::{ColorCode, Console, MemoryCellBuffer};
//!
//! struct NullBus;
//!
//! impl PortBus for NullBus {
//!     fn read_u8(&mut self, _port: u16) -> u8 { 0 }
//!     fn write_u8(&mut self, _port: u16, _value: u8) {}
//! }
//!
//! let mut console = Console::new(MemoryCellBuffer::new(), NullBus);
//! console.clear();
//! console.try_put_char_color(b'A', ColorCode::from_raw(0x0f), 0, 0).unwrap();
//! assert_eq!(console.read_cell(0, 0), Ok(0x0f41));
//! ```

mod buffer;
mod color;
mod crtc;
#[cfg(target_arch = "x86_64")]
mod global;

pub use buffer::{CellBuffer, MemoryCellBuffer, TextModeBuffer};
pub use color::{ColorCode, VgaColor, decode_cell, encode_cell};
pub use crtc::{Crtc, CrtcRegister, CursorEnd, CursorStart};
#[cfg(target_arch = "x86_64")]
pub use global::{HardwareConsole, global, init_global, with_global};

use crate::arch::PortBus;
use crate::config::{ConsoleConfig, VGA_HEIGHT, VGA_WIDTH};
use crate::errors::ConsoleError;

/// A character-grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Validate that the coordinate lies inside the grid.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidPosition`] when `x >= VGA_WIDTH` or
    /// `y >= VGA_HEIGHT`.
    pub const fn checked(x: usize, y: usize) -> Result<Self, ConsoleError> {
        if x < VGA_WIDTH && y < VGA_HEIGHT {
            Ok(Self { x, y })
        } else {
            Err(ConsoleError::InvalidPosition { x, y })
        }
    }

    /// Linear cell offset `y * VGA_WIDTH + x`.
    ///
    /// Wraps instead of overflowing; only meaningful for in-grid positions.
    pub const fn index(self) -> usize {
        self.y.wrapping_mul(VGA_WIDTH).wrapping_add(self.x)
    }
}

/// Text console over a cell buffer and a CRT controller
#[derive(Debug)]
pub struct Console<B, P> {
    buffer: B,
    crtc: Crtc<P>,
    config: ConsoleConfig,
}

impl<B: CellBuffer, P: PortBus> Console<B, P> {
    /// Console with the default configuration.
    pub const fn new(buffer: B, bus: P) -> Self {
        Self::with_config(buffer, bus, ConsoleConfig::new())
    }

    pub const fn with_config(buffer: B, bus: P, config: ConsoleConfig) -> Self {
        Self {
            buffer,
            crtc: Crtc::new(bus),
            config,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn bus(&self) -> &P {
        self.crtc.bus()
    }

    /// Give back the buffer and the port bus.
    pub fn into_parts(self) -> (B, P) {
        (self.buffer, self.crtc.into_bus())
    }

    /// Startup sequence: clear the screen and show the default cursor.
    pub fn init(&mut self) {
        self.clear();
        self.enable_default_cursor();
        log::debug!(
            "console initialized: {}x{}, attr {:#04x}",
            VGA_WIDTH,
            VGA_HEIGHT,
            self.config.default_color.as_u8()
        );
    }

    /// Fill every cell with a space under the default attribute.
    pub fn clear(&mut self) {
        let blank = encode_cell(b' ', self.config.default_color);
        self.buffer.fill(blank);
    }

    /// Show the cursor spanning scanlines `start..=end`.
    ///
    /// Only the scanline bits of the two shape registers change; the
    /// reserved and skew bits read back from hardware are preserved.
    pub fn enable_cursor(&mut self, start: u8, end: u8) {
        self.crtc
            .modify(CrtcRegister::CursorStart, |current| CursorStart::enable(current, start));
        self.crtc
            .modify(CrtcRegister::CursorEnd, |current| CursorEnd::with_scanline(current, end));
        log::trace!("cursor enabled: scanlines {}..={}", start, end);
    }

    /// Show the cursor with the configured default shape.
    pub fn enable_default_cursor(&mut self) {
        self.enable_cursor(self.config.cursor_start, self.config.cursor_end);
    }

    /// Hide the cursor by writing the configured disable sentinel.
    pub fn disable_cursor(&mut self) {
        self.crtc
            .write(CrtcRegister::CursorStart, self.config.cursor_disable_value);
        log::trace!("cursor disabled");
    }

    /// Place the hardware cursor at `(x, y)`.
    ///
    /// The position is truncated to 16 bits and written low byte first.
    /// Out-of-grid coordinates move the cursor off screen but touch no
    /// memory.
    pub fn move_cursor(&mut self, x: usize, y: usize) {
        let pos = Position::new(x, y).index() as u16;
        let [low, high] = pos.to_le_bytes();
        self.crtc.write(CrtcRegister::CursorLocationLow, low);
        self.crtc.write(CrtcRegister::CursorLocationHigh, high);
    }

    /// Checked [`Console::move_cursor`].
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidPosition`] without touching the
    /// controller when `(x, y)` is outside the grid.
    pub fn try_move_cursor(&mut self, x: usize, y: usize) -> Result<(), ConsoleError> {
        let pos = Position::checked(x, y).inspect_err(|_| {
            log::debug!("rejected cursor move to ({}, {})", x, y);
        })?;
        self.move_cursor(pos.x, pos.y);
        Ok(())
    }

    /// Linear cursor offset read back from the controller.
    pub fn cursor_position(&mut self) -> u16 {
        let low = self.crtc.read(CrtcRegister::CursorLocationLow);
        let high = self.crtc.read(CrtcRegister::CursorLocationHigh);
        u16::from_le_bytes([low, high])
    }

    /// Store `ch` with attribute `color` at `(x, y)`.
    ///
    /// The cursor is not moved.
    ///
    /// # Safety
    ///
    /// `x < VGA_WIDTH` and `y < VGA_HEIGHT` must hold; otherwise the write
    /// lands outside the buffer.
    pub unsafe fn put_char_color(&mut self, ch: u8, color: ColorCode, x: usize, y: usize) {
        let index = Position::new(x, y).index();
        // SAFETY: the caller guarantees the coordinate is inside the grid.
        unsafe { self.buffer.write_cell_unchecked(index, encode_cell(ch, color)) };
    }

    /// Checked [`Console::put_char_color`].
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidPosition`] without writing when
    /// `(x, y)` is outside the grid.
    pub fn try_put_char_color(
        &mut self,
        ch: u8,
        color: ColorCode,
        x: usize,
        y: usize,
    ) -> Result<(), ConsoleError> {
        let pos = Position::checked(x, y).inspect_err(|_| {
            log::debug!("rejected cell write at ({}, {})", x, y);
        })?;
        // SAFETY: Position::checked validated the coordinate.
        unsafe { self.put_char_color(ch, color, pos.x, pos.y) };
        Ok(())
    }

    /// Write `bytes` from `(x, y)` rightwards, clipped at the row end.
    ///
    /// Returns how many bytes were written.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidPosition`] if the start is outside the
    /// grid.
    pub fn put_str_color(
        &mut self,
        bytes: &[u8],
        color: ColorCode,
        x: usize,
        y: usize,
    ) -> Result<usize, ConsoleError> {
        let start = Position::checked(x, y).inspect_err(|_| {
            log::debug!("rejected string write at ({}, {})", x, y);
        })?;
        let written = bytes.len().min(VGA_WIDTH - start.x);
        for (offset, &ch) in bytes[..written].iter().enumerate() {
            // SAFETY: start.x + offset < VGA_WIDTH and start.y < VGA_HEIGHT.
            unsafe { self.put_char_color(ch, color, start.x + offset, start.y) };
        }
        Ok(written)
    }

    /// Read the packed cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidPosition`] for out-of-grid coordinates.
    pub fn read_cell(&self, x: usize, y: usize) -> Result<u16, ConsoleError> {
        let pos = Position::checked(x, y).inspect_err(|_| {
            log::debug!("rejected cell read at ({}, {})", x, y);
        })?;
        self.buffer.read_cell(pos.index())
    }
}
