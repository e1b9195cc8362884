// src/config.rs

//! Display and cursor configuration
//!
//! The compile-time constants describe the PC/AT text-mode layout. The
//! values a platform may need to override at runtime are grouped in
//! [`ConsoleConfig`].

use crate::console::ColorCode;

/// Text buffer physical memory address
///
/// Valid for BIOS text mode. Kernels that remap physical memory pass
/// the virtual alias to `TextModeBuffer::at` instead.
pub const VGA_BUFFER_ADDR: usize = 0xb8000;

/// Screen dimensions
pub const VGA_WIDTH: usize = 80;
pub const VGA_HEIGHT: usize = 25;

/// Total number of character cells
pub const CELL_COUNT: usize = VGA_WIDTH * VGA_HEIGHT;

/// Light gray on black
pub const VGA_DEFAULT_COLOR: u8 = 0x07;

/// Default cursor shape (scanlines 14-15, underline)
pub const CURSOR_START: u8 = 14;
pub const CURSOR_END: u8 = 15;

/// Value written to the cursor-start register to hide the cursor
///
/// Sets the cursor-disable bit with a zero start scanline. Standard VGA
/// honors it; some compatible adapters ignore bit 5, so platforms that
/// need a different sentinel override it through [`ConsoleConfig`].
pub const CURSOR_DISABLE_VALUE: u8 = 0x20;

/// CRT controller ports (color adapters)
pub const CRTC_INDEX_PORT: u16 = 0x3d4;
pub const CRTC_DATA_PORT: u16 = 0x3d5;

/// Runtime console settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Attribute used by `clear`
    pub default_color: ColorCode,
    /// First scanline of the default cursor
    pub cursor_start: u8,
    /// Last scanline of the default cursor
    pub cursor_end: u8,
    /// Value that hides the cursor on this platform
    pub cursor_disable_value: u8,
}

impl ConsoleConfig {
    pub const fn new() -> Self {
        Self {
            default_color: ColorCode::from_raw(VGA_DEFAULT_COLOR),
            cursor_start: CURSOR_START,
            cursor_end: CURSOR_END,
            cursor_disable_value: CURSOR_DISABLE_VALUE,
        }
    }

    #[must_use]
    pub const fn with_default_color(mut self, color: ColorCode) -> Self {
        self.default_color = color;
        self
    }

    #[must_use]
    pub const fn with_cursor_shape(mut self, start: u8, end: u8) -> Self {
        self.cursor_start = start;
        self.cursor_end = end;
        self
    }

    #[must_use]
    pub const fn with_cursor_disable_value(mut self, value: u8) -> Self {
        self.cursor_disable_value = value;
        self
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_constants() {
        let config = ConsoleConfig::default();
        assert_eq!(config.default_color.as_u8(), VGA_DEFAULT_COLOR);
        assert_eq!(config.cursor_start, CURSOR_START);
        assert_eq!(config.cursor_end, CURSOR_END);
        assert_eq!(config.cursor_disable_value, 0x20);
    }

    #[test]
    fn builders_override_single_fields() {
        let config = ConsoleConfig::new()
            .with_cursor_shape(0, 15)
            .with_cursor_disable_value(0x3f);
        assert_eq!((config.cursor_start, config.cursor_end), (0, 15));
        assert_eq!(config.cursor_disable_value, 0x3f);
        assert_eq!(config.default_color.as_u8(), VGA_DEFAULT_COLOR);
    }
}
