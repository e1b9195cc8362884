// src/console/color.rs

//! VGA color definitions and attribute byte packing

/// VGA color codes (4-bit color palette)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VgaColor {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

impl VgaColor {
    /// Decode the low nibble of `value`.
    pub const fn from_nibble(value: u8) -> Self {
        match value & 0x0f {
            0 => VgaColor::Black,
            1 => VgaColor::Blue,
            2 => VgaColor::Green,
            3 => VgaColor::Cyan,
            4 => VgaColor::Red,
            5 => VgaColor::Magenta,
            6 => VgaColor::Brown,
            7 => VgaColor::LightGray,
            8 => VgaColor::DarkGray,
            9 => VgaColor::LightBlue,
            10 => VgaColor::LightGreen,
            11 => VgaColor::LightCyan,
            12 => VgaColor::LightRed,
            13 => VgaColor::Pink,
            14 => VgaColor::Yellow,
            _ => VgaColor::White,
        }
    }
}

/// Attribute byte: background in the high nibble, foreground in the low one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    /// Create a new color code from foreground and background colors
    pub const fn new(fg: VgaColor, bg: VgaColor) -> Self {
        Self((bg as u8) << 4 | (fg as u8))
    }

    /// Wrap an already packed attribute byte
    pub const fn from_raw(attr: u8) -> Self {
        Self(attr)
    }

    /// Get the raw byte value
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    pub const fn foreground(self) -> VgaColor {
        VgaColor::from_nibble(self.0)
    }

    pub const fn background(self) -> VgaColor {
        VgaColor::from_nibble(self.0 >> 4)
    }

    /// Default color scheme (light gray on black)
    pub const fn normal() -> Self {
        Self::new(VgaColor::LightGray, VgaColor::Black)
    }
}

/// Pack a character and its attribute into one buffer cell.
#[inline]
pub const fn encode_cell(ch: u8, color: ColorCode) -> u16 {
    (ch as u16) | ((color.as_u8() as u16) << 8)
}

/// Split a buffer cell into character and attribute.
#[inline]
pub const fn decode_cell(cell: u16) -> (u8, ColorCode) {
    (cell as u8, ColorCode::from_raw((cell >> 8) as u8))
}
