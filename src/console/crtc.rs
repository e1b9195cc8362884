// src/console/crtc.rs

//! CRT controller register protocol.
//!
//! Every register access is an index write to `0x3D4` followed by a data
//! access on `0x3D5`. The pair is not atomic; callers sharing the
//! controller across interrupt contexts must serialize around it.

use crate::arch::PortBus;
use crate::config::{CRTC_DATA_PORT, CRTC_INDEX_PORT};
use bitflags::bitflags;

/// CRT controller register indices used by the console.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrtcRegister {
    CursorStart = 0x0a,
    CursorEnd = 0x0b,
    CursorLocationHigh = 0x0e,
    CursorLocationLow = 0x0f,
}

bitflags! {
    /// Cursor Start Register (index 0x0A)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CursorStart: u8 {
        /// First scanline of the cursor
        const SCANLINE = 0x1f;
        /// Cursor disable
        const DISABLE = 0x20;
        /// Reserved bits kept on read-modify-write
        const PRESERVED = 0xc0;
    }
}

bitflags! {
    /// Cursor End Register (index 0x0B)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CursorEnd: u8 {
        /// Last scanline of the cursor
        const SCANLINE = 0x1f;
        /// Cursor skew and reserved bits kept on read-modify-write
        const PRESERVED = 0xe0;
    }
}

impl CursorStart {
    /// Register value enabling a cursor from `scanline`, keeping the
    /// reserved bits of `current`.
    pub const fn enable(current: u8, scanline: u8) -> u8 {
        (current & Self::PRESERVED.bits()) | (scanline & Self::SCANLINE.bits())
    }
}

impl CursorEnd {
    /// Register value ending the cursor at `scanline`, keeping the skew
    /// bits of `current`.
    pub const fn with_scanline(current: u8, scanline: u8) -> u8 {
        (current & Self::PRESERVED.bits()) | (scanline & Self::SCANLINE.bits())
    }
}

/// CRT controller reached through a [`PortBus`].
#[derive(Debug)]
pub struct Crtc<P> {
    bus: P,
    index_port: u16,
    data_port: u16,
}

impl<P: PortBus> Crtc<P> {
    /// Controller at the color-adapter ports `0x3D4`/`0x3D5`.
    pub const fn new(bus: P) -> Self {
        Self::with_ports(bus, CRTC_INDEX_PORT, CRTC_DATA_PORT)
    }

    /// Controller at explicit ports (monochrome adapters use `0x3B4`/`0x3B5`).
    pub const fn with_ports(bus: P, index_port: u16, data_port: u16) -> Self {
        Self {
            bus,
            index_port,
            data_port,
        }
    }

    pub fn bus(&self) -> &P {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut P {
        &mut self.bus
    }

    pub fn into_bus(self) -> P {
        self.bus
    }

    #[inline]
    fn select(&mut self, register: CrtcRegister) {
        self.bus.write_u8(self.index_port, register as u8);
    }

    /// Select `register` and write `value` to it.
    pub fn write(&mut self, register: CrtcRegister, value: u8) {
        self.select(register);
        self.bus.write_u8(self.data_port, value);
    }

    /// Select `register` and read it.
    pub fn read(&mut self, register: CrtcRegister) -> u8 {
        self.select(register);
        self.bus.read_u8(self.data_port)
    }

    /// Select `register` once, then read it, transform it and write back.
    pub fn modify<F>(&mut self, register: CrtcRegister, f: F)
    where
        F: FnOnce(u8) -> u8,
    {
        self.select(register);
        let current = self.bus.read_u8(self.data_port);
        self.bus.write_u8(self.data_port, f(current));
    }
}
