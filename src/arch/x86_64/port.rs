// src/arch/x86_64/port.rs

//! x86_64 port I/O
//!
//! `in`/`out` instructions come from the `x86_64` crate; this module only
//! confines them behind [`PortBus`].

use crate::arch::PortBus;
use ::x86_64::instructions::port::Port;

/// Port bus backed by real `in`/`out` instructions.
#[derive(Debug)]
pub struct X86PortBus {
    _private: (),
}

impl X86PortBus {
    /// Create the hardware port bus.
    ///
    /// # Safety
    ///
    /// The caller must run in ring 0 (or hold the I/O permission for
    /// every port it will touch) and must be the only code driving the
    /// devices behind those ports.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl PortBus for X86PortBus {
    #[inline]
    fn read_u8(&mut self, port: u16) -> u8 {
        let mut port = Port::<u8>::new(port);
        // SAFETY: guaranteed by the contract of `X86PortBus::new`.
        unsafe { port.read() }
    }

    #[inline]
    fn write_u8(&mut self, port: u16, value: u8) {
        let mut port = Port::<u8>::new(port);
        // SAFETY: guaranteed by the contract of `X86PortBus::new`.
        unsafe { port.write(value) }
    }
}
