// src/arch/mod.rs

//! Architecture-specific abstractions.

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

#[cfg(target_arch = "x86_64")]
pub use self::x86_64::X86PortBus;

/// Byte-wide I/O port access.
///
/// The console drives the CRT controller through this trait so the same
/// register protocol runs against real ports or a recording double.
/// Implementations that touch hardware must only be constructible by
/// code that owns the ports (their constructors are `unsafe`).
pub trait PortBus {
    /// Read one byte from `port`.
    fn read_u8(&mut self, port: u16) -> u8;

    /// Write one byte to `port`.
    fn write_u8(&mut self, port: u16, value: u8);
}

impl<P: PortBus + ?Sized> PortBus for &mut P {
    fn read_u8(&mut self, port: u16) -> u8 {
        (**self).read_u8(port)
    }

    fn write_u8(&mut self, port: u16, value: u8) {
        (**self).write_u8(port, value);
    }
}
