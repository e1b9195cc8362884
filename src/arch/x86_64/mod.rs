// src/arch/x86_64/mod.rs

pub mod port;

pub use port::X86PortBus;
