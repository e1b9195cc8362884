// src/lib.rs
//! Tiny RT - bare-metal runtime primitives
//!
//! The lowest layer of the kernel: a VGA text-mode console driver and a
//! freestanding memory/string library. Neither depends on the other, and
//! neither needs anything from the kernel beyond a byte allocator for
//! `strdup`/`strndup`.
//!
//! - [`console`]: text buffer and hardware cursor
//! - [`string`]: `mem*`/`str*` primitives, checked and raw
//! - [`memory`]: span validation and the allocator interface
//!
//! Nothing here takes locks. Callers serialize access (the console is an
//! owned handle taking `&mut self`; the optional global instance sits
//! behind a spin lock).

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

extern crate alloc;

pub mod arch;
pub mod config;
pub mod console;
pub mod errors;
pub mod memory;
pub mod string;

pub use config::ConsoleConfig;
pub use errors::{ConsoleError, ErrorContext, KernelError, MemoryError, Result};
