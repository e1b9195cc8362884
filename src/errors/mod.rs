// src/errors/mod.rs

//! Unified error handling module
//!
//! Every fallible operation in the crate reports a subsystem error that
//! converts into [`KernelError`].

pub mod unified;

pub use unified::{ConsoleError, ErrorContext, KernelError, MemoryError, Result};
