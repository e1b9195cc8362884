// src/string/mod.rs

//! Freestanding memory and string primitives
//!
//! Two layers with the same operation set:
//!
//! - the functions re-exported here work on slices, check every length
//!   against the slices they are given and report [`MemoryError`]s;
//! - [`raw`] keeps the classic pointer contracts unchanged for callers
//!   that only have an address (hardware buffers, allocator blocks,
//!   foreign code). Misuse there is undefined behavior.
//!
//! [`MemoryError`]: crate::errors::MemoryError

pub mod cstr;
pub mod dup;
pub mod mem;
pub mod raw;

pub use cstr::{strcmp, strcpy, strlen, strnlen};
pub use dup::{CStrBuf, strdup, strndup};
pub use mem::{bzero, memchr, memcmp, memcpy, memmove, memset};
