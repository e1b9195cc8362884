// src/memory/mod.rs

//! Memory subsystem primitives and abstractions.
//!
//! Span validation shared by the safe string wrappers, and the allocator
//! interface the duplicating operations draw from.

pub mod allocator;
pub mod safety;

pub use allocator::{ByteAllocator, GlobalByteAllocator, HeapByteAllocator};
pub use safety::{MemoryRegion, spans_overlap, validate_range, validate_span};
