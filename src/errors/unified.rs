// src/errors/unified.rs

//! Unified error types for the runtime core
//!
//! The unchecked primitives never report errors (misuse is undefined
//! behavior, exactly like the C contracts they mirror). The checked
//! variants and the duplicating operations report one of the types below.

use core::fmt;

/// Top-level error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// Memory/string primitive error
    Memory(MemoryError),
    /// Console driver error
    Console(ConsoleError),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::Memory(e) => write!(f, "Memory error: {}", e),
            KernelError::Console(e) => write!(f, "Console error: {}", e),
        }
    }
}

/// Memory and string primitive errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    /// The requested byte count runs past the end of a span
    OutOfBounds {
        /// Bytes the operation needed
        required: usize,
        /// Bytes the span actually holds
        available: usize,
    },
    /// Destination too small for the copy (e.g. `strcpy`)
    InsufficientSpace {
        /// Bytes needed including the terminator
        required: usize,
        /// Capacity of the destination
        available: usize,
    },
    /// No NUL terminator inside the span
    Unterminated,
    /// The allocator could not serve the request
    AllocationFailed {
        /// Size of the failed request in bytes
        size: usize,
    },
    /// Address or length arithmetic overflowed
    Overflow,
}

impl MemoryError {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MemoryError::OutOfBounds { .. } => "out of bounds",
            MemoryError::InsufficientSpace { .. } => "insufficient space",
            MemoryError::Unterminated => "unterminated string",
            MemoryError::AllocationFailed { .. } => "allocation failed",
            MemoryError::Overflow => "arithmetic overflow",
        }
    }
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryError::OutOfBounds { required, available }
            | MemoryError::InsufficientSpace { required, available } => write!(
                f,
                "{} (required {}, available {})",
                self.as_str(),
                required,
                available
            ),
            MemoryError::AllocationFailed { size } => {
                write!(f, "{} ({} bytes)", self.as_str(), size)
            }
            _ => f.write_str(self.as_str()),
        }
    }
}

impl From<MemoryError> for KernelError {
    fn from(err: MemoryError) -> Self {
        KernelError::Memory(err)
    }
}

/// Console driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// Coordinates outside the text grid
    InvalidPosition {
        /// Column
        x: usize,
        /// Row
        y: usize,
    },
    /// Linear cell index outside the buffer
    InvalidIndex {
        /// Offending index
        index: usize,
    },
    /// The global console was already installed
    AlreadyInitialized,
    /// The global console has not been installed yet
    NotInitialized,
}

impl ConsoleError {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConsoleError::InvalidPosition { .. } => "invalid position",
            ConsoleError::InvalidIndex { .. } => "invalid cell index",
            ConsoleError::AlreadyInitialized => "already initialized",
            ConsoleError::NotInitialized => "not initialized",
        }
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::InvalidPosition { x, y } => {
                write!(f, "{} ({}, {})", self.as_str(), x, y)
            }
            ConsoleError::InvalidIndex { index } => write!(f, "{} {}", self.as_str(), index),
            _ => f.write_str(self.as_str()),
        }
    }
}

impl From<ConsoleError> for KernelError {
    fn from(err: ConsoleError) -> Self {
        KernelError::Console(err)
    }
}

/// Result type alias for runtime-core operations
pub type Result<T> = core::result::Result<T, KernelError>;

/// Helper trait for error context
pub trait ErrorContext {
    /// Get a detailed description of the error
    fn context(&self) -> &'static str;
}

impl ErrorContext for KernelError {
    fn context(&self) -> &'static str {
        match self {
            KernelError::Memory(_) => "Error occurred in memory/string primitives",
            KernelError::Console(_) => "Error occurred in text console driver",
        }
    }
}

impl ErrorContext for MemoryError {
    fn context(&self) -> &'static str {
        match self {
            MemoryError::OutOfBounds { .. } => "Byte count exceeds the length of the span",
            MemoryError::InsufficientSpace { .. } => {
                "Destination buffer cannot hold the source and its terminator"
            }
            MemoryError::Unterminated => "Byte string has no NUL terminator within its span",
            MemoryError::AllocationFailed { .. } => "Allocator returned no memory for a duplicate",
            MemoryError::Overflow => "Length or address computation overflowed usize",
        }
    }
}

impl ErrorContext for ConsoleError {
    fn context(&self) -> &'static str {
        match self {
            ConsoleError::InvalidPosition { .. } => "Attempted to address a cell outside the grid",
            ConsoleError::InvalidIndex { .. } => "Attempted to access a cell past the buffer end",
            ConsoleError::AlreadyInitialized => "Global console cannot be installed twice",
            ConsoleError::NotInitialized => "Global console must be installed before use",
        }
    }
}
