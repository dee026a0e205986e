//! Error types for XVM container parsing and disassembly.
//!
//! All fallible operations in the crate report through [`XvmError`]. Parse
//! failures carry the image offset at which they were detected so callers can
//! point at the offending bytes.

use thiserror::Error;

/// Why an instruction encoding was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFault {
    /// Memory-class mode with neither the base nor the displacement bit set.
    NoAddressingForm { mode: u8 },
    /// Operand 2 present while operand 1 is absent.
    MissingFirstOperand { mode2: u8 },
    /// Register byte outside the 16-entry register file.
    RegisterIndex { index: u8 },
}

impl std::fmt::Display for EncodingFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoAddressingForm { mode } => {
                write!(f, "addressing mode {} selects no operand form", mode)
            }
            Self::MissingFirstOperand { mode2 } => {
                write!(f, "operand 2 (mode {}) without operand 1", mode2)
            }
            Self::RegisterIndex { index } => write!(f, "register index {} out of range", index),
        }
    }
}

/// Main error type for XVM operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XvmError {
    /// The byte image is not a well-formed container
    #[error("Invalid container at offset {offset:#x}: {message}")]
    InvalidContainer { offset: usize, message: String },

    /// The instruction stream holds an encoding with no defined meaning
    #[error("Illegal encoding at offset {offset:#x}: {fault}")]
    IllegalEncoding { offset: usize, fault: EncodingFault },

    /// No section maps the virtual address
    #[error("Unmapped virtual address {address:#x}")]
    UnmappedAddress { address: u64 },

    /// A decode read ran past the end of the image
    #[error("Read of {len} bytes at offset {offset:#x} exceeds image size {size:#x}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },

    /// Traversal instruction budget exhausted
    #[error("Instruction budget exceeded ({limit} instructions)")]
    BudgetExceeded { limit: usize },
}

impl XvmError {
    pub(crate) fn invalid_container(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidContainer {
            offset,
            message: message.into(),
        }
    }
}

/// Result type alias for XVM operations
pub type Result<T> = std::result::Result<T, XvmError>;
