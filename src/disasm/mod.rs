//! XVM instruction decoding.
//!
//! - `operand`: addressing modes and width annotation
//! - `opcode`: the static opcode table
//! - `decoder`: full instruction decode and rendering

pub mod decoder;
pub mod opcode;
pub mod operand;

pub use decoder::{decode_instruction, DecodedInstruction, MAX_INSTRUCTION_LENGTH};
pub use opcode::Flow;
pub use operand::{DecodedOperand, OperandKind, Width};

use crate::error::Result;

/// Common interface for instruction decoders driving the traversal.
pub trait Disassembler {
    /// Decode one instruction at `offset` within `data`.
    fn decode(&self, data: &[u8], offset: usize) -> Result<DecodedInstruction>;

    /// Longest possible encoding in bytes.
    fn max_instruction_length(&self) -> usize;

    fn name(&self) -> &str;
}

/// Decoder for the XVM instruction set.
#[derive(Debug, Clone, Copy, Default)]
pub struct XvmDisassembler;

impl Disassembler for XvmDisassembler {
    fn decode(&self, data: &[u8], offset: usize) -> Result<DecodedInstruction> {
        decode_instruction(data, offset)
    }

    fn max_instruction_length(&self) -> usize {
        MAX_INSTRUCTION_LENGTH
    }

    fn name(&self) -> &str {
        "xvm"
    }
}
