//! Instruction decoding.
//!
//! An instruction is an opcode byte, a mode byte (low nibble: operand 1,
//! high nibble: operand 2) and the operand bytes the two modes imply.
//! Operand bytes are always consumed according to the mode nibbles, even
//! when the mnemonic displays fewer operands.

use serde::Serialize;

use super::opcode::{self, Flow};
use super::operand::{decode_operand, DecodedOperand, MODE_NONE};
use crate::error::{EncodingFault, Result, XvmError};
use crate::formats::xvm::utils::ReadExt;

/// Opcode byte plus mode byte.
pub const PREFIX_LENGTH: usize = 2;
/// Two memory operands with base and displacement.
pub const MAX_INSTRUCTION_LENGTH: usize = PREFIX_LENGTH + 5 + 5;

/// A fully decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedInstruction {
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub operands: [DecodedOperand; 2],
    /// Rendered assembly line.
    pub text: String,
    /// Total bytes consumed.
    pub length: usize,
    pub flow: Flow,
}

impl DecodedInstruction {
    /// Literal destination of a direct jump or call.
    ///
    /// Register and memory targets are indirect and yield `None`.
    pub fn branch_target(&self) -> Option<u32> {
        match self.flow {
            Flow::Jump | Flow::Branch => self.operands[0].immediate(),
            Flow::Sequential | Flow::Terminal => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.flow == Flow::Terminal
    }
}

fn read_byte(data: &[u8], offset: usize) -> Result<u8> {
    data.read_u8_at(offset).ok_or(XvmError::OutOfBounds {
        offset,
        len: 1,
        size: data.len(),
    })
}

/// Decode the instruction at `offset`.
pub fn decode_instruction(data: &[u8], offset: usize) -> Result<DecodedInstruction> {
    let opcode = read_byte(data, offset)?;
    let modes = read_byte(data, offset + 1)?;
    let mode1 = modes & 0xf;
    let mode2 = modes >> 4;

    if mode1 == MODE_NONE && mode2 != MODE_NONE {
        return Err(XvmError::IllegalEncoding {
            offset: offset + 1,
            fault: EncodingFault::MissingFirstOperand { mode2 },
        });
    }

    let op1 = decode_operand(data, offset + PREFIX_LENGTH, mode1)?;
    let op2 = decode_operand(data, offset + PREFIX_LENGTH + op1.length, mode2)?;

    let info = opcode::lookup(opcode);
    let length = if info.fixed_length {
        PREFIX_LENGTH
    } else {
        PREFIX_LENGTH + op1.length + op2.length
    };

    let text = match info.widths {
        [] => info.mnemonic.to_string(),
        [w1] => format!("{:<8}{}", info.mnemonic, op1.annotated(*w1)),
        [w1, w2, ..] => format!(
            "{:<8}{}, {}",
            info.mnemonic,
            op1.annotated(*w1),
            op2.annotated(*w2)
        ),
    };

    Ok(DecodedInstruction {
        opcode,
        mnemonic: info.mnemonic,
        operands: [op1, op2],
        text,
        length,
        flow: info.flow,
    })
}
