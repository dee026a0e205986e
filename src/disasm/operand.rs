//! Operand decoding and width annotation.
//!
//! An addressing mode is a 4-bit field:
//! - `0` no operand
//! - `1` register (one index byte)
//! - `2` immediate (u32)
//! - otherwise memory: bit 0 = base register byte, bit 1 = 32-bit
//!   displacement (signed when a base is present, unsigned otherwise)

use serde::{Deserialize, Serialize};

use crate::error::{EncodingFault, Result, XvmError};
use crate::formats::xvm::utils::ReadExt;

/// Register file indexed by the operand's register byte.
pub const REGISTERS: [&str; 16] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "pc", "r14",
    "sp",
];

pub const MODE_NONE: u8 = 0;
pub const MODE_REGISTER: u8 = 1;
pub const MODE_IMMEDIATE: u8 = 2;
const MEM_BASE: u8 = 1;
const MEM_DISPLACEMENT: u8 = 2;

/// Operand access width used for annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Width {
    Byte = 1,
    Word = 2,
    Dword = 4,
}

impl Width {
    pub fn bytes(self) -> usize {
        self as usize
    }

    fn keyword(self) -> &'static str {
        match self {
            Width::Byte => "byte",
            Width::Word => "word",
            Width::Dword => "dword",
        }
    }

    fn register_suffix(self) -> &'static str {
        match self {
            Width::Byte => "b",
            Width::Word => "w",
            Width::Dword => "",
        }
    }
}

/// Syntactic class of a decoded operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperandKind {
    None,
    Register(u8),
    Immediate(u32),
    Memory {
        base: Option<u8>,
        displacement: Option<i64>,
    },
}

/// One decoded operand with its rendered text and encoded length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedOperand {
    pub kind: OperandKind,
    pub text: String,
    /// Bytes consumed from the instruction stream.
    pub length: usize,
}

impl DecodedOperand {
    fn none() -> Self {
        Self {
            kind: OperandKind::None,
            text: String::new(),
            length: 0,
        }
    }

    /// Render with a size keyword (memory) or suffix (anything else that is
    /// not an immediate, absent operands included).
    pub fn annotated(&self, width: Width) -> String {
        match self.kind {
            OperandKind::Memory { .. } => format!("{} {}", width.keyword(), self.text),
            OperandKind::Register(_) | OperandKind::None => {
                format!("{}{}", self.text, width.register_suffix())
            }
            OperandKind::Immediate(_) => self.text.clone(),
        }
    }

    /// Literal value of an immediate operand.
    pub fn immediate(&self) -> Option<u32> {
        match self.kind {
            OperandKind::Immediate(v) => Some(v),
            _ => None,
        }
    }
}

fn read_u8(data: &[u8], offset: usize) -> Result<u8> {
    data.read_u8_at(offset).ok_or(XvmError::OutOfBounds {
        offset,
        len: 1,
        size: data.len(),
    })
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    data.read_u32_le_at(offset).ok_or(XvmError::OutOfBounds {
        offset,
        len: 4,
        size: data.len(),
    })
}

fn read_register(data: &[u8], offset: usize) -> Result<u8> {
    let index = read_u8(data, offset)?;
    if index as usize >= REGISTERS.len() {
        return Err(XvmError::IllegalEncoding {
            offset,
            fault: EncodingFault::RegisterIndex { index },
        });
    }
    Ok(index)
}

/// Decode one operand at `offset` using the 4-bit addressing `mode`.
pub fn decode_operand(data: &[u8], offset: usize, mode: u8) -> Result<DecodedOperand> {
    match mode {
        MODE_NONE => Ok(DecodedOperand::none()),
        MODE_REGISTER => {
            let index = read_register(data, offset)?;
            Ok(DecodedOperand {
                kind: OperandKind::Register(index),
                text: REGISTERS[index as usize].to_string(),
                length: 1,
            })
        }
        MODE_IMMEDIATE => {
            let value = read_u32(data, offset)?;
            Ok(DecodedOperand {
                kind: OperandKind::Immediate(value),
                text: format!("{:#x}", value),
                length: 4,
            })
        }
        _ => decode_memory(data, offset, mode),
    }
}

fn decode_memory(data: &[u8], offset: usize, mode: u8) -> Result<DecodedOperand> {
    if mode & (MEM_BASE | MEM_DISPLACEMENT) == 0 {
        return Err(XvmError::IllegalEncoding {
            offset,
            fault: EncodingFault::NoAddressingForm { mode },
        });
    }

    let mut length = 0;
    let mut text = String::from("[");

    let base = if mode & MEM_BASE != 0 {
        let index = read_register(data, offset)?;
        text.push_str(REGISTERS[index as usize]);
        length += 1;
        Some(index)
    } else {
        None
    };

    let displacement = if mode & MEM_DISPLACEMENT != 0 {
        let raw = read_u32(data, offset + length)?;
        let disp = if base.is_some() {
            raw as i32 as i64
        } else {
            raw as i64
        };
        if disp > 0 {
            text.push_str(&format!("+{:#x}", disp));
        } else if disp < 0 {
            text.push_str(&format!("-{:#x}", disp.unsigned_abs()));
        }
        length += 4;
        Some(disp)
    } else {
        None
    };

    text.push(']');
    Ok(DecodedOperand {
        kind: OperandKind::Memory { base, displacement },
        text,
        length,
    })
}
