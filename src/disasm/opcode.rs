//! Static opcode table.

use serde::Serialize;

use super::operand::Width;
use Width::{Byte as B, Dword as D, Word as W};

/// How an instruction affects the linear walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Flow {
    /// Falls through to the next instruction.
    Sequential,
    /// Ends the current path (`hlt`, `ret`).
    Terminal,
    /// Unconditional transfer; no fall-through.
    Jump,
    /// Conditional jump or call; falls through and may seed a target.
    Branch,
}

/// One row of the opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpcodeInfo {
    pub mnemonic: &'static str,
    /// Annotation widths for the rendered operands; the length is the
    /// number of operands shown.
    pub widths: &'static [Width],
    pub flow: Flow,
    /// Total length is forced to opcode + mode byte.
    pub fixed_length: bool,
}

const fn op(mnemonic: &'static str, widths: &'static [Width]) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        widths,
        flow: Flow::Sequential,
        fixed_length: false,
    }
}

const fn flow(mnemonic: &'static str, widths: &'static [Width], flow: Flow) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        widths,
        flow,
        fixed_length: false,
    }
}

const fn fixed(mnemonic: &'static str, flow: Flow) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        widths: &[],
        flow,
        fixed_length: true,
    }
}

/// Number of recognized opcodes.
pub const OPCODE_COUNT: usize = 50;

pub static OPCODES: [OpcodeInfo; OPCODE_COUNT] = [
    op("mov", &[D, D]),
    op("mov", &[B, B]),
    op("mov", &[W, W]),
    fixed("nop", Flow::Sequential),
    fixed("hlt", Flow::Terminal),
    flow("ret", &[], Flow::Terminal),
    flow("call", &[D], Flow::Branch),
    op("syscall", &[]),
    op("shl", &[D, B]),
    op("shr", &[D, B]),
    op("add", &[D, D]),
    op("add", &[B, B]),
    op("add", &[W, W]),
    op("sub", &[D, D]),
    op("sub", &[B, B]),
    op("sub", &[W, W]),
    op("mul", &[D, D]),
    op("mul", &[B, B]),
    op("mul", &[W, W]),
    op("div", &[D, D]),
    op("div", &[B, B]),
    op("div", &[W, W]),
    op("xor", &[D, D]),
    op("xor", &[B, B]),
    op("xor", &[W, W]),
    op("and", &[D, D]),
    op("and", &[B, B]),
    op("and", &[W, W]),
    op("or", &[D, D]),
    op("or", &[B, B]),
    op("or", &[W, W]),
    op("not", &[D]),
    op("not", &[B]),
    op("not", &[W]),
    op("push", &[D]),
    op("pop", &[D]),
    op("xchg", &[D, D]),
    op("inc", &[D]),
    op("dec", &[D]),
    op("cmp", &[D, D]),
    op("cmp", &[B, B]),
    op("cmp", &[W, W]),
    op("test", &[D, D]),
    flow("jmp", &[D], Flow::Jump),
    flow("je", &[D], Flow::Branch),
    flow("jne", &[D], Flow::Branch),
    flow("ja", &[D], Flow::Branch),
    flow("jb", &[D], Flow::Branch),
    flow("jae", &[D], Flow::Branch),
    flow("jbe", &[D], Flow::Branch),
];

/// Entry for values outside the table.
pub static UNKNOWN_OPCODE: OpcodeInfo = fixed("nop", Flow::Sequential);

/// Look up an opcode; unrecognized values decode as `nop`.
pub fn lookup(opcode: u8) -> &'static OpcodeInfo {
    OPCODES.get(opcode as usize).unwrap_or(&UNKNOWN_OPCODE)
}

/// Whether `opcode` is one of the recognized values.
pub fn is_known(opcode: u8) -> bool {
    (opcode as usize) < OPCODE_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_variants_line_up() {
        for (base, name) in [
            (0u8, "mov"),
            (10, "add"),
            (13, "sub"),
            (16, "mul"),
            (19, "div"),
            (22, "xor"),
            (25, "and"),
            (28, "or"),
            (39, "cmp"),
        ] {
            assert_eq!(lookup(base).mnemonic, name);
            assert_eq!(lookup(base).widths, &[D, D]);
            assert_eq!(lookup(base + 1).widths, &[B, B]);
            assert_eq!(lookup(base + 2).widths, &[W, W]);
        }
        assert_eq!(lookup(31).widths, &[D]);
        assert_eq!(lookup(32).widths, &[B]);
        assert_eq!(lookup(33).widths, &[W]);
    }

    #[test]
    fn shifts_take_byte_count() {
        assert_eq!(lookup(8).widths, &[D, B]);
        assert_eq!(lookup(9).mnemonic, "shr");
    }

    #[test]
    fn control_flow_rows() {
        assert_eq!(lookup(4).flow, Flow::Terminal);
        assert_eq!(lookup(5).flow, Flow::Terminal);
        assert_eq!(lookup(6).flow, Flow::Branch);
        assert_eq!(lookup(43).flow, Flow::Jump);
        for opcode in 44..=49 {
            assert_eq!(lookup(opcode).flow, Flow::Branch);
            assert!(lookup(opcode).mnemonic.starts_with('j'));
        }
        let sequential = OPCODES.iter().filter(|o| o.flow == Flow::Sequential).count();
        assert_eq!(sequential, OPCODE_COUNT - 10);
    }

    #[test]
    fn unknown_opcodes_are_nop() {
        for opcode in 50..=255u8 {
            assert!(!is_known(opcode));
            assert_eq!(lookup(opcode), &UNKNOWN_OPCODE);
        }
        assert!(lookup(3).fixed_length);
        assert!(lookup(4).fixed_length);
        assert!(!lookup(5).fixed_length);
    }
}
