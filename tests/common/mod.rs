//! Common test utilities and helpers.
//!
//! Builds XVM container images in memory so integration tests do not depend
//! on sample files.

#![allow(dead_code)]

use xvmdis::formats::xvm::{SECTION_MARKER, XVM_MAGIC};

struct PendingSection {
    name: String,
    vsize: u32,
    vaddr: u32,
    protect: u32,
    rsize: u32,
    payload: Vec<u8>,
}

/// In-memory container writer.
pub struct ContainerBuilder {
    magic: u32,
    entry: u32,
    symbols: Vec<(u32, u32)>,
    sections: Vec<PendingSection>,
}

impl ContainerBuilder {
    pub fn new(entry: u32) -> Self {
        Self {
            magic: XVM_MAGIC,
            entry,
            symbols: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn magic(mut self, magic: u32) -> Self {
        self.magic = magic;
        self
    }

    /// Section whose virtual and physical sizes equal the payload length.
    pub fn section(self, name: &str, vaddr: u32, protect: u32, payload: &[u8]) -> Self {
        let len = payload.len() as u32;
        self.section_raw(name, len, vaddr, protect, len, payload)
    }

    /// Section with explicit (uncapped) size fields.
    pub fn section_raw(
        mut self,
        name: &str,
        vsize: u32,
        vaddr: u32,
        protect: u32,
        rsize: u32,
        payload: &[u8],
    ) -> Self {
        self.sections.push(PendingSection {
            name: name.to_string(),
            vsize,
            vaddr,
            protect,
            rsize,
            payload: payload.to_vec(),
        });
        self
    }

    /// Symbol whose name string lives at virtual address `name_va`.
    pub fn symbol(mut self, name_va: u32, address: u32) -> Self {
        self.symbols.push((name_va, address));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let word = |out: &mut Vec<u8>, w: u32| out.extend_from_slice(&w.to_le_bytes());
        for w in [
            self.magic,
            self.entry,
            self.symbols.len() as u32,
            0,
            self.sections.len() as u32,
        ] {
            word(&mut out, w);
        }
        for &(name_va, address) in &self.symbols {
            word(&mut out, name_va);
            word(&mut out, address);
        }
        for s in &self.sections {
            word(&mut out, SECTION_MARKER);
            out.extend_from_slice(s.name.as_bytes());
            out.push(0);
            for w in [s.vsize, s.vaddr, s.protect, s.rsize] {
                word(&mut out, w);
            }
            out.extend_from_slice(&s.payload);
        }
        out
    }
}

/// Tiny instruction encoders for test programs.
pub mod asm {
    pub const HLT: [u8; 2] = [4, 0];
    pub const RET: [u8; 2] = [5, 0];
    pub const NOP: [u8; 2] = [3, 0];

    /// Opcode with an immediate first operand.
    pub fn imm(opcode: u8, value: u32) -> Vec<u8> {
        let mut out = vec![opcode, 0x02];
        out.extend_from_slice(&value.to_le_bytes());
        out
    }

    /// Opcode with two register operands.
    pub fn reg2(opcode: u8, a: u8, b: u8) -> Vec<u8> {
        vec![opcode, 0x11, a, b]
    }

    /// Opcode with one register operand.
    pub fn reg(opcode: u8, a: u8) -> Vec<u8> {
        vec![opcode, 0x01, a]
    }
}
