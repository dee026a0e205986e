//! XVM executable container parser
//!
//! Layout (little-endian throughout):
//! - 20-byte header: magic, entry, symbol count, reserved, section count
//! - symbol table: `symbol count` records of (name address, address)
//! - section table: entries interleaved with their payloads

pub mod headers;
pub mod sections;
pub mod symbols;
pub mod types;
pub mod utils;

use tracing::debug;

use crate::error::{Result, XvmError};
use headers::parse_header;
pub use sections::SectionTable;
use symbols::parse_symbols;
pub use types::*;

/// A parsed container that owns its byte image.
///
/// The image and the tables derived from it are read-only after parsing,
/// so a program can back any number of independent analyses.
#[derive(Debug, Clone)]
pub struct XvmProgram {
    data: Vec<u8>,
    header: Header,
    sections: SectionTable,
    symbols: Vec<Symbol>,
}

impl XvmProgram {
    /// Parse a container, taking ownership of the image.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let header = parse_header(&data)?;

        let section_table_offset = (header.symbol_count as usize)
            .checked_mul(SYMBOL_RECORD_SIZE)
            .and_then(|n| n.checked_add(HEADER_SIZE))
            .ok_or_else(|| XvmError::invalid_container(8, "symbol count overflows image"))?;
        let sections = SectionTable::parse(&data, section_table_offset, header.section_count)?;
        let symbols = parse_symbols(&data, HEADER_SIZE, header.symbol_count, &sections)?;

        debug!(
            entry = header.entry,
            sections = sections.sections().len(),
            symbols = symbols.len(),
            size = data.len(),
            "parsed XVM container"
        );

        Ok(Self {
            data,
            header,
            sections,
            symbols,
        })
    }

    /// Parse a container from a borrowed slice.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::from_bytes(data.to_vec())
    }

    /// Raw image bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Entry point virtual address
    pub fn entry(&self) -> u32 {
        self.header.entry
    }

    /// Sections in table order
    pub fn sections(&self) -> &[Section] {
        self.sections.sections()
    }

    pub fn section_table(&self) -> &SectionTable {
        &self.sections
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn section_by_name(&self, name: &str) -> Option<&Section> {
        self.sections.section_by_name(name)
    }

    pub fn section_containing(&self, address: u32) -> Option<&Section> {
        self.sections.section_containing(address as u64)
    }

    pub fn executable_sections(&self) -> Vec<&Section> {
        self.sections.executable_sections()
    }

    pub fn symbol_by_name(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    /// First symbol recorded at `address`
    pub fn symbol_at(&self, address: u32) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.address == address)
    }

    /// Addresses of symbols that land in executable sections, in table order
    /// with duplicates removed. Suitable as additional traversal seeds.
    pub fn code_symbol_addresses(&self) -> Vec<u32> {
        let mut out: Vec<u32> = Vec::new();
        for sym in &self.symbols {
            let in_code = self
                .section_containing(sym.address)
                .is_some_and(Section::is_executable);
            if in_code && !out.contains(&sym.address) {
                out.push(sym.address);
            }
        }
        out
    }

    /// Translate a virtual address to an image offset (first matching section).
    pub fn address_to_offset(&self, address: u32) -> Option<usize> {
        self.sections.address_to_offset(address as u64)
    }

    /// Like [`Self::address_to_offset`], failing on unmapped addresses.
    pub fn translate(&self, address: u32) -> Result<usize> {
        self.address_to_offset(address)
            .ok_or(XvmError::UnmappedAddress {
                address: address as u64,
            })
    }
}
