//! Core XVM data types and structures

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

// Container constants
pub const XVM_MAGIC: u32 = 0x036d_7678;
pub const SECTION_MARKER: u32 = 0xdead_beef;
pub const HEADER_SIZE: usize = 0x14;
pub const SYMBOL_RECORD_SIZE: usize = 8;
/// Four little-endian words following a section name.
pub const SECTION_FIELDS_SIZE: usize = 16;
pub const MAX_VIRTUAL_SIZE: u32 = 0x10000;

/// Fixed 20-byte file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub magic: u32,
    pub entry: u32,
    pub symbol_count: u32,
    pub reserved: u32,
    pub section_count: u32,
}

bitflags! {
    /// Section protection bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Protection: u32 {
        const READ = 1;
        const WRITE = 2;
        const EXECUTE = 4;
    }
}

impl Protection {
    pub fn is_readable(&self) -> bool {
        self.contains(Self::READ)
    }

    pub fn is_writable(&self) -> bool {
        self.contains(Self::WRITE)
    }

    pub fn is_executable(&self) -> bool {
        self.contains(Self::EXECUTE)
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_readable() {
            f.write_str("R")?;
        }
        if self.is_writable() {
            f.write_str("W")?;
        }
        if self.is_executable() {
            f.write_str("X")?;
        }
        Ok(())
    }
}

/// A section entry with its payload location inside the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub virtual_address: u32,
    /// Capped to [`MAX_VIRTUAL_SIZE`].
    pub virtual_size: u32,
    /// Image offset of the first payload byte.
    pub physical_offset: usize,
    /// Capped to `virtual_size`.
    pub physical_size: u32,
    pub protection: Protection,
}

impl Section {
    /// Check whether `address` lies within the virtual range.
    pub fn contains(&self, address: u64) -> bool {
        let start = self.virtual_address as u64;
        start <= address && address < start + self.virtual_size as u64
    }

    /// Physical offset for `address`, without checking the payload bounds.
    pub fn offset_of(&self, address: u64) -> Option<usize> {
        if !self.contains(address) {
            return None;
        }
        let delta = (address - self.virtual_address as u64) as usize;
        self.physical_offset.checked_add(delta)
    }

    pub fn is_executable(&self) -> bool {
        self.protection.is_executable()
    }
}

/// Named virtual address from the symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub address: u32,
}
