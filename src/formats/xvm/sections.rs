//! Section table parsing and address translation

use tracing::{debug, warn};

use crate::error::{Result, XvmError};
use crate::formats::xvm::types::*;
use crate::formats::xvm::utils::ReadExt;

/// Ordered section table. Order is table order and drives first-match
/// translation; overlapping sections are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionTable {
    sections: Vec<Section>,
}

impl SectionTable {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Parse `count` interleaved entries starting at `offset`.
    ///
    /// Each entry is a marker word, a NUL-terminated name, four words
    /// (virtual size, virtual address, protection, physical size) and then
    /// the payload itself, so the next entry is only located after the
    /// current one has been fully read.
    pub fn parse(data: &[u8], offset: usize, count: u32) -> Result<Self> {
        let mut sections = Vec::new();
        let mut cursor = offset;

        for index in 0..count {
            let marker = data.read_u32_le_at(cursor).ok_or_else(|| {
                XvmError::invalid_container(cursor, format!("truncated section entry {}", index))
            })?;
            if marker != SECTION_MARKER {
                return Err(XvmError::invalid_container(
                    cursor,
                    format!("missing section marker on entry {}: {:#010x}", index, marker),
                ));
            }

            let name_offset = cursor + 4;
            let name = data
                .read_cstring_at(name_offset)
                .map_err(|_| XvmError::invalid_container(name_offset, "section name is not UTF-8"))?
                .to_string();

            let fields = name_offset + name.len() + 1;
            let word = |i: usize| {
                data.read_u32_le_at(fields + i * 4).ok_or_else(|| {
                    XvmError::invalid_container(
                        fields,
                        format!("truncated fields for section '{}'", name),
                    )
                })
            };
            let virtual_size = word(0)?.min(MAX_VIRTUAL_SIZE);
            let virtual_address = word(1)?;
            let protection = Protection::from_bits_retain(word(2)?);
            let physical_size = word(3)?.min(virtual_size);

            let physical_offset = fields + SECTION_FIELDS_SIZE;
            let payload_end = physical_offset + physical_size as usize;
            if payload_end > data.len() {
                warn!(
                    section = %name,
                    payload_end,
                    image_size = data.len(),
                    "section payload extends past end of image"
                );
            }

            debug!(
                section = %name,
                vaddr = virtual_address,
                vsize = virtual_size,
                roff = physical_offset,
                rsize = physical_size,
                protect = %protection,
                "parsed section"
            );

            sections.push(Section {
                name,
                virtual_address,
                virtual_size,
                physical_offset,
                physical_size,
                protection,
            });
            cursor = payload_end;
        }

        Ok(Self { sections })
    }

    /// Get all sections
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Find section by name
    pub fn section_by_name(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// First section (in table order) whose virtual range holds `address`
    pub fn section_containing(&self, address: u64) -> Option<&Section> {
        self.sections.iter().find(|s| s.contains(address))
    }

    /// Convert a virtual address to an image offset
    #[inline]
    pub fn address_to_offset(&self, address: u64) -> Option<usize> {
        self.section_containing(address)
            .and_then(|s| s.offset_of(address))
    }

    /// Get executable sections
    pub fn executable_sections(&self) -> Vec<&Section> {
        self.sections.iter().filter(|s| s.is_executable()).collect()
    }
}
