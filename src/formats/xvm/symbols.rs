//! Symbol table parsing

use tracing::trace;

use crate::error::{Result, XvmError};
use crate::formats::xvm::sections::SectionTable;
use crate::formats::xvm::types::*;
use crate::formats::xvm::utils::ReadExt;

/// Parse `count` fixed-size records starting at `offset`.
///
/// Names are not stored inline: each record holds the virtual address of a
/// NUL-terminated string, resolved through the section table.
pub fn parse_symbols(
    data: &[u8],
    offset: usize,
    count: u32,
    sections: &SectionTable,
) -> Result<Vec<Symbol>> {
    let mut symbols = Vec::new();

    for index in 0..count as usize {
        let record = offset + index * SYMBOL_RECORD_SIZE;
        let (name_va, address) = data
            .read_u32_le_at(record)
            .zip(data.read_u32_le_at(record + 4))
            .ok_or_else(|| {
                XvmError::invalid_container(record, format!("truncated symbol record {}", index))
            })?;

        let name_offset = sections
            .address_to_offset(name_va as u64)
            .ok_or(XvmError::UnmappedAddress {
                address: name_va as u64,
            })?;
        let name = data
            .read_cstring_at(name_offset)
            .map_err(|_| XvmError::invalid_container(name_offset, "symbol name is not UTF-8"))?
            .to_string();

        trace!(symbol = %name, address, "parsed symbol");
        symbols.push(Symbol { name, address });
    }

    Ok(symbols)
}
