//! XVM header parsing

use crate::error::{Result, XvmError};
use crate::formats::xvm::types::*;
use crate::formats::xvm::utils::ReadExt;

/// Parse and validate the fixed header at offset 0.
pub fn parse_header(data: &[u8]) -> Result<Header> {
    if data.len() < HEADER_SIZE {
        return Err(XvmError::invalid_container(
            0,
            format!(
                "truncated header: expected {} bytes, got {}",
                HEADER_SIZE,
                data.len()
            ),
        ));
    }

    let word = |i: usize| data.read_u32_le_at(i * 4).unwrap_or_default();
    let header = Header {
        magic: word(0),
        entry: word(1),
        symbol_count: word(2),
        reserved: word(3),
        section_count: word(4),
    };

    if header.magic != XVM_MAGIC {
        return Err(XvmError::invalid_container(
            0,
            format!(
                "missing XVM signature: {:#010x} (expected {:#010x})",
                header.magic, XVM_MAGIC
            ),
        ));
    }

    Ok(header)
}
