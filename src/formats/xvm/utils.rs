//! Utility functions for XVM parsing

use std::str::Utf8Error;

/// Extension trait for reading primitive types from byte slices
pub trait ReadExt {
    fn read_u8_at(&self, offset: usize) -> Option<u8>;
    fn read_u32_le_at(&self, offset: usize) -> Option<u32>;
    fn read_i32_le_at(&self, offset: usize) -> Option<i32>;
    fn read_cstring_at(&self, offset: usize) -> Result<&str, Utf8Error>;
}

impl ReadExt for [u8] {
    #[inline(always)]
    fn read_u8_at(&self, offset: usize) -> Option<u8> {
        self.get(offset).copied()
    }

    #[inline(always)]
    fn read_u32_le_at(&self, offset: usize) -> Option<u32> {
        self.get(offset..offset.checked_add(4)?)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes)
    }

    #[inline(always)]
    fn read_i32_le_at(&self, offset: usize) -> Option<i32> {
        self.read_u32_le_at(offset).map(|v| v as i32)
    }

    /// Read a NUL-terminated string. A missing terminator runs to the end of
    /// the buffer, and an offset past the end yields the empty string.
    fn read_cstring_at(&self, offset: usize) -> Result<&str, Utf8Error> {
        let tail = self.get(offset..).unwrap_or(&[]);
        let len = memchr::memchr(0, tail).unwrap_or(tail.len());
        std::str::from_utf8(&tail[..len])
    }
}
