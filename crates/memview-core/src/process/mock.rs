//! Mock memory reader for testing
//!
//! Provides an implementation of the ReadMemory trait backed by an in-memory
//! buffer, with the same exact-length contract as a live process view: a read
//! that starts inside the buffer but runs past its end is an incomplete read.

use crate::error::{Error, OsErrorCode, Result};
use crate::process::ReadMemory;

/// Error code reported for reads that start outside the mock buffer.
pub const MOCK_FAULT_CODE: OsErrorCode = 998;

/// Mock memory reader for testing
#[derive(Debug, Clone)]
pub struct MockMemoryReader {
    data: Vec<u8>,
    base: u64,
}

impl MockMemoryReader {
    /// Create a new mock reader with the given data at base address 0x1000
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, base: 0x1000 }
    }

    /// Create a new mock reader with custom base address
    pub fn with_base(data: Vec<u8>, base: u64) -> Self {
        Self { data, base }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn fault(&self, address: u64, size: usize) -> Error {
        Error::MemoryRead {
            size,
            address,
            code: MOCK_FAULT_CODE,
        }
    }
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        if size == 0 {
            return Ok(Vec::new());
        }
        let offset = address
            .checked_sub(self.base)
            .and_then(|o| usize::try_from(o).ok())
            .filter(|&o| o < self.data.len())
            .ok_or_else(|| self.fault(address, size))?;

        let available = self.data.len() - offset;
        if available < size {
            return Err(Error::ReadIncomplete {
                size,
                address,
                transferred: available,
            });
        }
        Ok(self.data[offset..offset + size].to_vec())
    }
}

/// Builder for creating test memory buffers
#[derive(Debug, Clone)]
pub struct MockMemoryBuilder {
    data: Vec<u8>,
    base: u64,
}

impl Default for MockMemoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMemoryBuilder {
    /// Create a new builder with default base address (0x1000)
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            base: 0x1000,
        }
    }

    pub fn base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    /// Pre-allocate buffer with zeros up to the specified size
    pub fn with_size(mut self, size: usize) -> Self {
        self.data.resize(size, 0);
        self
    }

    pub fn write_u8(self, offset: usize, value: u8) -> Self {
        self.write_bytes(offset, &[value])
    }

    pub fn write_i16(self, offset: usize, value: i16) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_u16(self, offset: usize, value: u16) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_i32(self, offset: usize, value: i32) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_u32(self, offset: usize, value: u32) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_f32(self, offset: usize, value: f32) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    pub fn write_f64(self, offset: usize, value: f64) -> Self {
        self.write_bytes(offset, &value.to_le_bytes())
    }

    /// Write raw bytes at the specified offset from base
    pub fn write_bytes(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.ensure_size(offset + bytes.len());
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn build(self) -> MockMemoryReader {
        MockMemoryReader {
            data: self.data,
            base: self.base,
        }
    }

    fn ensure_size(&mut self, required: usize) {
        if self.data.len() < required {
            self.data.resize(required, 0);
        }
    }
}
