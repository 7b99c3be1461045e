//! Hex dumps of process memory

use serde::Serialize;

use crate::error::Result;
use crate::process::ReadMemory;

const BYTES_PER_LINE: usize = 16;

/// Memory dump at a specific location
#[derive(Debug, Clone, Serialize)]
pub struct MemoryDump {
    pub address: u64,
    pub size: usize,
    #[serde(skip_serializing)]
    pub bytes: Vec<u8>,
    pub hex_dump: Vec<String>,
}

impl MemoryDump {
    /// Create a new memory dump from raw bytes
    pub fn new(address: u64, bytes: Vec<u8>) -> Self {
        let hex_dump = format_hex_dump(address, &bytes);
        Self {
            address,
            size: bytes.len(),
            bytes,
            hex_dump,
        }
    }

    /// Read `size` bytes at `address` in one request and format them
    pub fn read<R: ReadMemory>(reader: &R, address: u64, size: usize) -> Result<Self> {
        let bytes = reader.read_bytes(address, size)?;
        Ok(Self::new(address, bytes))
    }
}

/// Format bytes as `ADDRESS  HEX  ASCII` lines, 16 bytes per line
pub fn format_hex_dump(address: u64, bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(i, chunk)| {
            let addr = address.wrapping_add((i * BYTES_PER_LINE) as u64);
            let hex_part = chunk
                .iter()
                .map(|b| format!("{:02X}", b))
                .collect::<Vec<_>>()
                .join(" ");
            let ascii_part: String = chunk
                .iter()
                .map(|&b| if (0x20..0x7F).contains(&b) { b as char } else { '.' })
                .collect();

            format!("{:016X}  {:47}  {}", addr, hex_part, ascii_part)
        })
        .collect()
}
