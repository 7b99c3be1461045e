use crate::error::{Error, Result};

/// Trait for reading memory from a process or buffer
///
/// Implementors provide `read_bytes`, which must return exactly `size` bytes or
/// an error. The typed reads decode little-endian, two's-complement integers and
/// IEEE-754 floats on top of it.
pub trait ReadMemory {
    /// Read exactly `size` raw bytes starting at `address`
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;

    /// Read a fixed number of bytes into an array
    ///
    /// A source that hands back a different length than requested yields
    /// [`Error::ReadIncomplete`] rather than a truncated value.
    fn read_array<const N: usize>(&self, address: u64) -> Result<[u8; N]> {
        let bytes = self.read_bytes(address, N)?;
        let transferred = bytes.len();
        bytes.try_into().map_err(|_| Error::ReadIncomplete {
            size: N,
            address,
            transferred,
        })
    }

    /// Read a single byte (a C `char`)
    fn read_u8(&self, address: u64) -> Result<u8> {
        let [byte] = self.read_array(address)?;
        Ok(byte)
    }

    /// Read a signed 16-bit integer (a C `short`)
    fn read_i16(&self, address: u64) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array(address)?))
    }

    /// Read an unsigned 16-bit integer
    fn read_u16(&self, address: u64) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array(address)?))
    }

    /// Read a signed 32-bit integer (a C `int`)
    fn read_i32(&self, address: u64) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array(address)?))
    }

    /// Read an unsigned 32-bit integer
    fn read_u32(&self, address: u64) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array(address)?))
    }

    /// Read a single-precision float
    fn read_f32(&self, address: u64) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array(address)?))
    }

    /// Read a double-precision float
    fn read_f64(&self, address: u64) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array(address)?))
    }
}
