use crate::error::{Error, OsErrorCode, Result};

pub(crate) const INVALID_HANDLE: OsErrorCode = 0;
pub(crate) const OUT_OF_MEMORY: OsErrorCode = 0;

/// No handle can be acquired on this platform.
#[derive(Debug)]
pub(crate) enum RawHandle {}

pub(crate) fn open(_pid: u32) -> Result<RawHandle> {
    Err(Error::Unsupported)
}

pub(crate) fn read(handle: &RawHandle, _address: u64, _buffer: &mut [u8]) -> Result<usize> {
    match *handle {}
}

pub(crate) fn close(handle: RawHandle) -> Result<()> {
    match handle {}
}
