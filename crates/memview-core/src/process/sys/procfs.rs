use std::fs::File;
use std::io;
use std::os::unix::fs::FileExt;
use std::os::unix::io::IntoRawFd;

use tracing::debug;

use crate::error::{Error, OsErrorCode, Result};

pub(crate) const INVALID_HANDLE: OsErrorCode = libc::EBADF as OsErrorCode;
pub(crate) const OUT_OF_MEMORY: OsErrorCode = libc::ENOMEM as OsErrorCode;

/// Read-only descriptor on `/proc/<pid>/mem`.
#[derive(Debug)]
pub(crate) struct RawHandle(File);

fn errno(error: &io::Error) -> OsErrorCode {
    error.raw_os_error().unwrap_or(libc::EIO) as OsErrorCode
}

pub(crate) fn open(pid: u32) -> Result<RawHandle> {
    // O_RDONLY | O_CLOEXEC; write access is never requested.
    let file = File::open(format!("/proc/{pid}/mem")).map_err(|e| {
        debug!("Opening /proc/{}/mem failed: {}", pid, e);
        Error::ProcessOpen {
            pid,
            code: errno(&e),
        }
    })?;

    Ok(RawHandle(file))
}

pub(crate) fn read(handle: &RawHandle, address: u64, buffer: &mut [u8]) -> Result<usize> {
    handle
        .0
        .read_at(buffer, address)
        .map_err(|e| Error::MemoryRead {
            size: buffer.len(),
            address,
            code: errno(&e),
        })
}

pub(crate) fn close(handle: RawHandle) -> Result<()> {
    let fd = handle.0.into_raw_fd();

    // SAFETY: `fd` was just released from its owning File, so this is the only close.
    if unsafe { libc::close(fd) } != 0 {
        return Err(Error::HandleClose {
            code: errno(&io::Error::last_os_error()),
        });
    }

    Ok(())
}
