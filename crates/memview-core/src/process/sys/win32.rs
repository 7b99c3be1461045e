use std::ffi::c_void;

use tracing::debug;
use windows::Win32::Foundation::{
    CloseHandle, ERROR_INVALID_HANDLE, ERROR_INVALID_PARAMETER, ERROR_NOT_ENOUGH_MEMORY,
    HANDLE,
};
use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;
use windows::Win32::System::Threading::{OpenProcess, PROCESS_VM_READ};

use crate::error::{Error, OsErrorCode, Result};

pub(crate) const INVALID_HANDLE: OsErrorCode = ERROR_INVALID_HANDLE.0;
pub(crate) const OUT_OF_MEMORY: OsErrorCode = ERROR_NOT_ENOUGH_MEMORY.0;

#[derive(Debug)]
pub(crate) struct RawHandle(HANDLE);

/// Recover the Win32 error code wrapped in an `HRESULT_FROM_WIN32` value.
fn win32_code(error: &windows::core::Error) -> OsErrorCode {
    let hresult = error.code().0 as u32;
    if hresult & 0xFFFF_0000 == 0x8007_0000 {
        hresult & 0xFFFF
    } else {
        hresult
    }
}

pub(crate) fn open(pid: u32) -> Result<RawHandle> {
    // SAFETY: OpenProcess takes plain values and returns an owned handle on success.
    // Only PROCESS_VM_READ is requested; the handle is released by `close`.
    let handle = unsafe { OpenProcess(PROCESS_VM_READ, false, pid) }.map_err(|e| {
        debug!("OpenProcess failed for PID {}: {}", pid, e);
        Error::ProcessOpen {
            pid,
            code: win32_code(&e),
        }
    })?;

    Ok(RawHandle(handle))
}

pub(crate) fn read(handle: &RawHandle, address: u64, buffer: &mut [u8]) -> Result<usize> {
    let size = buffer.len();
    let base = usize::try_from(address).map_err(|_| Error::MemoryRead {
        size,
        address,
        code: ERROR_INVALID_PARAMETER.0,
    })?;
    let mut transferred = 0;

    // SAFETY: the handle is open (it is only reachable through an open view), the
    // destination buffer is valid for `size` writable bytes, and `transferred`
    // outlives the call. An unreadable source address is reported through the Result.
    unsafe {
        ReadProcessMemory(
            handle.0,
            base as *const c_void,
            buffer.as_mut_ptr() as *mut c_void,
            size,
            Some(&mut transferred),
        )
    }
    .map_err(|e| Error::MemoryRead {
        size,
        address,
        code: win32_code(&e),
    })?;

    Ok(transferred)
}

pub(crate) fn close(handle: RawHandle) -> Result<()> {
    // SAFETY: the handle came from OpenProcess and is consumed here, so it is
    // closed at most once.
    unsafe { CloseHandle(handle.0) }.map_err(|e| Error::HandleClose {
        code: win32_code(&e),
    })
}
