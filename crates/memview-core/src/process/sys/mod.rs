//! Platform primitives behind [`ProcessMemoryView`](super::ProcessMemoryView).
//!
//! Every backend exposes the same surface:
//! - `RawHandle` - the owned OS resource granting read access to one process
//! - `INVALID_HANDLE` - the error code reported for use of a released handle
//! - `OUT_OF_MEMORY` - the error code reported when the read buffer cannot be allocated
//! - `open`, `read` and `close`
//!
//! `read` returns the number of bytes the OS transferred; checking it against
//! the requested size is left to the caller.

#[cfg(target_os = "windows")]
mod win32;
#[cfg(target_os = "windows")]
pub(crate) use win32::{INVALID_HANDLE, OUT_OF_MEMORY, RawHandle, close, open, read};

#[cfg(target_os = "linux")]
mod procfs;
#[cfg(target_os = "linux")]
pub(crate) use procfs::{INVALID_HANDLE, OUT_OF_MEMORY, RawHandle, close, open, read};

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
mod unsupported;
#[cfg(not(any(target_os = "windows", target_os = "linux")))]
pub(crate) use unsupported::{INVALID_HANDLE, OUT_OF_MEMORY, RawHandle, close, open, read};
