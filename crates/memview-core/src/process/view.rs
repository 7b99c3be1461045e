use strum::Display;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::process::reader::ReadMemory;
use crate::process::scoped::ScopedView;
use crate::process::sys::{self, RawHandle};

/// Lifecycle state of a [`ProcessMemoryView`]. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ViewState {
    Open,
    Closed,
}

/// Read-only view over another process's virtual memory.
///
/// The view exclusively owns one OS handle opened with the "read virtual
/// memory" right only. The handle is released by [`close`](Self::close); after
/// that every operation fails without touching the OS.
///
/// ```no_run
/// use memview_core::{ProcessMemoryView, ReadMemory};
///
/// # fn main() -> memview_core::Result<()> {
/// let mut view = ProcessMemoryView::open(5555)?;
/// let value = view.read_i32(0x7ffd_1234)?;
/// view.close()?;
/// # let _ = value;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ProcessMemoryView {
    pid: u32,
    handle: Option<RawHandle>,
}

impl ProcessMemoryView {
    /// Open `pid` for reading. The OS decides whether the pid is valid.
    pub fn open(pid: u32) -> Result<Self> {
        let handle = sys::open(pid)?;
        debug!("Opened process {} for memory reads", pid);

        Ok(Self {
            pid,
            handle: Some(handle),
        })
    }

    /// Process ID the view was opened for.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ViewState {
        if self.handle.is_some() {
            ViewState::Open
        } else {
            ViewState::Closed
        }
    }

    /// True until the handle has been released.
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Release the handle.
    ///
    /// The view is closed afterwards even if the OS rejects the release. Closing
    /// an already closed view fails with the platform's invalid-handle code.
    pub fn close(&mut self) -> Result<()> {
        let handle = self.handle.take().ok_or(Error::HandleClose {
            code: sys::INVALID_HANDLE,
        })?;

        sys::close(handle).inspect_err(|e| {
            debug!("Releasing handle of process {} failed: {}", self.pid, e);
        })?;
        debug!("Closed process {}", self.pid);
        Ok(())
    }

    /// Borrow the view behind a guard that closes it when dropped.
    pub fn scoped(&mut self) -> ScopedView<'_> {
        ScopedView::new(self)
    }
}

impl ReadMemory for ProcessMemoryView {
    /// Issue one OS read for exactly `size` bytes.
    ///
    /// A zero-length read returns an empty buffer without a system call. A
    /// transfer shorter than `size` is reported as [`Error::ReadIncomplete`].
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let handle = self.handle.as_ref().ok_or(Error::MemoryRead {
            size,
            address,
            code: sys::INVALID_HANDLE,
        })?;

        if size == 0 {
            return Ok(Vec::new());
        }

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(size)
            .map_err(|_| Error::MemoryRead {
                size,
                address,
                code: sys::OUT_OF_MEMORY,
            })?;
        buffer.resize(size, 0);
        let transferred = sys::read(handle, address, &mut buffer)?;

        // All-or-nothing: the caller cannot tell which bytes of a short
        // transfer are valid.
        if transferred != size {
            debug!(
                "Short read from process {} at {:#x}: {} of {} bytes",
                self.pid, address, transferred, size
            );
            return Err(Error::ReadIncomplete {
                size,
                address,
                transferred,
            });
        }

        Ok(buffer)
    }
}

impl Drop for ProcessMemoryView {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = sys::close(handle) {
                warn!("Failed to close handle of process {}: {}", self.pid, e);
            }
        }
    }
}

#[cfg(all(test, any(target_os = "linux", target_os = "windows")))]
mod tests {
    use std::hint::black_box;

    use super::*;
    use crate::error::ErrorKind;

    fn address_of<T>(value: &T) -> u64 {
        value as *const T as usize as u64
    }

    fn open_self() -> ProcessMemoryView {
        ProcessMemoryView::open(std::process::id()).unwrap()
    }

    #[test]
    fn test_open_invalid_pid() {
        let err = ProcessMemoryView::open(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProcessOpen);

        #[cfg(target_os = "linux")]
        let code = libc::ENOENT as u32;
        #[cfg(target_os = "windows")]
        let code = 87;

        assert_eq!(
            err.to_string(),
            format!("Can't open process with pid 0, error code {code}")
        );
    }

    #[test]
    fn test_read_own_memory() {
        let bytes: [u8; 9] = black_box([11, 22, 33, 44, 55, 66, 77, 88, 99]);
        let mut view = open_self();

        let read = view.read_bytes(address_of(&bytes), bytes.len()).unwrap();
        assert_eq!(read, bytes);

        view.close().unwrap();
    }

    #[test]
    fn test_typed_reads_own_memory() {
        let int_value: i32 = black_box(-42);
        let short_value: i16 = black_box(-1);
        let ushort_value: u16 = black_box(65535);
        let uint_value: u32 = black_box(u32::MAX);
        let char_value: u8 = black_box(55);
        let float_value: f32 = black_box(28.75);
        let double_value: f64 = black_box(-4.125);
        let mut view = open_self();

        assert_eq!(view.read_i32(address_of(&int_value)).unwrap(), -42);
        assert_eq!(view.read_i16(address_of(&short_value)).unwrap(), -1);
        assert_eq!(view.read_u16(address_of(&ushort_value)).unwrap(), 65535);
        assert_eq!(view.read_u32(address_of(&uint_value)).unwrap(), u32::MAX);
        assert_eq!(view.read_u8(address_of(&char_value)).unwrap(), 55);
        assert_eq!(view.read_f32(address_of(&float_value)).unwrap(), 28.75);
        assert_eq!(view.read_f64(address_of(&double_value)).unwrap(), -4.125);

        view.close().unwrap();
    }

    #[test]
    fn test_zero_size_read() {
        let mut view = open_self();
        assert!(view.read_bytes(0, 0).unwrap().is_empty());
        view.close().unwrap();
    }

    #[test]
    fn test_unallocatable_size_fails() {
        let value: u32 = black_box(1);
        let mut view = open_self();

        let err = view.read_bytes(address_of(&value), usize::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MemoryRead);
        assert_eq!(err.os_code(), Some(sys::OUT_OF_MEMORY));
        assert!(!err.is_incomplete_read());

        view.close().unwrap();
    }

    #[test]
    fn test_unmapped_address_fails() {
        let mut view = open_self();

        let err = view.read_bytes(0, 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MemoryRead);
        assert!(!err.is_incomplete_read());
        assert!(
            err.to_string()
                .starts_with("Can't read 4 bytes of process memory at address 0x0, error code ")
        );

        view.close().unwrap();
    }

    #[test]
    fn test_double_close() {
        let mut view = open_self();
        assert_eq!(view.state(), ViewState::Open);

        view.close().unwrap();
        assert_eq!(view.state(), ViewState::Closed);

        let err = view.close().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HandleClose);
        assert_eq!(err.os_code(), Some(sys::INVALID_HANDLE));
    }

    #[test]
    fn test_read_after_close() {
        let value: i32 = black_box(7);
        let mut view = open_self();
        view.close().unwrap();

        let err = view.read_i32(address_of(&value)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MemoryRead);
        assert_eq!(err.os_code(), Some(sys::INVALID_HANDLE));

        // Zero-length reads are rejected too.
        assert!(view.read_bytes(address_of(&value), 0).is_err());
    }

    #[test]
    fn test_close_after_scoped_release() {
        let value: u16 = black_box(54310);
        let mut view = open_self();
        {
            let scoped = view.scoped();
            assert_eq!(scoped.read_u16(address_of(&value)).unwrap(), 54310);
        }
        assert!(!view.is_open());

        let err = view.close().unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Can't close process handle, error code {}", sys::INVALID_HANDLE)
        );
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ViewState::Open.to_string(), "open");
        assert_eq!(ViewState::Closed.to_string(), "closed");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_unmapped_tail_is_incomplete() {
        // SAFETY: sysconf has no preconditions.
        let page = unsafe { libc::sysconf(libc::_SC_PAGESIZE) } as usize;

        // SAFETY: anonymous private mapping of two pages; the second page is
        // unmapped right away and the first one is unmapped before returning.
        let base = unsafe {
            let base = libc::mmap(
                std::ptr::null_mut(),
                page * 2,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            );
            assert_ne!(base, libc::MAP_FAILED);
            assert_eq!(libc::munmap(base.cast::<u8>().add(page).cast(), page), 0);
            base
        };

        let mut view = open_self();
        let tail = base as usize as u64 + page as u64 - 8;
        let err = view.read_bytes(tail, 16).unwrap_err();

        match err {
            Error::ReadIncomplete {
                size, transferred, ..
            } => {
                assert_eq!(size, 16);
                assert_eq!(transferred, 8);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(view.read_bytes(tail, 8).unwrap(), vec![0; 8]);

        view.close().unwrap();
        // SAFETY: `base` is the first page mapped above and is still mapped.
        unsafe { libc::munmap(base, page) };
    }
}
