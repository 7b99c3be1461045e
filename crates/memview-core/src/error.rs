use thiserror::Error;

/// Numeric error code reported by the operating system
/// (Win32 error code on Windows, `errno` on Linux).
pub type OsErrorCode = u32;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Can't open process with pid {pid}, error code {code}")]
    ProcessOpen { pid: u32, code: OsErrorCode },

    #[error(
        "Can't read {size} bytes of process memory at address 0x{address:x}, error code {code}"
    )]
    MemoryRead {
        size: usize,
        address: u64,
        code: OsErrorCode,
    },

    #[error("Memory read incomplete")]
    ReadIncomplete {
        size: usize,
        address: u64,
        transferred: usize,
    },

    #[error("Can't close process handle, error code {code}")]
    HandleClose { code: OsErrorCode },

    #[error("Process memory access is not supported on this platform")]
    Unsupported,

    #[error("Invalid value report: {0}")]
    InvalidReport(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// Failure category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ProcessOpen,
    MemoryRead,
    HandleClose,
    Unsupported,
    InvalidInput,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ProcessOpen { .. } => ErrorKind::ProcessOpen,
            Error::MemoryRead { .. } | Error::ReadIncomplete { .. } => ErrorKind::MemoryRead,
            Error::HandleClose { .. } => ErrorKind::HandleClose,
            Error::Unsupported => ErrorKind::Unsupported,
            Error::InvalidReport(_) | Error::InvalidAddress(_) => ErrorKind::InvalidInput,
        }
    }

    /// The OS error code carried by this error, if any.
    pub fn os_code(&self) -> Option<OsErrorCode> {
        match self {
            Error::ProcessOpen { code, .. }
            | Error::MemoryRead { code, .. }
            | Error::HandleClose { code } => Some(*code),
            _ => None,
        }
    }

    /// True when the OS honored only part of a read request.
    pub fn is_incomplete_read(&self) -> bool {
        matches!(self, Error::ReadIncomplete { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
