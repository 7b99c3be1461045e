//! Read-only, typed access to another process's virtual memory.
//!
//! A [`ProcessMemoryView`] owns one OS handle with read rights only. Reads are
//! all-or-nothing: a caller receives exactly the requested bytes or an
//! [`Error`] carrying the OS error code.

pub mod dump;
pub mod error;
pub mod process;
pub mod report;

pub use dump::{MemoryDump, format_hex_dump};
pub use error::{Error, ErrorKind, OsErrorCode, Result};
pub use process::{ProcessMemoryView, ReadMemory, ScopedView, ViewState};
pub use report::{Value, ValueKind, ValueReport, parse_address, parse_reports, read_value};
