pub mod hexdump;
pub mod read;

use anyhow::Result;
use memview_core::ProcessMemoryView;
use tracing::debug;

/// Open `pid`, run `f` against the view, then close it explicitly.
///
/// A failure inside `f` takes precedence over a failure to close.
pub fn with_view<T>(pid: u32, f: impl FnOnce(&ProcessMemoryView) -> Result<T>) -> Result<T> {
    let mut view = ProcessMemoryView::open(pid)?;
    debug!("Opened process {}", pid);

    let result = f(&view);
    let closed = view.close();

    let value = result?;
    closed?;
    Ok(value)
}
