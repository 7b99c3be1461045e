use std::ops::Deref;

use tracing::warn;

use crate::error::Result;
use crate::process::view::ProcessMemoryView;

/// Guard that closes a [`ProcessMemoryView`] when it goes out of scope.
///
/// Release errors on drop can only be logged; call [`finish`](Self::finish) to
/// observe them. Once the guard has closed the view, an explicit `close` on
/// the view fails like any other second release.
pub struct ScopedView<'a> {
    view: &'a mut ProcessMemoryView,
}

impl<'a> ScopedView<'a> {
    pub(crate) fn new(view: &'a mut ProcessMemoryView) -> Self {
        Self { view }
    }

    /// Close the view now and report the outcome.
    pub fn finish(self) -> Result<()> {
        self.view.close()
    }
}

impl Deref for ScopedView<'_> {
    type Target = ProcessMemoryView;

    fn deref(&self) -> &ProcessMemoryView {
        self.view
    }
}

impl Drop for ScopedView<'_> {
    fn drop(&mut self) {
        if self.view.is_open() {
            if let Err(e) = self.view.close() {
                warn!("Scoped release of process {} failed: {}", self.view.pid(), e);
            }
        }
    }
}
