mod reader;
mod scoped;
mod sys;
mod view;

// Mock memory reader for testing (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use reader::ReadMemory;
pub use scoped::ScopedView;
pub use view::{ProcessMemoryView, ViewState};

#[doc(hidden)]
pub use mock::{MOCK_FAULT_CODE, MockMemoryBuilder, MockMemoryReader};
