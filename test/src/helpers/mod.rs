pub mod behaviors;
pub mod test_runtime;

pub use behaviors::{recorder, remember_touches};
pub use journal::{Journal, JournalEntry};
pub use logging::init_logging;
pub use test_host::TestHost;
pub use test_runtime::TestRuntime;
pub use test_world::TestWorld;
