pub mod config_storage;
pub mod paths;
pub mod preview;
pub mod session_storage;

pub use config_storage::ConfigStorage;
pub use paths::ScribePaths;
pub use preview::{PreviewHandle, PreviewStore};
pub use session_storage::SessionStorage;
