//! Workspace configuration (`.word-overlay.json`).
mod loader;
mod manager;
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    DictionaryFilesConfig,
    OverlaySettings,
    PageConfig,
    StorageConfig,
    ValidationError,
};
