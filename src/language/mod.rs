//! Current display language and its persistence.

/// Language state holder
mod state;
/// Key-value stores
mod store;

pub use state::{
    LanguageState,
    STORAGE_KEY,
};
pub use store::{
    JsonFileStore,
    KeyValueStore,
    MemoryStore,
    StoreError,
};
