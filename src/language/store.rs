//! Durable key-value storage for the selected language.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access store file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store file '{}' is not a JSON object of strings: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage that outlives the process (or pretends to).
pub trait KeyValueStore {
    /// Returns the stored value, `None` when absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Store kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Stored entries.
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object file, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Location of the JSON file.
    path: PathBuf,
    /// Current file contents.
    entries: Map<String, Value>,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store; it is created on the first `set`.
    ///
    /// # Errors
    /// - The file exists but cannot be read
    /// - The file is not a JSON object
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|source| StoreError::Parse { path: path.clone(), source })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "Opened language store");
        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the entries back to disk, creating parent directories as needed.
    fn flush(&self) -> Result<(), StoreError> {
        let io_error = |source: std::io::Error| StoreError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let content = serde_json::to_string_pretty(&self.entries)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })?;
        std::fs::write(&self.path, content + "\n").map_err(io_error)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).and_then(Value::as_str).map(ToString::to_string)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), Value::String(value.to_string()));
        self.flush()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();

        assert_that!(store.get("app_language"), none());
        store.set("app_language", "lt").unwrap();
        assert_that!(store.get("app_language"), some(eq("lt")));
    }

    #[rstest]
    fn file_store_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();

        let store = JsonFileStore::open(temp_dir.path().join("state.json")).unwrap();

        assert_that!(store.get("app_language"), none());
    }

    #[rstest]
    fn file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/state.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("app_language", "lt").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_that!(reopened.get("app_language"), some(eq("lt")));
    }

    #[rstest]
    fn file_store_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("app_language", "de").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_that!(content, contains_substring("\"theme\": \"dark\""));
        assert_that!(content, contains_substring("\"app_language\": \"de\""));
    }

    #[rstest]
    fn file_store_ignores_non_string_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(&path, r#"{"app_language": 3}"#).unwrap();

        let store = JsonFileStore::open(&path).unwrap();

        assert_that!(store.get("app_language"), none());
    }

    #[rstest]
    #[case::not_json("not json")]
    #[case::array("[\"lt\"]")]
    fn file_store_rejects_malformed_file(#[case] content: &str) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(&path, content).unwrap();

        let result = JsonFileStore::open(&path);

        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[rstest]
    fn file_store_reports_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::open(temp_dir.path().join("blocker/state.json")).unwrap();
        // A regular file where the parent directory should be created.
        fs::write(temp_dir.path().join("blocker"), "").unwrap();

        let result = store.set("app_language", "lt");

        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_that!(store.get("app_language"), some(eq("lt")));
    }
}
