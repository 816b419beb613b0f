//! The currently selected display language.

use super::store::KeyValueStore;
use crate::translate::DEFAULT_SOURCE_LANGUAGE;

/// Key under which the selected language is persisted.
pub const STORAGE_KEY: &str = "app_language";

/// Holds the current language code and persists every change.
///
/// Codes are not validated: a code without a word map simply translates to
/// the original text.
pub struct LanguageState {
    /// Current language code.
    current: String,
    /// Pair that `toggle` switches between.
    toggle_pair: [String; 2],
    /// Durable storage; `None` keeps the selection in memory only.
    store: Option<Box<dyn KeyValueStore>>,
}

impl LanguageState {
    /// Creates an in-memory state starting at `default_language`.
    #[must_use]
    pub fn new(default_language: impl Into<String>, toggle_pair: [String; 2]) -> Self {
        Self { current: default_language.into(), toggle_pair, store: None }
    }

    /// Attaches `store`, restoring the persisted language when there is one.
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn KeyValueStore>) -> Self {
        if let Some(saved) = store.get(STORAGE_KEY) {
            tracing::debug!(language = %saved, "Restored persisted language");
            self.current = saved;
        }
        self.store = Some(store);
        self
    }

    /// The current language code.
    #[must_use]
    pub fn get(&self) -> &str {
        &self.current
    }

    /// Switches to `language` and persists it.
    ///
    /// A store failure is logged; the in-memory selection changes regardless.
    pub fn set(&mut self, language: impl Into<String>) {
        self.current = language.into();
        tracing::debug!(language = %self.current, "Language changed");

        if let Some(store) = self.store.as_mut()
            && let Err(e) = store.set(STORAGE_KEY, &self.current)
        {
            tracing::warn!("Failed to persist language '{}': {}", self.current, e);
        }
    }

    /// Flips between the toggle pair and returns the new language.
    ///
    /// The first language of the pair switches to the second; anything else,
    /// including codes outside the pair, switches to the first.
    pub fn toggle(&mut self) -> &str {
        let [first, second] = &self.toggle_pair;
        let next = if self.current == *first { second.clone() } else { first.clone() };
        self.set(next);
        &self.current
    }

    #[must_use]
    pub const fn toggle_pair(&self) -> &[String; 2] {
        &self.toggle_pair
    }
}

impl Default for LanguageState {
    fn default() -> Self {
        Self::new(
            DEFAULT_SOURCE_LANGUAGE,
            [DEFAULT_SOURCE_LANGUAGE.to_string(), "lt".to_string()],
        )
    }
}

impl std::fmt::Debug for LanguageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageState")
            .field("current", &self.current)
            .field("toggle_pair", &self.toggle_pair)
            .field("store", &self.store.as_ref().map(|_| "<dyn KeyValueStore>"))
            .finish()
    }
}
