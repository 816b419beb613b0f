//! In-memory dictionary types.

use std::collections::HashMap;

use serde_json::Value;

use super::DictionaryError;
use crate::translate::{
    is_token,
    preserve_case,
};

/// Per-language mapping from lowercase source word to its translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordMap {
    /// Lowercase word -> translation as spelled in the dictionary.
    words: HashMap<String, String>,
}

impl WordMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word, lowercasing it first.
    ///
    /// Returns `false` (and stores nothing) when `word` is not a single token,
    /// since such a key could never be looked up.
    pub fn insert(&mut self, word: &str, translation: impl Into<String>) -> bool {
        if !is_token(word) {
            return false;
        }
        self.words.insert(word.to_lowercase(), translation.into());
        true
    }

    /// Looks up a word case-insensitively.
    ///
    /// Empty translations count as missing.
    #[must_use]
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.words.get(&word.to_lowercase()).map(String::as_str).filter(|t| !t.is_empty())
    }

    /// Translates a single token, carrying over the case of its first letter.
    #[must_use]
    pub fn translate_word(&self, token: &str) -> Option<String> {
        self.lookup(token).map(|translated| preserve_case(token, translated))
    }

    #[must_use]
    pub fn contains_word(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates over `(lowercase word, translation)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words.iter().map(|(word, translated)| (word.as_str(), translated.as_str()))
    }

    /// Merges `other` into `self`; entries of `other` win on conflict.
    pub fn merge(&mut self, other: Self) {
        for (word, translated) in other.words {
            if let Some(previous) = self.words.insert(word.clone(), translated)
                && !previous.is_empty()
            {
                tracing::debug!(%word, %previous, "Dictionary entry overridden");
            }
        }
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for WordMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (word, translated) in iter {
            if !map.insert(word.as_ref(), translated) {
                tracing::warn!(word = word.as_ref(), "Ignoring dictionary key that is not a single word");
            }
        }
        map
    }
}

/// Word maps for every known language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    /// Language code -> word map.
    languages: HashMap<String, WordMap>,
}

impl Dictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word map for `language`, merging with any map already present.
    pub fn insert(&mut self, language: impl Into<String>, word_map: WordMap) {
        self.languages.entry(language.into()).or_default().merge(word_map);
    }

    /// Returns the word map of `language`, or `None` for unknown languages.
    #[must_use]
    pub fn word_map(&self, language: &str) -> Option<&WordMap> {
        self.languages.get(language)
    }

    /// Looks up `word` in the word map of `language`.
    #[must_use]
    pub fn lookup(&self, language: &str, word: &str) -> Option<&str> {
        self.word_map(language)?.lookup(word)
    }

    /// Known language codes, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Builds a dictionary from the `{ "lt": { "hello": "labas" } }` layout.
    ///
    /// Non-string translations are skipped with a warning.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use word_overlay::dictionary::Dictionary;
    ///
    /// let dictionary = Dictionary::from_json(&json!({"lt": {"Hello": "labas"}})).unwrap();
    /// assert_eq!(dictionary.lookup("lt", "hello"), Some("labas"));
    /// ```
    pub fn from_json(json: &Value) -> Result<Self, DictionaryError> {
        let Value::Object(languages) = json else {
            return Err(DictionaryError::InvalidLayout("top level must be an object".to_string()));
        };

        let mut dictionary = Self::new();
        for (language, words) in languages {
            let Value::Object(words) = words else {
                return Err(DictionaryError::InvalidLayout(format!(
                    "entry '{language}' must be an object of words"
                )));
            };
            dictionary.insert(language.clone(), word_map_from_entries(words.iter()));
        }
        Ok(dictionary)
    }
}

/// Builds a word map from JSON entries, skipping values that are not strings.
pub(super) fn word_map_from_entries<'a>(
    entries: impl Iterator<Item = (&'a String, &'a Value)>,
) -> WordMap {
    let mut map = WordMap::new();
    for (word, value) in entries {
        let Value::String(translated) = value else {
            tracing::warn!(%word, "Skipping dictionary entry with a non-string value");
            continue;
        };
        if !map.insert(word, translated.clone()) {
            tracing::warn!(%word, "Ignoring dictionary key that is not a single word");
        }
    }
    map
}
