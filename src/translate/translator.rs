//! Dictionary-driven word translation.

use std::borrow::Cow;

use serde_json::Value;

use super::tokenizer::{
    Segment,
    segments,
};
use crate::dictionary::{
    Dictionary,
    WordMap,
};

/// Language whose text is shown as-is.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Translates text word by word using a [`Dictionary`].
///
/// Translation never fails: unknown languages and missing words fall back to
/// the original text.
#[derive(Debug, Clone)]
pub struct Translator {
    /// Word maps keyed by language code.
    dictionary: Dictionary,
    /// Translating into this language is the identity.
    source_language: String,
}

impl Translator {
    #[must_use]
    pub fn new(dictionary: Dictionary) -> Self {
        Self { dictionary, source_language: DEFAULT_SOURCE_LANGUAGE.to_string() }
    }

    /// Overrides the language treated as untranslated (`"en"` by default).
    #[must_use]
    pub fn with_source_language(mut self, source_language: impl Into<String>) -> Self {
        self.source_language = source_language.into();
        self
    }

    #[must_use]
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    #[must_use]
    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// Translates `text` into `language`.
    ///
    /// Returns [`Cow::Borrowed`] when nothing was substituted, which is always
    /// the case for the source language, for languages without a word map and
    /// for text without dictionary words.
    ///
    /// # Examples
    /// ```
    /// use word_overlay::dictionary::{Dictionary, WordMap};
    /// use word_overlay::translate::Translator;
    ///
    /// let mut dictionary = Dictionary::new();
    /// dictionary.insert("lt", WordMap::from_iter([("hello", "labas")]));
    /// let translator = Translator::new(dictionary);
    ///
    /// assert_eq!(translator.translate("Hello world", "lt"), "Labas world");
    /// assert_eq!(translator.translate("Hello world", "en"), "Hello world");
    /// ```
    #[must_use]
    pub fn translate<'a>(&self, text: &'a str, language: &str) -> Cow<'a, str> {
        if text.is_empty() || language == self.source_language {
            return Cow::Borrowed(text);
        }

        match self.dictionary.word_map(language) {
            Some(word_map) => translate_with(text, word_map),
            None => Cow::Borrowed(text),
        }
    }

    /// Translates a JSON value.
    ///
    /// Strings are translated; every other value (null, numbers, booleans,
    /// arrays, objects) is returned unchanged.
    #[must_use]
    pub fn translate_value(&self, value: &Value, language: &str) -> Value {
        match value {
            Value::String(text) => Value::String(self.translate(text, language).into_owned()),
            other => other.clone(),
        }
    }
}

/// Replaces every word of `text` found in `word_map`, keeping separators intact.
#[must_use]
pub fn translate_with<'a>(text: &'a str, word_map: &WordMap) -> Cow<'a, str> {
    // Allocated on the first substitution only.
    let mut translated: Option<String> = None;
    let mut consumed = 0;

    for segment in segments(text) {
        let piece = segment.as_str();
        let replacement = match segment {
            Segment::Word(word) => word_map.translate_word(word),
            Segment::Separator(_) => None,
        };

        match (replacement, translated.as_mut()) {
            (Some(replacement), Some(out)) => out.push_str(&replacement),
            (Some(replacement), None) => {
                let mut out = String::with_capacity(text.len() + replacement.len());
                out.push_str(text.get(..consumed).unwrap_or_default());
                out.push_str(&replacement);
                translated = Some(out);
            }
            (None, Some(out)) => out.push_str(piece),
            (None, None) => {}
        }

        consumed += piece.len();
    }

    translated.map_or(Cow::Borrowed(text), Cow::Owned)
}
