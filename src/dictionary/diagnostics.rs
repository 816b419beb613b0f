//! Dictionary consistency checks.
//!
//! Translation itself never fails, so problems in a dictionary only show up
//! as text that silently stays untranslated (or gets translated twice). These
//! checks make them visible.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

use super::{
    DictionarySource,
    WordMap,
};
use crate::translate::{
    Segment,
    is_token,
    segments,
};
use crate::types::SourceRange;

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// What is wrong with a dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Key has uppercase letters; it is lowercased on load.
    UppercaseKey,
    /// Key is not a single word and can never match.
    InvalidKey,
    /// Empty translation, treated as missing.
    EmptyTranslation,
    /// Translation is not a string and is skipped.
    NonStringValue,
    /// A word of the translation is itself translated by the same language,
    /// so translating the output again changes it.
    ChainedTranslation { word: String },
}

/// A problem found in one dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryIssue {
    pub language: String,
    pub path: PathBuf,
    pub key: String,
    pub range: Option<SourceRange>,
    pub kind: IssueKind,
}

impl DictionaryIssue {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self.kind {
            IssueKind::EmptyTranslation => Severity::Info,
            IssueKind::UppercaseKey
            | IssueKind::InvalidKey
            | IssueKind::NonStringValue
            | IssueKind::ChainedTranslation { .. } => Severity::Warning,
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        let key = &self.key;
        match &self.kind {
            IssueKind::UppercaseKey => {
                format!("Key '{key}' is not lowercase; it is matched as '{}'", key.to_lowercase())
            }
            IssueKind::InvalidKey => {
                format!("Key '{key}' is not a single word and can never be matched")
            }
            IssueKind::EmptyTranslation => {
                format!("Key '{key}' has an empty translation and is left untranslated")
            }
            IssueKind::NonStringValue => {
                format!("Key '{key}' has a non-string translation and is ignored")
            }
            IssueKind::ChainedTranslation { word } => format!(
                "Translation of '{key}' contains '{word}', which is translated again on a second pass"
            ),
        }
    }
}

impl fmt::Display for DictionaryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if let Some(range) = self.range {
            write!(f, ":{}", range.start)?;
        }
        write!(f, ": {} [{}]: {}", self.severity(), self.language, self.message())
    }
}

/// Checks every entry of `source`.
///
/// `word_map` is the merged word map of the source's language; chained
/// translations are detected against it so entries from other files of the
/// same language count too.
#[must_use]
pub fn check_source(source: &DictionarySource, word_map: &WordMap) -> Vec<DictionaryIssue> {
    let mut issues = Vec::new();
    tracing::debug!(path = %source.path.display(), "Checking dictionary file");

    for (key, value) in &source.entries {
        let mut report = |kind: IssueKind| {
            issues.push(DictionaryIssue {
                language: source.language.clone(),
                path: source.path.clone(),
                key: key.clone(),
                range: source.key_ranges.get(key).copied(),
                kind,
            });
        };

        if !is_token(key) {
            report(IssueKind::InvalidKey);
            continue;
        }
        if key.chars().any(char::is_uppercase) {
            report(IssueKind::UppercaseKey);
        }

        let Value::String(translated) = value else {
            report(IssueKind::NonStringValue);
            continue;
        };
        if translated.is_empty() {
            report(IssueKind::EmptyTranslation);
            continue;
        }

        for segment in segments(translated) {
            let Segment::Word(word) = segment else {
                continue;
            };
            if word_map.translate_word(word).is_some_and(|again| again != word) {
                report(IssueKind::ChainedTranslation { word: word.to_string() });
            }
        }
    }

    issues
}
