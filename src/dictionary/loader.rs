//! Dictionary file loading.

use std::collections::{
    HashMap,
    HashSet,
};
use std::path::{
    Path,
    PathBuf,
};
use std::sync::LazyLock;

use serde_json::{
    Map,
    Value,
};

use super::DictionaryError;
use super::types::{
    WordMap,
    word_map_from_entries,
};
use crate::types::SourceRange;

/// ISO 639-1 language codes, the primary subtag of a recognizable language tag.
static PRIMARY_LANGUAGE_SUBTAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    "aa ab ae af ak am an ar as av ay az ba be bg bh bi bm bn bo br bs ca ce ch co cr cs cu cv \
     cy da de dv dz ee el en eo es et eu fa ff fi fj fo fr fy ga gd gl gn gu gv ha he hi ho hr \
     ht hu hy hz ia id ie ig ii ik io is it iu ja jv ka kg ki kj kk kl km kn ko kr ks ku kv kw \
     ky la lb lg li ln lo lt lu lv mg mh mi mk ml mn mr ms mt my na nb nd ne ng nl nn no nr nv \
     ny oc oj om or os pa pi pl ps pt qu rm rn ro ru rw sa sc sd se sg si sk sl sm sn so sq sr \
     ss st su sv sw ta te tg th ti tk tl tn to tr ts tt tw ty ug uk ur uz ve vi vo wa wo xh yi \
     yo za zh zu"
        .split_whitespace()
        .collect()
});

/// Returns true for tags like `lt`, `lt-LT`, `en_US` or `sr-Cyrl-RS`.
fn is_language_tag(part: &str) -> bool {
    let mut subtags = part.split(['-', '_']);
    let Some(primary) = subtags.next() else {
        return false;
    };
    if !PRIMARY_LANGUAGE_SUBTAGS.contains(primary.to_ascii_lowercase().as_str()) {
        return false;
    }

    let rest: Vec<&str> = subtags.collect();
    rest.len() <= 2
        && rest.iter().all(|subtag| {
            (2..=4).contains(&subtag.len()) && subtag.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

/// Detects the language of a dictionary file from its path.
///
/// Splits the path by `/` and `.` and searches backwards for a part that is a
/// language tag, so the file name wins over directory names.
///
/// # Examples
/// - `locales/lt.json` → `lt`
/// - `locales/lt/common.json` → `lt`
/// - `i18n/en-GB.json` → `en-GB`
#[must_use]
pub fn detect_language_from_path(file_path: &Path) -> Option<String> {
    let path_str = file_path.to_string_lossy();
    path_str
        .split(['/', '\\', '.'])
        .rev()
        .find(|part| is_language_tag(part))
        .map(ToString::to_string)
}

/// A dictionary file as read from disk.
#[derive(Debug, Clone)]
pub struct DictionarySource {
    pub language: String,
    pub path: PathBuf,
    /// Top-level entries, sorted by key.
    pub entries: Map<String, Value>,
    /// Key to source range mapping, used to point at problems.
    pub key_ranges: HashMap<String, SourceRange>,
}

impl DictionarySource {
    /// Parses dictionary JSON text for `language`.
    ///
    /// # Errors
    /// - JSON parse error
    /// - Top level is not an object
    pub fn parse(
        path: impl Into<PathBuf>,
        language: impl Into<String>,
        json_text: &str,
    ) -> Result<Self, DictionaryError> {
        let path = path.into();
        let json: Value = match serde_json::from_str(json_text) {
            Ok(json) => json,
            Err(source) => return Err(DictionaryError::Parse { path, source }),
        };
        let Value::Object(entries) = json else {
            return Err(DictionaryError::NotAnObject { path });
        };

        Ok(Self {
            language: language.into(),
            path,
            entries,
            key_ranges: extract_key_ranges(json_text),
        })
    }

    /// Builds the word map of this file; unusable entries are skipped.
    #[must_use]
    pub fn word_map(&self) -> WordMap {
        word_map_from_entries(self.entries.iter())
    }
}

/// Loads a dictionary file, detecting its language from its path below `workspace_root`.
///
/// Directories above the workspace root never name the language.
///
/// # Errors
/// Returns error if the language cannot be detected, the file cannot be read,
/// or it is not a JSON object.
pub fn load_dictionary_file(
    file_path: &Path,
    workspace_root: &Path,
) -> Result<DictionarySource, DictionaryError> {
    let relative_path = file_path.strip_prefix(workspace_root).unwrap_or(file_path);
    let Some(language) = detect_language_from_path(relative_path) else {
        return Err(DictionaryError::UnknownLanguage { path: file_path.to_path_buf() });
    };

    let content = std::fs::read_to_string(file_path)
        .map_err(|source| DictionaryError::Io { path: file_path.to_path_buf(), source })?;

    tracing::debug!(path = %file_path.display(), %language, "Loading dictionary file");
    DictionarySource::parse(file_path, language, &content)
}

/// Extracts the source range of every top-level key using tree-sitter.
fn extract_key_ranges(json_text: &str) -> HashMap<String, SourceRange> {
    let mut key_ranges = HashMap::new();

    let mut parser = tree_sitter::Parser::new();
    let Ok(()) = parser.set_language(&tree_sitter_json::LANGUAGE.into()) else {
        tracing::warn!("Failed to set tree-sitter-json language");
        return key_ranges;
    };

    let Some(tree) = parser.parse(json_text, None) else {
        tracing::warn!("Failed to parse JSON with tree-sitter");
        return key_ranges;
    };

    let root_node = tree.root_node();
    let mut cursor = root_node.walk();
    for object in root_node.named_children(&mut cursor).filter(|node| node.kind() == "object") {
        let mut pair_cursor = object.walk();
        for pair in object.named_children(&mut pair_cursor).filter(|node| node.kind() == "pair") {
            let Some(key_node) = pair.child_by_field_name("key") else {
                continue;
            };
            let Ok(key_text) = key_node.utf8_text(json_text.as_bytes()) else {
                tracing::warn!("Failed to get key text from node");
                continue;
            };
            key_ranges.insert(key_text.trim_matches('"').to_string(), SourceRange::from_node(&key_node));
        }
    }

    key_ranges
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    // File name is the language
    #[case("/site/locales/lt.json", Some("lt"))]
    #[case("/site/locales/en.json", Some("en"))]
    // Directory name is the language
    #[case("/site/locales/lt/common.json", Some("lt"))]
    // Region and script subtags
    #[case("/site/i18n/en-GB.json", Some("en-GB"))]
    #[case("/site/i18n/pt_BR.json", Some("pt_BR"))]
    #[case("/site/i18n/sr-Cyrl-RS.json", Some("sr-Cyrl-RS"))]
    // The last match wins
    #[case("/site/locales/en/lt.json", Some("lt"))]
    // No language anywhere
    #[case("/site/locales/common.json", None)]
    #[case("/site/locales/english.json", None)]
    #[case("/site/locales/en-translations.json", None)]
    fn test_detect_language_from_path(#[case] path: &str, #[case] expected: Option<&str>) {
        let result = detect_language_from_path(Path::new(path));
        assert_eq!(result.as_deref(), expected);
    }

    #[googletest::test]
    fn test_parse_collects_entries_and_ranges() {
        let json_text = r#"{
  "hello": "labas",
  "world": "pasaulis"
}"#;

        let source = DictionarySource::parse("/locales/lt.json", "lt", json_text).unwrap();

        expect_that!(source.language, eq("lt"));
        expect_that!(source.entries.len(), eq(2));
        expect_that!(source.key_ranges.len(), eq(2));

        let hello_range = source.key_ranges.get("hello");
        expect_that!(hello_range, some(anything()));
        if let Some(range) = hello_range {
            expect_that!(range.start.line, eq(1));
            expect_that!(range.start.character, eq(2));
        }
    }

    #[googletest::test]
    fn test_parse_ignores_nested_keys_for_ranges() {
        let json_text = r#"{
  "hello": "labas",
  "nested": { "inner": "x" }
}"#;

        let source = DictionarySource::parse("/locales/lt.json", "lt", json_text).unwrap();

        expect_that!(source.key_ranges.contains_key("hello"), eq(true));
        expect_that!(source.key_ranges.contains_key("nested"), eq(true));
        expect_that!(source.key_ranges.contains_key("inner"), eq(false));
        expect_that!(source.word_map().len(), eq(1));
    }

    #[rstest]
    fn test_parse_rejects_arrays() {
        let result = DictionarySource::parse("/locales/lt.json", "lt", r#"["hello"]"#);

        assert!(matches!(result, Err(DictionaryError::NotAnObject { .. })));
    }

    #[rstest]
    fn test_parse_rejects_invalid_json() {
        let result = DictionarySource::parse("/locales/lt.json", "lt", "{ invalid");

        assert!(matches!(result, Err(DictionaryError::Parse { .. })));
    }

    #[rstest]
    fn test_load_dictionary_file() {
        let temp_dir = TempDir::new().unwrap();
        let locales = temp_dir.path().join("locales");
        fs::create_dir_all(&locales).unwrap();
        fs::write(locales.join("lt.json"), r#"{"Hello": "labas"}"#).unwrap();

        let source = load_dictionary_file(&locales.join("lt.json"), temp_dir.path()).unwrap();

        assert_eq!(source.language, "lt");
        assert_eq!(source.word_map().lookup("hello"), Some("labas"));
    }

    #[rstest]
    fn test_load_dictionary_file_unknown_language() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("words.json");
        fs::write(&path, "{}").unwrap();

        let result = load_dictionary_file(&path, temp_dir.path());

        assert!(matches!(result, Err(DictionaryError::UnknownLanguage { .. })));
    }

    #[rstest]
    fn test_load_dictionary_file_ignores_language_above_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("de").join("site");
        fs::create_dir_all(root.join("locales")).unwrap();
        let path = root.join("locales/words.json");
        fs::write(&path, "{}").unwrap();

        let result = load_dictionary_file(&path, &root);

        assert!(matches!(result, Err(DictionaryError::UnknownLanguage { .. })));
    }

    #[rstest]
    fn test_load_dictionary_file_missing() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_dictionary_file(&temp_dir.path().join("lt.json"), temp_dir.path());

        assert!(matches!(result, Err(DictionaryError::Io { .. })));
    }
}
