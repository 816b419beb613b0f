use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::document::{
    SKIPPED_TAGS,
    TRANSLATED_ATTRIBUTES,
};
use crate::translate::DEFAULT_SOURCE_LANGUAGE;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "page.attributes[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration syntax: {0}")]
    SyntaxError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlaySettings {
    /// Text in this language is shown untranslated.
    pub source_language: String,

    /// The two languages `toggle` switches between.
    pub toggle_languages: [String; 2],

    pub dictionary_files: DictionaryFilesConfig,
    pub page: PageConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DictionaryFilesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    /// Element attributes translated by the page walker.
    pub attributes: Vec<String>,
    /// Elements whose text content is never translated.
    pub skip_tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    /// File persisting the selected language, relative to the workspace root.
    ///
    /// `null` keeps the selection in memory only.
    pub path: Option<String>,
}

impl OverlaySettings {
    /// # Errors
    /// - Required field is empty
    /// - Toggle languages are identical
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.source_language.trim().is_empty() {
            errors.push(ValidationError::new(
                "sourceLanguage",
                "The language cannot be empty. Example: \"en\"",
            ));
        }

        for (index, language) in self.toggle_languages.iter().enumerate() {
            if language.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("toggleLanguages[{index}]"),
                    "The language cannot be empty. Example: [\"en\", \"lt\"]",
                ));
            }
        }

        let [first, second] = &self.toggle_languages;
        if !first.is_empty() && first == second {
            errors.push(ValidationError::new(
                "toggleLanguages",
                format!("Both toggle languages are '{first}'. Please specify two different languages"),
            ));
        }

        if self.dictionary_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "dictionaryFiles.includePatterns",
                "At least one pattern is required. Example: [\"**/locales/*.json\"]",
            ));
        }

        for (index, pattern) in self.dictionary_files.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("dictionaryFiles.includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.dictionary_files.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("dictionaryFiles.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, name) in self.page.attributes.iter().enumerate() {
            if name.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("page.attributes[{index}]"),
                    "The attribute name cannot be empty",
                ));
            }
        }

        for (index, tag) in self.page.skip_tags.iter().enumerate() {
            if tag.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("page.skipTags[{index}]"),
                    "The tag name cannot be empty",
                ));
            }
        }

        if let Some(path) = &self.storage.path
            && path.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "storage.path",
                "The path cannot be empty. Use null to keep the language in memory only",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            toggle_languages: [DEFAULT_SOURCE_LANGUAGE.to_string(), "lt".to_string()],
            dictionary_files: DictionaryFilesConfig::default(),
            page: PageConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for DictionaryFilesConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec!["**/{locales,translations,i18n}/**/*.json".to_string()],
            exclude_patterns: vec!["node_modules/**".to_string()],
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            attributes: TRANSLATED_ATTRIBUTES.iter().map(ToString::to_string).collect(),
            skip_tags: SKIPPED_TAGS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: Some(".word-overlay/state.json".to_string()) }
    }
}
