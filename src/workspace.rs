//! A project directory: its configuration, dictionaries and persisted language.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{
    ConfigError,
    ConfigManager,
    OverlaySettings,
};
use crate::dictionary::{
    Dictionary,
    DictionaryError,
    DictionaryIssue,
    DictionarySource,
    DiscoveryError,
    WordMap,
    check_source,
    find_dictionary_files,
    load_dictionary_file,
};
use crate::document::WalkOptions;
use crate::language::{
    JsonFileStore,
    LanguageState,
    StoreError,
};
use crate::overlay::Overlay;
use crate::translate::Translator;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Everything loaded from a workspace root.
#[derive(Debug)]
pub struct Workspace {
    config: ConfigManager,
    /// Successfully loaded dictionary files, in discovery order.
    sources: Vec<DictionarySource>,
    /// Dictionary files that could not be loaded.
    failures: Vec<DictionaryError>,
    overlay: Overlay,
}

impl Workspace {
    /// Loads the workspace at `root`.
    ///
    /// Dictionary files that fail to load are recorded in
    /// [`failures`](Self::failures) and skipped; the rest still load.
    ///
    /// # Errors
    /// - Invalid configuration
    /// - Invalid dictionary file pattern
    /// - Unreadable language store
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, WorkspaceError> {
        let root = root.into();
        let config = ConfigManager::load(&root)?;
        let settings = config.settings();

        let files = find_dictionary_files(&root, &settings.dictionary_files)?;
        let mut dictionary = Dictionary::new();
        let mut sources = Vec::new();
        let mut failures = Vec::new();
        for file in files {
            match load_dictionary_file(&file, &root) {
                Ok(source) => {
                    dictionary.insert(source.language.clone(), source.word_map());
                    sources.push(source);
                }
                Err(e) => {
                    tracing::warn!("Skipping dictionary file: {}", e);
                    failures.push(e);
                }
            }
        }
        tracing::info!(
            root = %root.display(),
            files = sources.len(),
            failed = failures.len(),
            languages = ?dictionary.languages(),
            "Loaded dictionaries"
        );

        let translator =
            Translator::new(dictionary).with_source_language(settings.source_language.clone());
        let mut language =
            LanguageState::new(settings.source_language.clone(), settings.toggle_languages.clone());
        if let Some(path) = config.storage_path() {
            language = language.with_store(Box::new(JsonFileStore::open(path)?));
        }
        let overlay = Overlay::new(translator, language)
            .with_walk_options(WalkOptions::from(&settings.page));

        Ok(Self { config, sources, failures, overlay })
    }

    #[must_use]
    pub const fn settings(&self) -> &OverlaySettings {
        self.config.settings()
    }

    #[must_use]
    pub fn sources(&self) -> &[DictionarySource] {
        &self.sources
    }

    #[must_use]
    pub fn failures(&self) -> &[DictionaryError] {
        &self.failures
    }

    #[must_use]
    pub const fn dictionary(&self) -> &Dictionary {
        self.overlay.translator().dictionary()
    }

    #[must_use]
    pub const fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub const fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }

    /// Checks every loaded dictionary file against its language's merged word map.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<DictionaryIssue> {
        let empty = WordMap::new();
        self.sources
            .iter()
            .flat_map(|source| {
                let word_map = self.dictionary().word_map(&source.language).unwrap_or(&empty);
                check_source(source, word_map)
            })
            .collect()
    }
}
