//! Finds dictionary files under a workspace root.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;

use crate::config::DictionaryFilesConfig;

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Invalid dictionary include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid dictionary exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches workspace-relative paths against the dictionary file patterns.
#[derive(Debug, Clone)]
pub struct DictionaryMatcher {
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl DictionaryMatcher {
    pub fn new(config: &DictionaryFilesConfig) -> Result<Self, DiscoveryError> {
        let include_set = Self::build_glob_set(&config.include_patterns, |pattern, source| {
            DiscoveryError::InvalidIncludePattern { pattern, source }
        })?;

        let exclude_set = Self::build_glob_set(&config.exclude_patterns, |pattern, source| {
            DiscoveryError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { include_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, DiscoveryError>
    where
        F: Fn(String, globset::Error) -> DiscoveryError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Returns true if the path matches an include pattern and no exclude pattern.
    ///
    /// The path must be relative to the workspace root.
    #[must_use]
    pub fn is_match(&self, relative_path: &Path) -> bool {
        self.include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}

/// Walks `workspace_root` (honouring `.gitignore`) and returns matching dictionary files, sorted.
pub fn find_dictionary_files(
    workspace_root: &Path,
    config: &DictionaryFilesConfig,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let matcher = DictionaryMatcher::new(config)?;
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(workspace_root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .require_git(false)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(workspace_root) else {
            continue;
        };
        if matcher.is_match(relative_path) {
            found_files.push(path.to_path_buf());
        }
    }

    found_files.sort();
    tracing::debug!(
        workspace_root = %workspace_root.display(),
        count = found_files.len(),
        "Found dictionary files"
    );
    Ok(found_files)
}
