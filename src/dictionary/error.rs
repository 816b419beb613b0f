use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading dictionary data.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The file could not be read.
    #[error("Failed to read dictionary file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("Failed to parse dictionary file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed, but its top level is not an object of words.
    #[error("Dictionary file '{}' must contain a JSON object of words", path.display())]
    NotAnObject { path: PathBuf },

    /// No language code could be found in the file path.
    #[error("Cannot detect the language of dictionary file '{}'", path.display())]
    UnknownLanguage { path: PathBuf },

    /// An in-memory dictionary value has the wrong shape.
    #[error("Invalid dictionary layout: {0}")]
    InvalidLayout(String),
}
