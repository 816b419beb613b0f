//! Word dictionaries: in-memory types, file loading, discovery and checks.

/// Dictionary consistency checks
pub mod diagnostics;
/// Dictionary file discovery
mod discovery;
/// Dictionary error types
mod error;
/// Dictionary file loader
mod loader;
/// Dictionary and word map types
mod types;

pub use diagnostics::{
    DictionaryIssue,
    IssueKind,
    Severity,
    check_source,
};
pub use discovery::{
    DictionaryMatcher,
    DiscoveryError,
    find_dictionary_files,
};
pub use error::DictionaryError;
pub use loader::{
    DictionarySource,
    detect_language_from_path,
    load_dictionary_file,
};
pub use types::{
    Dictionary,
    WordMap,
};
