//! Word-by-word text translation.

/// First-letter case preservation
mod case;
/// Word and separator scanning
mod tokenizer;
/// Dictionary-driven translator
mod translator;

pub use case::preserve_case;
pub use tokenizer::{
    Segment,
    Segments,
    is_token,
    segments,
};
pub use translator::{
    DEFAULT_SOURCE_LANGUAGE,
    Translator,
    translate_with,
};
