//! Splits text into candidate words and the separators between them.
//!
//! A word starts with a letter or digit and continues through letters, digits,
//! apostrophes (`'`, `’`) and hyphens. Apostrophes and hyphens only count when
//! they sit inside a word; at either edge they belong to the surrounding
//! separator. Underscores glue a run into an identifier (`foo_bar`), which is
//! scanned as one word but can never be a dictionary key.

/// Characters that may join letters inside a word but never start or end one.
const JOINERS: [char; 3] = ['\'', '\u{2019}', '-'];

/// A piece of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A run that is looked up in the word map.
    Word(&'a str),
    /// Whitespace, punctuation, markup: passed through unchanged.
    Separator(&'a str),
}

impl<'a> Segment<'a> {
    /// The original text of the segment.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        match *self {
            Self::Word(text) | Self::Separator(text) => text,
        }
    }
}

/// Iterator over the [`Segment`]s of a string.
///
/// Concatenating every yielded segment reproduces the input exactly.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    /// Text not yet scanned.
    rest: &'a str,
}

/// Scans `text` into words and separators.
///
/// # Examples
/// ```
/// use word_overlay::translate::{Segment, segments};
///
/// let parts: Vec<_> = segments("Don't panic!").collect();
/// assert_eq!(
///     parts,
///     vec![Segment::Word("Don't"), Segment::Separator(" "), Segment::Word("panic"), Segment::Separator("!")]
/// );
/// ```
#[must_use]
pub const fn segments(text: &str) -> Segments<'_> {
    Segments { rest: text }
}

/// Returns true if `candidate` scans as exactly one word without underscores.
///
/// Only such strings can ever be matched by a lookup, so dictionary keys are
/// restricted to them.
#[must_use]
pub fn is_token(candidate: &str) -> bool {
    let mut parts = segments(candidate);
    matches!(
        (parts.next(), parts.next()),
        (Some(Segment::Word(word)), None) if !word.contains('_')
    )
}

/// Letters, digits and the underscore may open a word.
fn starts_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Characters allowed after the first one.
fn continues_word(c: char) -> bool {
    starts_word(c) || JOINERS.contains(&c)
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;

        if starts_word(first) {
            let run_end = self.rest.find(|c: char| !continues_word(c)).unwrap_or(self.rest.len());
            let (run, _) = self.rest.split_at(run_end);
            let word_len = run.trim_end_matches(JOINERS).len();
            let (word, rest) = self.rest.split_at(word_len);
            self.rest = rest;
            Some(Segment::Word(word))
        } else {
            let end = self.rest.find(starts_word).unwrap_or(self.rest.len());
            let (separator, rest) = self.rest.split_at(end);
            self.rest = rest;
            Some(Segment::Separator(separator))
        }
    }
}
