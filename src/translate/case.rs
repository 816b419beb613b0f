//! First-letter case preservation.

/// Carries the case of the first character of `original` over to `translated`.
///
/// Only the first character is considered: when uppercasing it leaves it
/// unchanged, the first character of the translation is uppercased and the
/// rest is kept exactly as the dictionary spells it. Digits and caseless
/// letters therefore count as uppercase. Acronyms and mixed-case tokens get no
/// special treatment.
///
/// # Examples
/// ```
/// use word_overlay::translate::preserve_case;
///
/// assert_eq!(preserve_case("Hello", "labas"), "Labas");
/// assert_eq!(preserve_case("hello", "labas"), "labas");
/// assert_eq!(preserve_case("HELLO", "labas"), "Labas");
/// ```
#[must_use]
pub fn preserve_case(original: &str, translated: &str) -> String {
    let mut rest = translated.chars();
    match (original.chars().next(), rest.next()) {
        (Some(first), Some(head)) if first.to_uppercase().eq([first]) => {
            head.to_uppercase().chain(rest).collect()
        }
        _ => translated.to_owned(),
    }
}
