//! Term normalization shared by the classifier and the matcher.

/// Suffixes that turn a digit run into an ordinal (`3rd`, `21st`).
const ORDINAL_SUFFIXES: [&str; 4] = ["st", "nd", "rd", "th"];

/// Shape of one normalized token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Every character is a digit.
    Numeric,
    /// Digits followed by an ordinal suffix; carries the digit prefix.
    Ordinal(&'a str),
    Word,
}

/// Lower-cases `text` and splits it on whitespace.
///
/// Order is preserved and duplicates are kept. Blank input yields no tokens.
pub fn normalize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Joins tokens back into single-spaced text.
pub fn normalize_to_text(tokens: &[String]) -> String {
    tokens.join(" ")
}

pub fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Returns the digit prefix of an ordinal token such as `3rd`.
pub fn ordinal_value(token: &str) -> Option<&str> {
    ORDINAL_SUFFIXES.iter().find_map(|suffix| {
        token
            .strip_suffix(suffix)
            .filter(|prefix| is_numeric(prefix))
    })
}

pub fn token_kind(token: &str) -> TokenKind<'_> {
    if is_numeric(token) {
        TokenKind::Numeric
    } else if let Some(value) = ordinal_value(token) {
        TokenKind::Ordinal(value)
    } else {
        TokenKind::Word
    }
}
