//! Natural-language classifiers.
//!
//! Each classifier sends a fixed two-message request (instructions plus the
//! text to judge) at temperature 0 and maps the free-text reply onto a closed
//! verdict with a pure parser. Parsers never fail; unrecognised replies fall
//! back to a documented default.

pub mod existence;
pub mod goodbye;

pub use existence::{ExistenceClassifier, parse_character_reply};
pub use goodbye::{GoodbyeClassifier, parse_goodbye_reply};

/// Classifier requests are deterministic.
pub(crate) const CLASSIFIER_TEMPERATURE: f64 = 0.0;

/// Verdicts are a word or a short name; anything longer is noise.
pub(crate) const CLASSIFIER_MAX_TOKENS: u32 = 20;

/// Strip whitespace and any wrapping quote or backtick characters.
pub(crate) fn strip_wrapping(reply: &str) -> &str {
    reply
        .trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`'))
        .trim()
}

/// Strip trailing sentence punctuation from a single token.
pub(crate) fn strip_trailing_punctuation(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '.' | ',' | '!' | '?' | ';' | ':'))
}
