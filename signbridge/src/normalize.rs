//! Text normalization for requests and catalog file names
//!
//! Two normalizations live here:
//!
//! - [`normalize_text`] / [`tokenize`] turn free request text into the token
//!   stream the segmenter consumes: everything outside ASCII letters and
//!   whitespace is dropped, the rest is lowercased and split on whitespace.
//! - [`normalize_phrase`] turns a media file stem such as `Good_Morning` into
//!   the catalog key `good morning`.

use regex::Regex;
use std::sync::LazyLock;

static NON_ALPHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z\s]").expect("valid regex"));

static PHRASE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_]").expect("valid regex"));

/// Strip non-letters, lowercase and trim request text
///
/// # Example
///
/// ```
/// use signbridge::normalize::normalize_text;
/// assert_eq!(normalize_text("  Hello, World! 42 "), "hello world");
/// ```
pub fn normalize_text(text: &str) -> String {
    let letters_only = NON_ALPHA.replace_all(text, "");
    letters_only
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize request text and split it into tokens
pub fn tokenize(text: &str) -> Vec<String> {
    normalize_text(text)
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Derive a catalog key from a media file stem
///
/// Hyphens and underscores become spaces, the result is lowercased and
/// whitespace runs collapse to a single space. Returns an empty string for
/// stems made only of separators.
pub fn normalize_phrase(stem: &str) -> String {
    let spaced = PHRASE_SEPARATORS.replace_all(stem, " ");
    spaced
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Number of space-separated words in a normalized phrase
pub fn word_count(phrase: &str) -> usize {
    phrase.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_strips_punctuation_and_digits() {
        assert_eq!(normalize_text("Hello, how are you?"), "hello how are you");
        assert_eq!(normalize_text("I'm 25 years old"), "im years old");
    }

    #[test]
    fn test_normalize_text_collapses_whitespace() {
        assert_eq!(normalize_text("  good \t morning \n"), "good morning");
    }

    #[test]
    fn test_normalize_text_non_latin_is_dropped() {
        assert_eq!(normalize_text("café naïve"), "caf nave");
        assert_eq!(normalize_text("123 !!"), "");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Thank you, friend."), vec!["thank", "you", "friend"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_normalize_phrase_separators() {
        assert_eq!(normalize_phrase("Good_Morning"), "good morning");
        assert_eq!(normalize_phrase("how-are-you"), "how are you");
        assert_eq!(normalize_phrase("thank__you"), "thank you");
        assert_eq!(normalize_phrase(" Hello "), "hello");
    }

    #[test]
    fn test_normalize_phrase_only_separators() {
        assert_eq!(normalize_phrase("-_-"), "");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("how are you"), 3);
        assert_eq!(word_count("hello"), 1);
        assert_eq!(word_count(""), 0);
    }
}
