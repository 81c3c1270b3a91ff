//! Segmentation engine: tokens to sign clips
//!
//! Tokens are consumed left to right. At each step the engine tries, in order:
//!
//! 1. **Exact phrase** – the catalog phrase with the most words whose words
//!    equal the leading remaining tokens. Consumes as many tokens as the
//!    phrase has words.
//! 2. **Fuzzy word** – the catalog phrase most similar to the first remaining
//!    token, accepted when its score reaches [`FUZZY_THRESHOLD`]. Consumes one
//!    token.
//! 3. **Fingerspelling** – one letter clip per character of the token that has
//!    one; characters without a clip are skipped. Consumes one token.
//!
//! Every step consumes at least one token, so the loop always terminates.
//! Ties are resolved by catalog order: equal word counts in step 1 and equal
//! scores in step 2 both go to the entry inserted first.
//!
//! # Example
//!
//! ```
//! use signbridge::catalog::Catalog;
//! use signbridge::letters::LetterIndex;
//! use signbridge::scorer::SequenceScorer;
//! use signbridge::segmenter::{MatchKind, segment};
//!
//! let mut builder = Catalog::builder();
//! builder
//!     .with_entry("hello", "static/words/hello.mp4")
//!     .with_entry("how are you", "static/words/how_are_you.mp4");
//! let catalog = builder.build();
//!
//! let tokens: Vec<String> = ["hello", "how", "are", "you"].map(String::from).to_vec();
//! let translation = segment(&tokens, &catalog, &SequenceScorer, &LetterIndex::new());
//!
//! assert_eq!(translation.results.len(), 2);
//! assert_eq!(translation.results[1].matched_key, "how are you");
//! assert_eq!(translation.results[1].kind, MatchKind::Exact);
//! ```

use crate::catalog::{Catalog, CatalogEntry};
use crate::letters::LetterIndex;
use crate::scorer::Scorer;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum similarity for a fuzzy match (inclusive)
pub const FUZZY_THRESHOLD: f32 = 0.6;

/// How a record's clip was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Fuzzy,
    #[serde(rename = "alphabet")]
    Letter,
}

/// One clip in the playback script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Word or phrase of the input this clip stands for
    #[serde(rename = "original_word")]
    pub source_token: String,
    /// Catalog phrase or letter that was matched
    #[serde(rename = "matched_word")]
    pub matched_key: String,
    #[serde(rename = "path")]
    pub clip: String,
    #[serde(rename = "match_type")]
    pub kind: MatchKind,
}

impl MatchRecord {
    fn from_entry(source_token: String, entry: &CatalogEntry, kind: MatchKind) -> Self {
        Self {
            source_token,
            matched_key: entry.phrase().to_string(),
            clip: entry.clip().to_string(),
            kind,
        }
    }
}

/// Result of segmenting one utterance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// Clips in playback order
    pub results: Vec<MatchRecord>,
    /// Tokens that produced no clip at all, in input order
    pub unmatched: Vec<String>,
}

impl Translation {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn clips(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.clip.as_str())
    }
}

/// Segment `tokens` into sign clips
///
/// `tokens` must already be normalized (see [`crate::normalize::tokenize`]).
pub fn segment(
    tokens: &[String],
    catalog: &Catalog,
    scorer: &dyn Scorer,
    letters: &LetterIndex,
) -> Translation {
    let mut translation = Translation::default();
    let mut remaining = tokens;

    while !remaining.is_empty() {
        if let Some(entry) = longest_prefix_match(remaining, catalog) {
            let consumed = entry.word_count();
            let source = remaining[..consumed].join(" ");
            debug!("Exact match: '{}' -> {}", source, entry.clip());
            translation
                .results
                .push(MatchRecord::from_entry(source, entry, MatchKind::Exact));
            remaining = &remaining[consumed..];
            continue;
        }

        let token = &remaining[0];
        match best_fuzzy_match(token, catalog, scorer) {
            Some((entry, score)) if score >= FUZZY_THRESHOLD => {
                debug!(
                    "Fuzzy match: '{}' ~ '{}' ({:.2}) -> {}",
                    token,
                    entry.phrase(),
                    score,
                    entry.clip()
                );
                translation
                    .results
                    .push(MatchRecord::from_entry(token.clone(), entry, MatchKind::Fuzzy));
            }
            _ => {
                let spelled = fingerspell(token, letters);
                if spelled.is_empty() {
                    debug!("No sign for '{}'", token);
                    translation.unmatched.push(token.clone());
                }
                translation.results.extend(spelled);
            }
        }
        remaining = &remaining[1..];
    }

    translation
}

/// Catalog entry with the most words that prefixes `tokens`
fn longest_prefix_match<'c>(tokens: &[String], catalog: &'c Catalog) -> Option<&'c CatalogEntry> {
    catalog.by_word_count().find(|entry| entry.is_prefix_of(tokens))
}

/// Highest-scoring catalog entry for `token`; the first of equal scores wins
fn best_fuzzy_match<'c>(
    token: &str,
    catalog: &'c Catalog,
    scorer: &dyn Scorer,
) -> Option<(&'c CatalogEntry, f32)> {
    let token_fingerprint = scorer.fingerprint(token);
    let mut best: Option<(&CatalogEntry, f32)> = None;

    for entry in catalog.entries() {
        let score = scorer.score_entry(token, token_fingerprint.as_ref(), entry);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((entry, score)),
        }
    }

    best
}

/// Letter records for each character of `token` that has a clip
fn fingerspell(token: &str, letters: &LetterIndex) -> Vec<MatchRecord> {
    let mut records = Vec::new();
    for letter in token.chars() {
        match letters.resolve(letter) {
            Some(clip) => records.push(MatchRecord {
                source_token: token.to_string(),
                matched_key: letter.to_string(),
                clip: clip.to_string(),
                kind: MatchKind::Letter,
            }),
            None => debug!("Missing letter sign: '{}'", letter),
        }
    }
    records
}
