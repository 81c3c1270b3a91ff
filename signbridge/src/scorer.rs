//! Similarity scoring between a spoken word and catalog phrases
//!
//! The `Scorer` trait hides which metric is in use. Two strategies exist and
//! one of them is picked when the process starts:
//!
//! - [`EmbeddingScorer`] compares mean word vectors by cosine similarity and
//!   falls back to the sequence ratio when either side has no usable vector.
//! - [`SequenceScorer`] uses the Ratcliff/Obershelp "gestalt" ratio over
//!   characters and needs no model at all.
//!
//! Both return scores in `[0, 1]` and score an empty string as `0.0`.

use crate::catalog::CatalogEntry;
use crate::vectors::{Fingerprint, WordVectors};
use std::sync::Arc;

/// Strategy for comparing two normalized strings
pub trait Scorer: Send + Sync {
    /// Similarity of `a` and `b` in `[0, 1]`
    fn score(&self, a: &str, b: &str) -> f32;

    /// Embedding of `phrase`, if this scorer has an embedding backend
    ///
    /// Called once per catalog entry at build time and once per fuzzy-matched
    /// token at request time.
    fn fingerprint(&self, _phrase: &str) -> Option<Fingerprint> {
        None
    }

    /// Score `token` against a catalog entry
    ///
    /// `token_fingerprint` is the result of [`Scorer::fingerprint`] for the
    /// token, computed once by the caller so that scanning the catalog does
    /// not re-embed the token for every entry.
    fn score_entry(
        &self,
        token: &str,
        _token_fingerprint: Option<&Fingerprint>,
        entry: &CatalogEntry,
    ) -> f32 {
        self.score(token, entry.phrase())
    }

    /// Name used in startup logs
    fn scorer_name(&self) -> &str;
}

/// Character-sequence similarity, always available
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceScorer;

impl SequenceScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Scorer for SequenceScorer {
    fn score(&self, a: &str, b: &str) -> f32 {
        sequence_ratio(a, b)
    }

    fn scorer_name(&self) -> &str {
        "sequence"
    }
}

/// Cosine similarity of averaged word vectors
#[derive(Debug, Clone)]
pub struct EmbeddingScorer {
    vectors: Arc<WordVectors>,
}

impl EmbeddingScorer {
    pub fn new(vectors: Arc<WordVectors>) -> Self {
        Self { vectors }
    }

    pub fn vectors(&self) -> &WordVectors {
        &self.vectors
    }
}

impl Scorer for EmbeddingScorer {
    fn score(&self, a: &str, b: &str) -> f32 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let fa = self.vectors.embed(a);
        let fb = self.vectors.embed(b);
        fa.cosine(&fb).unwrap_or_else(|| sequence_ratio(a, b))
    }

    fn fingerprint(&self, phrase: &str) -> Option<Fingerprint> {
        Some(self.vectors.embed(phrase))
    }

    fn score_entry(
        &self,
        token: &str,
        token_fingerprint: Option<&Fingerprint>,
        entry: &CatalogEntry,
    ) -> f32 {
        if token.is_empty() || entry.phrase().is_empty() {
            return 0.0;
        }
        match (token_fingerprint, entry.fingerprint()) {
            (Some(tf), Some(ef)) => tf
                .cosine(ef)
                .unwrap_or_else(|| sequence_ratio(token, entry.phrase())),
            _ => self.score(token, entry.phrase()),
        }
    }

    fn scorer_name(&self) -> &str {
        "embedding"
    }
}

/// Ratcliff/Obershelp similarity: `2 * M / (len(a) + len(b))`
///
/// `M` is the number of characters in the matching blocks found by taking the
/// longest common substring and recursing on the pieces to its left and
/// right. Longest-block ties go to the earliest position in `a`, then in `b`.
pub fn sequence_ratio(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let matches = matching_characters(&a, &b);
    (2 * matches) as f32 / (a.len() + b.len()) as f32
}

/// Total size of all matching blocks between `a` and `b`
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    total
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, size)`
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run[j + 1 - blo] = length of the common run ending at a[i - 1], b[j]
    let width = bhi - blo + 1;
    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];

    for i in alo..ahi {
        for j in blo..bhi {
            let slot = j - blo + 1;
            if a[i] == b[j] {
                let k = prev[slot - 1] + 1;
                curr[slot] = k;
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            } else {
                curr[slot] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_sequence_ratio_identical() {
        assert!(approx(sequence_ratio("hello", "hello"), 1.0));
    }

    #[test]
    fn test_sequence_ratio_known_values() {
        assert!(approx(sequence_ratio("abcd", "bcde"), 0.75));
        // "hel" + "o" match: 2 * 4 / 9
        assert!(approx(sequence_ratio("hello", "helo"), 8.0 / 9.0));
        assert!(approx(sequence_ratio("hi", "hello"), 2.0 / 7.0));
        assert!(approx(sequence_ratio("abc", "xyz"), 0.0));
    }

    #[test]
    fn test_sequence_ratio_recurses_both_sides() {
        // Longest block "cd"; "a" on the left and "f" on the right also match
        assert!(approx(sequence_ratio("abcdef", "axcdyf"), 8.0 / 12.0));
    }

    #[test]
    fn test_sequence_ratio_empty() {
        assert_eq!(sequence_ratio("", "hello"), 0.0);
        assert_eq!(sequence_ratio("hello", ""), 0.0);
        assert_eq!(sequence_ratio("", ""), 0.0);
    }

    #[test]
    fn test_sequence_ratio_symmetric_on_words() {
        let pairs = [("thanks", "thank you"), ("morning", "mourning"), ("helo", "hello")];
        for (a, b) in pairs {
            assert!(approx(sequence_ratio(a, b), sequence_ratio(b, a)), "{} / {}", a, b);
        }
    }

    #[test]
    fn test_sequence_scorer_uses_ratio() {
        let scorer = SequenceScorer::new();
        assert!(approx(scorer.score("abcd", "bcde"), 0.75));
        assert!(scorer.fingerprint("abcd").is_none());
        assert_eq!(scorer.scorer_name(), "sequence");
    }

    fn embedding_scorer() -> EmbeddingScorer {
        let mut vectors = WordVectors::new(2);
        vectors
            .with_vector("hello", vec![1.0, 0.0])
            .unwrap()
            .with_vector("hi", vec![0.8, 0.6])
            .unwrap()
            .with_vector("world", vec![0.0, 1.0])
            .unwrap();
        EmbeddingScorer::new(Arc::new(vectors))
    }

    #[test]
    fn test_embedding_scorer_cosine() {
        let scorer = embedding_scorer();
        assert!(approx(scorer.score("hi", "hello"), 0.8));
        assert!(approx(scorer.score("hello", "world"), 0.0));
    }

    #[test]
    fn test_embedding_scorer_falls_back_for_unknown_words() {
        let scorer = embedding_scorer();
        // Neither word has a vector, so the sequence ratio decides
        assert!(approx(scorer.score("abcd", "bcde"), 0.75));
        assert_eq!(scorer.score("", "hello"), 0.0);
    }

    #[test]
    fn test_embedding_scorer_entry_uses_fingerprints() {
        let scorer = embedding_scorer();
        let entry = CatalogEntry::new("hello", "static/words/hello.mp4", scorer.fingerprint("hello"));
        let token_fp = scorer.fingerprint("hi");
        assert!(approx(scorer.score_entry("hi", token_fp.as_ref(), &entry), 0.8));

        // Entry without a fingerprint is embedded on the fly
        let bare = CatalogEntry::new("hello", "static/words/hello.mp4", None);
        assert!(approx(scorer.score_entry("hi", token_fp.as_ref(), &bare), 0.8));
    }
}
