//! Mock scorer for testing
//!
//! Deterministic, model-free scorer for exercising the segmentation engine at
//! exact score boundaries without depending on a particular metric.
//!
//! # Example
//!
//! ```
//! use signbridge::mock::{MockMode, MockScorer};
//! use signbridge::scorer::Scorer;
//!
//! let mock = MockScorer::new(MockMode::Fixed(0.6));
//! assert_eq!(mock.score("helo", "hello"), 0.6);
//! ```

use crate::scorer::{Scorer, sequence_ratio};
use std::collections::HashMap;

/// Scoring behaviors for testing
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Every non-empty pair scores the same value
    Fixed(f32),

    /// Scores looked up by pair in either order; unknown pairs score 0.0
    Table(HashMap<(String, String), f32>),

    /// Delegate to the sequence ratio
    Sequence,

    /// Panic with the given message, simulating an engine fault
    Panic(String),
}

impl MockMode {
    /// Build a `Table` mode from `(a, b, score)` triples
    pub fn table(pairs: &[(&str, &str, f32)]) -> Self {
        let map = pairs
            .iter()
            .map(|(a, b, score)| ((a.to_string(), b.to_string()), *score))
            .collect();
        MockMode::Table(map)
    }
}

/// Scorer whose output is chosen by the test
#[derive(Debug, Clone)]
pub struct MockScorer {
    mode: MockMode,
}

impl MockScorer {
    pub fn new(mode: MockMode) -> Self {
        Self { mode }
    }
}

impl Scorer for MockScorer {
    fn score(&self, a: &str, b: &str) -> f32 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        match &self.mode {
            MockMode::Fixed(score) => score.clamp(0.0, 1.0),
            MockMode::Table(map) => map
                .get(&(a.to_string(), b.to_string()))
                .or_else(|| map.get(&(b.to_string(), a.to_string())))
                .copied()
                .unwrap_or(0.0),
            MockMode::Sequence => sequence_ratio(a, b),
            MockMode::Panic(msg) => panic!("{}", msg),
        }
    }

    fn scorer_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_mode() {
        let mock = MockScorer::new(MockMode::Fixed(0.42));
        assert_eq!(mock.score("a", "b"), 0.42);
        assert_eq!(mock.score("", "b"), 0.0);
    }

    #[test]
    fn test_fixed_mode_clamps() {
        let mock = MockScorer::new(MockMode::Fixed(3.0));
        assert_eq!(mock.score("a", "b"), 1.0);
    }

    #[test]
    fn test_table_mode_is_symmetric() {
        let mock = MockScorer::new(MockMode::table(&[("cap", "car", 0.8)]));
        assert_eq!(mock.score("cap", "car"), 0.8);
        assert_eq!(mock.score("car", "cap"), 0.8);
        assert_eq!(mock.score("cap", "bat"), 0.0);
    }

    #[test]
    fn test_sequence_mode() {
        let mock = MockScorer::new(MockMode::Sequence);
        assert_eq!(mock.score("abcd", "bcde"), 0.75);
        assert_eq!(mock.scorer_name(), "mock");
    }

    #[test]
    #[should_panic(expected = "scorer exploded")]
    fn test_panic_mode() {
        let mock = MockScorer::new(MockMode::Panic("scorer exploded".to_string()));
        mock.score("a", "b");
    }
}
