//! Spoken text to sign-language clip playlists
//!
//! Given a directory of sign clips named after the phrases they sign, this
//! crate turns free text into the ordered list of clips that sign it.
//!
//! # Workflow Example
//!
//! ```no_run
//! use signbridge::{SignConfig, SignTranslator};
//!
//! // 1. Build the catalog, letter index and scorer once at startup
//! let config = SignConfig::new("frontend/public/static");
//! let translator = SignTranslator::from_config(&config);
//!
//! // 2. Translate any number of utterances against the shared state
//! let translation = translator.translate("hello, how are you?");
//! for record in &translation.results {
//!     println!("{:?} {} -> {}", record.kind, record.matched_key, record.clip);
//! }
//!
//! // 3. Tokens with no clip at all are reported separately
//! if !translation.unmatched.is_empty() {
//!     eprintln!("No sign for: {}", translation.unmatched.join(", "));
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod letters;
pub mod mock;
pub mod normalize;
pub mod scorer;
pub mod segmenter;
pub mod translator;
pub mod vectors;

// End-to-end tests over real media directories
#[cfg(test)]
mod integration_tests;

pub use catalog::{ACCEPTED_EXTENSIONS, Catalog, CatalogBuilder, CatalogEntry};
pub use config::SignConfig;
pub use error::{SignError, SignResult};
pub use letters::LetterIndex;
pub use mock::{MockMode, MockScorer};
pub use normalize::{normalize_phrase, normalize_text, tokenize};
pub use scorer::{EmbeddingScorer, Scorer, SequenceScorer, sequence_ratio};
pub use segmenter::{FUZZY_THRESHOLD, MatchKind, MatchRecord, Translation, segment};
pub use translator::{SignTranslator, select_scorer};
pub use vectors::{Fingerprint, WordVectors};
