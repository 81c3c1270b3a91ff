//! Sign translator: the engine together with its startup-built state
//!
//! `SignTranslator` owns shared handles to the catalog, letter index and
//! scorer. It is built once and then cloned cheaply into every request
//! handler; nothing in it is mutated after construction.
//!
//! # Example
//!
//! ```no_run
//! use signbridge::{SignConfig, SignTranslator};
//!
//! let translator = SignTranslator::from_config(&SignConfig::new("frontend/public/static"));
//! let translation = translator.translate("Good morning, how are you?");
//! for record in &translation.results {
//!     println!("{} -> {}", record.source_token, record.clip);
//! }
//! ```

use crate::catalog::Catalog;
use crate::config::SignConfig;
use crate::letters::LetterIndex;
use crate::normalize::tokenize;
use crate::scorer::{EmbeddingScorer, Scorer, SequenceScorer};
use crate::segmenter::{Translation, segment};
use crate::vectors::WordVectors;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct SignTranslator {
    catalog: Arc<Catalog>,
    letters: Arc<LetterIndex>,
    scorer: Arc<dyn Scorer>,
}

impl SignTranslator {
    pub fn new(catalog: Catalog, letters: LetterIndex, scorer: Arc<dyn Scorer>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            letters: Arc::new(letters),
            scorer,
        }
    }

    /// Build everything from `config`, degrading instead of failing
    ///
    /// A missing vector table selects sequence similarity; unreadable media
    /// directories give an empty catalog or letter index. Each degradation is
    /// logged.
    pub fn from_config(config: &SignConfig) -> Self {
        let scorer = select_scorer(config.vectors.as_deref());
        let catalog =
            Catalog::load_or_empty(&config.words_dir(), &config.words_clip_prefix(), &*scorer);
        let letters =
            LetterIndex::load_or_empty(&config.alphabet_dir(), &config.alphabet_clip_prefix());
        Self::new(catalog, letters, scorer)
    }

    /// Normalize `text` and segment it into sign clips
    pub fn translate(&self, text: &str) -> Translation {
        self.translate_tokens(&tokenize(text))
    }

    /// Segment already-normalized tokens
    pub fn translate_tokens(&self, tokens: &[String]) -> Translation {
        segment(tokens, &self.catalog, &*self.scorer, &self.letters)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn letters(&self) -> &LetterIndex {
        &self.letters
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.scorer_name()
    }
}

impl std::fmt::Debug for SignTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignTranslator")
            .field("signs", &self.catalog.len())
            .field("letters", &self.letters.len())
            .field("scorer", &self.scorer.scorer_name())
            .finish()
    }
}

/// Pick the similarity strategy for this process
///
/// Uses embedding similarity when `vectors` points at a readable table,
/// sequence similarity otherwise.
pub fn select_scorer(vectors: Option<&Path>) -> Arc<dyn Scorer> {
    let Some(path) = vectors else {
        info!("No word vectors configured, using sequence similarity");
        return Arc::new(SequenceScorer::new());
    };

    match WordVectors::load(path) {
        Ok(table) => {
            info!(
                "Loaded {} word vectors ({} dimensions) from {}",
                table.len(),
                table.dim(),
                path.display()
            );
            Arc::new(EmbeddingScorer::new(Arc::new(table)))
        }
        Err(e) => {
            warn!("{}; using sequence similarity", e);
            Arc::new(SequenceScorer::new())
        }
    }
}
