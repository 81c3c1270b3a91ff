//! Media locations and embedding settings shared by the CLI and web service

use crate::error::{SignError, SignResult};
use std::path::{Path, PathBuf};

/// Default media root, relative to the working directory
pub const DEFAULT_STATIC_DIR: &str = "frontend/public/static";

/// Subdirectory of the media root holding word and phrase clips
pub const WORDS_SUBDIR: &str = "words";

/// Subdirectory of the media root holding one clip per letter
pub const ALPHABET_SUBDIR: &str = "alphabet";

/// URL path under which the media root is served
pub const STATIC_URL_PREFIX: &str = "static";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignConfig {
    /// Media root containing `words/` and `alphabet/`
    pub static_dir: PathBuf,
    /// Optional word-vector table enabling embedding similarity
    pub vectors: Option<PathBuf>,
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            vectors: None,
        }
    }
}

impl SignConfig {
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: static_dir.into(),
            vectors: None,
        }
    }

    pub fn with_vectors(mut self, vectors: Option<PathBuf>) -> Self {
        self.vectors = vectors;
        self
    }

    pub fn validate(&self) -> SignResult<()> {
        if self.static_dir.as_os_str().is_empty() {
            return Err(SignError::Config(
                "Static directory path is empty".to_string(),
            ));
        }
        if let Some(vectors) = &self.vectors {
            if vectors.as_os_str().is_empty() {
                return Err(SignError::Config("Vector file path is empty".to_string()));
            }
        }
        Ok(())
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    pub fn words_dir(&self) -> PathBuf {
        self.static_dir.join(WORDS_SUBDIR)
    }

    pub fn alphabet_dir(&self) -> PathBuf {
        self.static_dir.join(ALPHABET_SUBDIR)
    }

    /// Prefix of word clip references, e.g. `static/words`
    pub fn words_clip_prefix(&self) -> String {
        format!("{}/{}", STATIC_URL_PREFIX, WORDS_SUBDIR)
    }

    /// Prefix of letter clip references, e.g. `static/alphabet`
    pub fn alphabet_clip_prefix(&self) -> String {
        format!("{}/{}", STATIC_URL_PREFIX, ALPHABET_SUBDIR)
    }
}
