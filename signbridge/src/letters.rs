//! Letter fallback: fingerspelling clips keyed by single characters
//!
//! The alphabet directory holds one clip per character (`a.mp4`, `b.mp4`, …).
//! It is indexed once at startup so that resolving a letter during a request
//! is a map lookup rather than a filesystem check.

use crate::catalog::{ACCEPTED_EXTENSIONS, clip_reference, list_media_files, media_extension};
use crate::error::SignResult;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Character → fingerspelling clip
#[derive(Debug, Clone, Default)]
pub struct LetterIndex {
    clips: HashMap<char, String>,
}

impl LetterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_letter(&mut self, letter: char, clip: &str) -> &mut Self {
        self.clips.insert(letter, clip.to_string());
        self
    }

    /// Index the single-character media files in `dir`
    ///
    /// File stems are lowercased. When a letter has clips in several formats
    /// the earliest entry of [`ACCEPTED_EXTENSIONS`] wins.
    ///
    /// # Errors
    /// - `SignError::CatalogIo` if the directory cannot be listed
    pub fn load(dir: &Path, clip_prefix: &str) -> SignResult<Self> {
        let mut candidates: Vec<(char, usize, String)> = Vec::new();

        for (file_name, stem) in list_media_files(dir)? {
            let mut chars = stem.chars();
            let letter = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => continue,
            };
            let Some(ext) = media_extension(Path::new(&file_name)) else {
                continue;
            };
            let rank = ACCEPTED_EXTENSIONS
                .iter()
                .position(|accepted| *accepted == ext)
                .unwrap_or(ACCEPTED_EXTENSIONS.len());
            for lower in letter.to_lowercase() {
                candidates.push((lower, rank, file_name.clone()));
            }
        }

        candidates.sort();

        let mut index = LetterIndex::new();
        for (letter, _, file_name) in candidates {
            index
                .clips
                .entry(letter)
                .or_insert_with(|| clip_reference(clip_prefix, &file_name));
        }

        info!("Loaded {} letter signs from {}", index.len(), dir.display());
        Ok(index)
    }

    /// Like [`LetterIndex::load`], but an unreadable directory yields an
    /// empty index
    pub fn load_or_empty(dir: &Path, clip_prefix: &str) -> Self {
        match Self::load(dir, clip_prefix) {
            Ok(index) => index,
            Err(e) => {
                warn!("{}; letter fallback disabled", e);
                Self::new()
            }
        }
    }

    /// Clip for `letter`, if one exists
    pub fn resolve(&self, letter: char) -> Option<&str> {
        self.clips.get(&letter).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
