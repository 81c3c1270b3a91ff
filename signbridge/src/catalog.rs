//! Sign catalog: spoken phrases mapped to sign clips
//!
//! The catalog is built once from a directory of media files. Each file name
//! defines the phrase it signs: `good_morning.mp4` is the clip for
//! `"good morning"`. The built catalog is immutable and is shared read-only by
//! every translation request.
//!
//! Two orderings are kept:
//!
//! - insertion order, which is file-name order when loaded from disk and is
//!   the order fuzzy matching scans in;
//! - match order, which is descending word count (stable, so equal word counts
//!   keep insertion order) and is the order greedy phrase matching scans in.

use crate::error::{SignError, SignResult};
use crate::normalize::normalize_phrase;
use crate::scorer::Scorer;
use crate::vectors::Fingerprint;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Media file extensions recognized as sign clips, in order of preference
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["mp4", "gif"];

/// A single phrase → clip mapping
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    phrase: String,
    words: Vec<String>,
    clip: String,
    fingerprint: Option<Fingerprint>,
}

impl CatalogEntry {
    /// Create an entry; `phrase` is normalized the same way file stems are
    pub fn new(phrase: &str, clip: &str, fingerprint: Option<Fingerprint>) -> Self {
        let phrase = normalize_phrase(phrase);
        let words = phrase.split_whitespace().map(str::to_string).collect();
        Self {
            phrase,
            words,
            clip: clip.to_string(),
            fingerprint,
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn clip(&self) -> &str {
        &self.clip
    }

    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.fingerprint.as_ref()
    }

    /// True if this phrase matches the leading tokens of `tokens` word for word
    pub fn is_prefix_of(&self, tokens: &[String]) -> bool {
        tokens.len() >= self.words.len() && tokens[..self.words.len()] == self.words[..]
    }
}

/// Immutable phrase index
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
    match_order: Vec<usize>,
}

impl Catalog {
    /// A catalog with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Build the catalog from the media files in `dir`
    ///
    /// `clip_prefix` is prepended to each file name to form its clip
    /// reference (e.g. `static/words`). Fingerprints come from
    /// `scorer.fingerprint`, so they are absent in sequence mode.
    ///
    /// Files are processed in file-name order. Later files whose phrase
    /// normalizes to an existing key replace that entry's clip.
    ///
    /// # Errors
    /// - `SignError::CatalogIo` if the directory cannot be listed
    pub fn load(dir: &Path, clip_prefix: &str, scorer: &dyn Scorer) -> SignResult<Self> {
        let files = list_media_files(dir)?;
        let mut builder = CatalogBuilder::new();

        for (file_name, stem) in files {
            let phrase = normalize_phrase(&stem);
            if phrase.is_empty() {
                warn!("Skipping '{}': file name has no phrase", file_name);
                continue;
            }
            let clip = clip_reference(clip_prefix, &file_name);
            let fingerprint = scorer.fingerprint(&phrase);
            debug!("Loaded sign '{}' -> {}", phrase, clip);
            builder.with_fingerprinted_entry(&phrase, &clip, fingerprint);
        }

        let catalog = builder.build();
        info!(
            "Loaded {} signs from {}",
            catalog.len(),
            dir.display()
        );
        Ok(catalog)
    }

    /// Like [`Catalog::load`], but an unreadable directory yields an empty
    /// catalog and a logged error instead of failing
    pub fn load_or_empty(dir: &Path, clip_prefix: &str, scorer: &dyn Scorer) -> Self {
        match Self::load(dir, clip_prefix, scorer) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("{}; continuing with an empty sign catalog", e);
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, phrase: &str) -> Option<&CatalogEntry> {
        self.index.get(phrase).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.index.contains_key(phrase)
    }

    /// Entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Entries by descending word count, ties in insertion order
    pub fn by_word_count(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.match_order.iter().map(|&i| &self.entries[i])
    }

    /// Phrases in insertion order
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(CatalogEntry::phrase)
    }
}

/// Incremental catalog construction
///
/// ```
/// use signbridge::catalog::Catalog;
///
/// let mut builder = Catalog::builder();
/// builder
///     .with_entry("hello", "static/words/hello.mp4")
///     .with_entry("how are you", "static/words/how_are_you.mp4");
/// let catalog = builder.build();
/// assert_eq!(catalog.by_word_count().next().unwrap().phrase(), "how are you");
/// ```
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(&mut self, phrase: &str, clip: &str) -> &mut Self {
        self.with_fingerprinted_entry(phrase, clip, None)
    }

    /// Add an entry; an existing phrase keeps its position but takes the new clip
    pub fn with_fingerprinted_entry(
        &mut self,
        phrase: &str,
        clip: &str,
        fingerprint: Option<Fingerprint>,
    ) -> &mut Self {
        let entry = CatalogEntry::new(phrase, clip, fingerprint);
        if entry.phrase().is_empty() {
            warn!("Ignoring catalog entry with empty phrase ({})", clip);
            return self;
        }

        match self.index.get(entry.phrase()) {
            Some(&i) => {
                warn!(
                    "Duplicate sign '{}': {} replaces {}",
                    entry.phrase(),
                    entry.clip(),
                    self.entries[i].clip()
                );
                self.entries[i] = entry;
            }
            None => {
                self.index
                    .insert(entry.phrase().to_string(), self.entries.len());
                self.entries.push(entry);
            }
        }
        self
    }

    pub fn build(self) -> Catalog {
        let mut match_order: Vec<usize> = (0..self.entries.len()).collect();
        // sort_by_key is stable: equal word counts keep insertion order
        match_order.sort_by_key(|&i| std::cmp::Reverse(self.entries[i].word_count()));
        Catalog {
            entries: self.entries,
            index: self.index,
            match_order,
        }
    }
}

/// Join a URL-style prefix and a file name
pub fn clip_reference(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", prefix, file_name)
    }
}

/// Lowercased extension of `path` if it is an accepted media type
pub(crate) fn media_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    ACCEPTED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Accepted media files in `dir` as `(file name, stem)`, sorted by file name
pub(crate) fn list_media_files(dir: &Path) -> SignResult<Vec<(String, String)>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        SignError::CatalogIo(format!(
            "Failed to read directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && media_extension(&path).is_some() {
                    files.push(path);
                }
            }
            Err(e) => warn!("Error reading entry in {}: {}", dir.display(), e),
        }
    }

    let mut named = Vec::with_capacity(files.len());
    for path in files {
        let file_name = path.file_name().and_then(|n| n.to_str());
        let stem = path.file_stem().and_then(|s| s.to_str());
        match (file_name, stem) {
            (Some(file_name), Some(stem)) => named.push((file_name.to_string(), stem.to_string())),
            _ => warn!("Skipping non UTF-8 file name: {}", path.display()),
        }
    }
    named.sort();
    Ok(named)
}
