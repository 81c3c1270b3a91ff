//! Static word-vector table used as the embedding backend
//!
//! The table is read once at startup from a plain-text file with one word per
//! line followed by its components:
//!
//! ```text
//! hello 0.12 -0.40 0.33
//! world 0.05 0.21 -0.18
//! ```
//!
//! A leading word2vec-style header line (`<count> <dim>`) is accepted and
//! skipped. A phrase is embedded as the mean of its word vectors, with words
//! missing from the table contributing zeros, so a phrase made only of unknown
//! words yields a degenerate (zero-magnitude) fingerprint.

use crate::error::{SignError, SignResult};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Fixed-length embedding of a phrase with its magnitude cached
#[derive(Debug, Clone, PartialEq)]
pub struct Fingerprint {
    values: Vec<f32>,
    norm: f32,
}

impl Fingerprint {
    pub fn new(values: Vec<f32>) -> Self {
        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        Self { values, norm }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn norm(&self) -> f32 {
        self.norm
    }

    /// A zero-magnitude vector carries no semantic information
    pub fn is_degenerate(&self) -> bool {
        self.norm == 0.0 || !self.norm.is_finite()
    }

    /// Cosine similarity clamped into `[0, 1]`
    ///
    /// Returns `None` when either side is degenerate or the dimensions differ,
    /// leaving the caller to pick a fallback metric.
    pub fn cosine(&self, other: &Fingerprint) -> Option<f32> {
        if self.is_degenerate() || other.is_degenerate() || self.values.len() != other.values.len()
        {
            return None;
        }
        let dot: f32 = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a * b)
            .sum();
        Some((dot / (self.norm * other.norm)).clamp(0.0, 1.0))
    }
}

/// In-memory word → vector table
#[derive(Debug, Clone)]
pub struct WordVectors {
    dim: usize,
    table: HashMap<String, Vec<f32>>,
}

impl WordVectors {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            table: HashMap::new(),
        }
    }

    /// Add a vector for `word`; the first vector seen for a word is kept
    pub fn with_vector(&mut self, word: &str, values: Vec<f32>) -> SignResult<&mut Self> {
        if values.len() != self.dim {
            return Err(SignError::Embedding(format!(
                "Vector for '{}' has {} components, expected {}",
                word,
                values.len(),
                self.dim
            )));
        }
        self.table.entry(word.to_lowercase()).or_insert(values);
        Ok(self)
    }

    /// Load a vector table from a text file
    ///
    /// # Errors
    /// - File cannot be opened or read
    /// - A component is not a number, or rows disagree on dimension
    /// - The file holds no vectors
    pub fn load(path: &Path) -> SignResult<Self> {
        let file = File::open(path).map_err(|e| {
            SignError::Embedding(format!(
                "Failed to open vector file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(BufReader::new(file), &path.display().to_string())
    }

    /// Parse a vector table from any buffered reader
    ///
    /// `source` only labels error messages.
    pub fn parse<R: BufRead>(reader: R, source: &str) -> SignResult<Self> {
        let mut vectors: Option<WordVectors> = None;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                SignError::Embedding(format!("Failed to read '{}': {}", source, e))
            })?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }

            // word2vec text header: "<count> <dim>"
            if line_no == 0 && is_header(&fields) {
                continue;
            }

            if fields.len() < 2 {
                return Err(SignError::Embedding(format!(
                    "{}:{}: expected a word followed by components",
                    source,
                    line_no + 1
                )));
            }

            let values = fields[1..]
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|e| {
                    SignError::Embedding(format!("{}:{}: {}", source, line_no + 1, e))
                })?;

            let table = vectors.get_or_insert_with(|| WordVectors::new(values.len()));
            table.with_vector(fields[0], values).map_err(|e| match e {
                SignError::Embedding(msg) => {
                    SignError::Embedding(format!("{}:{}: {}", source, line_no + 1, msg))
                }
                other => other,
            })?;
        }

        vectors.ok_or_else(|| SignError::Embedding(format!("No vectors found in '{}'", source)))
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.table.get(word).map(Vec::as_slice)
    }

    /// Mean of the word vectors of `phrase`; unknown words count as zeros
    pub fn embed(&self, phrase: &str) -> Fingerprint {
        let mut sum = vec![0.0f32; self.dim];
        let mut words = 0usize;

        for word in phrase.split_whitespace() {
            words += 1;
            if let Some(vector) = self.table.get(word) {
                for (acc, v) in sum.iter_mut().zip(vector) {
                    *acc += v;
                }
            }
        }

        if words > 1 {
            let n = words as f32;
            for acc in sum.iter_mut() {
                *acc /= n;
            }
        }
        Fingerprint::new(sum)
    }
}

fn is_header(fields: &[&str]) -> bool {
    fields.len() == 2 && fields.iter().all(|f| f.parse::<usize>().is_ok())
}
