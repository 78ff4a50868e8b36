//! Dictionary entries.
//!
//! A [`WordEntry`] pairs a word and its gloss with the romanizer's output. The
//! romanized string is derived from the segments, never computed separately.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gloss::GlossProvider;
use crate::romanizer::{romanize_segments, Romanizer};
use crate::segmenter::{is_exact_cover, Akshara};

/// Gloss used when a provider has nothing for a word
pub const DEFAULT_GLOSS: &str = "Common word";

/// A persistable dictionary record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Source text (NFC form when the romanizer normalizes)
    pub source: String,
    /// Concatenation of the segment romanizations
    pub romanized: String,
    /// Gloss from the gloss provider
    pub gloss: String,
    /// Aksharas covering `source`
    pub segments: Vec<Akshara>,
}

impl WordEntry {
    /// Check the span-cover and concatenation invariants
    pub fn is_consistent(&self) -> bool {
        romanize_segments(&self.segments) == self.romanized
            && is_exact_cover(&self.segments, self.source.chars().count())
    }
}

impl std::fmt::Display for WordEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) - {}", self.source, self.romanized, self.gloss)
    }
}

/// Builds [`WordEntry`] values; pure and safe to share across threads
#[derive(Debug, Clone, Default)]
pub struct DictionaryEntryBuilder {
    romanizer: Romanizer,
}

impl DictionaryEntryBuilder {
    /// Create a builder with the default romanizer
    pub fn new() -> Self {
        DictionaryEntryBuilder::default()
    }

    /// Create a builder around a configured romanizer
    pub fn with_romanizer(romanizer: Romanizer) -> Self {
        DictionaryEntryBuilder { romanizer }
    }

    /// Get a reference to the romanizer
    pub fn romanizer(&self) -> &Romanizer {
        &self.romanizer
    }

    /// Build an entry. Fails only when `word` is empty.
    pub fn build(&self, word: &str, gloss: &str) -> Result<WordEntry> {
        if word.is_empty() {
            return Err(Error::InvalidInput("word is empty".to_string()));
        }

        let source = self.romanizer.prepare(word).into_owned();
        let segments = self.romanizer.segments_of(&source);
        let entry = WordEntry {
            romanized: romanize_segments(&segments),
            source,
            gloss: gloss.to_string(),
            segments,
        };

        debug_assert!(entry.is_consistent(), "inconsistent entry for {:?}", word);
        Ok(entry)
    }

    /// Build an entry, taking the gloss from a provider
    pub fn build_with(&self, word: &str, provider: &dyn GlossProvider) -> Result<WordEntry> {
        let gloss = provider
            .gloss(word)
            .unwrap_or_else(|| DEFAULT_GLOSS.to_string());
        self.build(word, &gloss)
    }

    /// Build many entries in parallel, one word per task.
    ///
    /// Results are in input order; a failing item does not affect the others.
    pub fn build_batch<W, G>(&self, pairs: &[(W, G)]) -> Vec<Result<WordEntry>>
    where
        W: AsRef<str> + Sync,
        G: AsRef<str> + Sync,
    {
        let _span = tracing::debug_span!("build_batch", words = pairs.len()).entered();
        pairs
            .par_iter()
            .map(|(word, gloss)| self.build(word.as_ref(), gloss.as_ref()))
            .collect()
    }
}
