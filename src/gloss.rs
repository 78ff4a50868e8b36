//! Gloss providers.
//!
//! Glosses come from outside the core; this module only defines the seam and
//! a TSV-backed word list for offline use.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Longest gloss kept by [`clean_gloss`], in characters
pub const MAX_GLOSS_CHARS: usize = 100;

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("Invalid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Source of English glosses for Kannada words
pub trait GlossProvider {
    /// Gloss for `word`, if known
    fn gloss(&self, word: &str) -> Option<String>;
}

impl GlossProvider for HashMap<String, String> {
    fn gloss(&self, word: &str) -> Option<String> {
        self.get(word).cloned()
    }
}

/// Tidy a scraped gloss: drop bracketed references, collapse whitespace,
/// cap the length
pub fn clean_gloss(raw: &str) -> String {
    let without_refs = BRACKETED.replace_all(raw, "");
    let collapsed = WHITESPACE.replace_all(&without_refs, " ");
    collapsed.trim().chars().take(MAX_GLOSS_CHARS).collect::<String>().trim_end().to_string()
}

/// Ordered word list with glosses
#[derive(Debug, Clone, Default)]
pub struct GlossList {
    entries: Vec<(String, String)>,
    /// First position of each word
    index: HashMap<String, usize>,
}

impl GlossList {
    /// Create an empty list
    pub fn new() -> Self {
        GlossList::default()
    }

    /// Read a `word<TAB>gloss` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut list = GlossList::new();
        list.load_tsv(&content);
        Ok(list)
    }

    /// Load words from a TSV string (format: word\tgloss)
    ///
    /// Comment and blank lines are skipped; a missing gloss column gives an
    /// empty gloss.
    pub fn load_tsv(&mut self, tsv_content: &str) {
        for line in tsv_content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.splitn(2, '\t');
            let word = parts.next().unwrap_or_default().trim();
            if word.is_empty() {
                continue;
            }
            let gloss = parts.next().map(clean_gloss).unwrap_or_default();
            self.insert(word, &gloss);
        }
    }

    /// Append a word; later duplicates are kept but lookups see the first
    pub fn insert(&mut self, word: &str, gloss: &str) {
        self.index
            .entry(word.to_string())
            .or_insert(self.entries.len());
        self.entries.push((word.to_string(), gloss.to_string()));
    }

    /// Number of lines loaded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in load order
    pub fn pairs(&self) -> &[(String, String)] {
        &self.entries
    }
}

impl GlossProvider for GlossList {
    fn gloss(&self, word: &str) -> Option<String> {
        self.index.get(word).map(|&i| self.entries[i].1.clone())
    }
}
