//! # akshara-rs
//!
//! Kannada akshara segmentation and romanization for building
//! language-learning dictionaries.
//!
//! Text is split into orthographic syllables (aksharas) by a single greedy
//! longest-match pass over a lookup table of codepoint windows. Each unit
//! carries its source span and a deterministic Latin romanization; the
//! romanization of a word is the concatenation of its units.
//!
//! ## Quick Start
//!
//! ```rust
//! use akshara_rs::Romanizer;
//!
//! let romanizer = Romanizer::new();
//! assert_eq!(romanizer.romanize("ನಮಸ್ಕಾರ"), "namaskara");
//!
//! for unit in romanizer.segments_of("ಜಗತ್ತು") {
//!     println!("{} [{}, {}) -> {}", unit.text, unit.start, unit.end, unit.roman);
//! }
//! ```
//!
//! ## Dictionary Entries
//!
//! ```rust
//! use akshara_rs::{DictionaryEntryBuilder, JsonSink, EntrySink};
//!
//! let builder = DictionaryEntryBuilder::new();
//! let entry = builder.build("ಮಗು", "child").unwrap();
//! assert_eq!(entry.romanized, "magu");
//!
//! let mut sink = JsonSink::new(Vec::new());
//! sink.write_entry(&entry).unwrap();
//! sink.finish().unwrap();
//! ```

pub mod char_categories;
pub mod config;
pub mod entry;
pub mod error;
pub mod gloss;
pub mod lookup;
pub mod romanizer;
pub mod segmenter;
pub mod sink;

// Re-export main types for convenience
pub use char_categories::{classify, kannada_words, CharInfo, KnString, Place, Role};
pub use config::RomanizerConfig;
pub use entry::{DictionaryEntryBuilder, WordEntry, DEFAULT_GLOSS};
pub use error::{Error, Result};
pub use gloss::{GlossList, GlossProvider};
pub use lookup::{LookupTable, LookupTableBuilder, OverrideKind, TableError, TableWarning};
pub use romanizer::{romanize, romanize_segments, segments_of, Romanizer};
pub use segmenter::{Akshara, AksharaCategory, AksharaSegmenter, AnusvaraRule};
pub use sink::{AppEntry, EntrySink, JsonSink};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let text = "ಕನ್ನಡ ಒಂದು ಭಾಷೆ";
        let words = kannada_words(text);
        assert_eq!(words.len(), 3);

        let builder = DictionaryEntryBuilder::new();
        let entries: Vec<WordEntry> = words
            .iter()
            .map(|w| builder.build(w, DEFAULT_GLOSS).unwrap())
            .collect();

        assert_eq!(entries[0].romanized, "kannada");
        assert_eq!(entries[1].romanized, "omdu");
        assert_eq!(entries[2].romanized, "bhaashe");
        assert!(entries.iter().all(WordEntry::is_consistent));
    }

    #[test]
    fn test_whole_sentence_passthrough() {
        let romanized = romanize("ಕನ್ನಡ ಒಂದು ಭಾಷೆ.");
        assert_eq!(romanized, "kannada omdu bhaashe.");
    }
}
