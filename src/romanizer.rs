//! Whole-word romanization and per-akshara segmentation.
//!
//! [`Romanizer::romanize`] is a fold over [`Romanizer::segments_of`], so the
//! romanized word is always the concatenation of its units.

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

use crate::config::RomanizerConfig;
use crate::error::Result;
use crate::lookup::{LookupTable, LookupTableBuilder};
use crate::segmenter::{Akshara, AksharaSegmenter, AnusvaraRule};

static DEFAULT_ROMANIZER: Lazy<Romanizer> = Lazy::new(Romanizer::new);

/// Romanize with the default table and rules
pub fn romanize(text: &str) -> String {
    DEFAULT_ROMANIZER.romanize(text)
}

/// Segment with the default table and rules
pub fn segments_of(text: &str) -> Vec<Akshara> {
    DEFAULT_ROMANIZER.segments_of(text)
}

/// Concatenate unit romanizations in order
pub fn romanize_segments(units: &[Akshara]) -> String {
    units.iter().fold(String::new(), |mut acc, unit| {
        acc.push_str(&unit.roman);
        acc
    })
}

/// Romanizer facade over a shared lookup table
#[derive(Debug, Clone)]
pub struct Romanizer {
    /// The lookup table (shared reference)
    table: Arc<LookupTable>,
    anusvara: AnusvaraRule,
    normalize: bool,
}

impl Default for Romanizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Romanizer {
    /// Create a romanizer over the default table
    pub fn new() -> Self {
        Self::with_arc(LookupTable::shared_default())
    }

    /// Create a romanizer owning the given table
    pub fn with_table(table: LookupTable) -> Self {
        Self::with_arc(Arc::new(table))
    }

    /// Create a romanizer with a shared table reference
    pub fn with_arc(table: Arc<LookupTable>) -> Self {
        Romanizer {
            table,
            anusvara: AnusvaraRule::Fixed,
            normalize: false,
        }
    }

    /// Create a romanizer from configuration.
    ///
    /// Config overrides are layered above the default overrides, so a new
    /// table is only built when there are any.
    pub fn from_config(config: &RomanizerConfig) -> Result<Self> {
        let table = if config.overrides.is_empty() {
            LookupTable::shared_default()
        } else {
            let mut builder = LookupTableBuilder::with_defaults()?;
            builder.push_layer();
            for (form, roman) in &config.overrides {
                builder.add_exact(form, roman)?;
            }
            Arc::new(builder.build()?)
        };

        Ok(Self::with_arc(table)
            .with_anusvara_rule(config.anusvara)
            .with_normalization(config.normalize))
    }

    /// Use a different anusvara rule
    pub fn with_anusvara_rule(mut self, rule: AnusvaraRule) -> Self {
        self.anusvara = rule;
        self
    }

    /// NFC-normalize input before segmenting.
    ///
    /// Spans then index the normalized text.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Get a reference to the table
    pub fn table(&self) -> &LookupTable {
        &self.table
    }

    /// Get the Arc reference to the table (for sharing)
    pub fn table_arc(&self) -> Arc<LookupTable> {
        Arc::clone(&self.table)
    }

    /// The text that spans refer to: the input, or its NFC form
    pub fn prepare<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.normalize {
            Cow::Owned(text.nfc().collect())
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Segment text into aksharas
    pub fn segments_of(&self, text: &str) -> Vec<Akshara> {
        let prepared = self.prepare(text);
        AksharaSegmenter::new(&self.table)
            .with_anusvara_rule(self.anusvara)
            .segment(&prepared)
    }

    /// Romanize text
    pub fn romanize(&self, text: &str) -> String {
        romanize_segments(&self.segments_of(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::is_exact_cover;

    #[test]
    fn test_romanize_words() {
        let r = Romanizer::new();
        assert_eq!(r.romanize("ನಮಸ್ಕಾರ"), "namaskara");
        assert_eq!(r.romanize("ಕನ್ನಡ"), "kannada");
        assert_eq!(r.romanize("ಜಗತ್ತು"), "jagattu");
        assert_eq!(r.romanize("ಪ್ರಸ್ತುತ"), "prastuta");
        assert_eq!(r.romanize("ಗುಡುಗು"), "gudugu");
        assert_eq!(r.romanize("ವಿಜ್ಞಾನ"), "vijnaana");
    }

    #[test]
    fn test_romanize_is_fold_of_segments() {
        let r = Romanizer::new();
        for word in ["ಸಂಸ್ಕೃತಿ", "ಇಂಟರ್ನೆಟ್", "ಅಧ್ಯಕ್ಷ", "abc ಕ!"] {
            let units = r.segments_of(word);
            assert_eq!(romanize_segments(&units), r.romanize(word));
            assert!(is_exact_cover(&units, word.chars().count()));
        }
    }

    #[test]
    fn test_module_functions() {
        assert_eq!(romanize("ಕ"), "ka");
        assert_eq!(segments_of("ಕಾ").len(), 1);
    }

    #[test]
    fn test_normalization() {
        // ೆ + ೂ composes to ೊ under NFC
        let decomposed = "ಕ\u{0CC6}\u{0CC2}";
        let plain = Romanizer::new();
        let normalizing = Romanizer::new().with_normalization(true);

        assert_eq!(normalizing.romanize(decomposed), "ko");
        assert_eq!(plain.romanize(decomposed), "ko");
        // spans index the text that was segmented
        assert_eq!(normalizing.segments_of(decomposed)[0].end, 2);
        assert_eq!(plain.segments_of(decomposed)[0].end, 3);
    }

    #[test]
    fn test_from_config_overrides() {
        let config = RomanizerConfig::from_toml_str(
            "anusvara = \"homorganic\"\n[overrides]\n\"ಜ್ಞಾ\" = \"gnyaa\"\n",
        )
        .unwrap();
        let r = Romanizer::from_config(&config).unwrap();
        assert_eq!(r.romanize("ವಿಜ್ಞಾನ"), "vignyaana");
        assert_eq!(r.romanize("ಮಂಗಳ"), "mangala");
        // default overrides are still in place
        assert_eq!(r.romanize("ನಮಸ್ಕಾರ"), "namaskara");
    }

    #[test]
    fn test_from_config_rejects_bad_override() {
        let mut config = RomanizerConfig::default();
        config.overrides.insert("abc".to_string(), "x".to_string());
        assert!(Romanizer::from_config(&config).is_err());
    }

    #[test]
    fn test_arc_sharing() {
        let r1 = Romanizer::new();
        let r2 = Romanizer::with_arc(r1.table_arc());
        assert!(Arc::ptr_eq(&r1.table_arc(), &r2.table_arc()));
        assert_eq!(r1.romanize("ಮಗು"), r2.romanize("ಮಗು"));
    }
}
