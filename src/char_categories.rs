//! Codepoint classification for Kannada Unicode characters.
//!
//! Every scalar value in the Kannada block (U+0C80..U+0CFF) maps to exactly one
//! [`Role`] through an embedded table; anything outside the block is
//! [`Role::Other`] and is passed through untouched by the later stages.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Script role of a single codepoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Independent vowel (ಅ, ಆ, ...)
    IndependentVowel,
    /// Consonant letter carrying an inherent vowel
    Consonant,
    /// Dependent vowel sign (matra)
    VowelSign,
    /// Virama (halant), suppresses the inherent vowel
    Virama,
    /// Anusvara or candrabindu
    Anusvara,
    /// Visarga
    Visarga,
    /// Nukta
    Nukta,
    /// Digits, punctuation, Latin, unassigned codepoints
    #[default]
    Other,
}

impl Role {
    /// Parse a role string from the CSV file
    fn from_str(s: &str) -> Self {
        match s.trim() {
            "VOWEL" => Role::IndependentVowel,
            "CONS" => Role::Consonant,
            "VOWEL_SIGN" => Role::VowelSign,
            "VIRAMA" => Role::Virama,
            "ANUSVARA" => Role::Anusvara,
            "VISARGA" => Role::Visarga,
            "NUKTA" => Role::Nukta,
            _ => Role::Other,
        }
    }

    /// Diacritics that attach to a preceding letter
    pub fn is_mark(&self) -> bool {
        matches!(
            self,
            Role::VowelSign | Role::Virama | Role::Anusvara | Role::Visarga | Role::Nukta
        )
    }
}

/// Place of articulation of a consonant.
///
/// Only used to pick a homorganic nasal for the anusvara.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Place {
    Velar,
    Palatal,
    Retroflex,
    Dental,
    Labial,
    Other,
}

impl Place {
    fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "VELAR" => Some(Place::Velar),
            "PALATAL" => Some(Place::Palatal),
            "RETROFLEX" => Some(Place::Retroflex),
            "DENTAL" => Some(Place::Dental),
            "LABIAL" => Some(Place::Labial),
            "OTHER" => Some(Place::Other),
            _ => None,
        }
    }
}

/// Everything the table knows about one Kannada codepoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharInfo {
    /// Script role
    pub role: Role,
    /// Romanization. Consonants carry their vowelless base ("k" for ಕ).
    /// Empty when the codepoint has no romanization of its own.
    pub roman: &'static str,
    /// Place of articulation (consonants only)
    pub place: Option<Place>,
}

/// First and last codepoints of the Kannada block
pub const KANNADA_BLOCK: (char, char) = ('\u{0C80}', '\u{0CFF}');

/// Embedded character table
static KN_UNI_TABLE: &str = include_str!("data/kn_uni_table.csv");

/// Lazily initialized map from character to its table row
static CHAR_MAP: Lazy<HashMap<char, CharInfo>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Header: code,name,role,roman,place
    for line in KN_UNI_TABLE.lines().skip(1) {
        let parts: Vec<&'static str> = line.split(',').collect();
        if parts.len() < 5 {
            continue;
        }
        let Ok(code_point) = u32::from_str_radix(parts[0].trim(), 16) else {
            continue;
        };
        if let Some(c) = char::from_u32(code_point) {
            map.insert(
                c,
                CharInfo {
                    role: Role::from_str(parts[2]),
                    roman: parts[3].trim(),
                    place: Place::from_str(parts[4]),
                },
            );
        }
    }

    map
});

static KANNADA_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{0C80}-\u{0CFF}]+").expect("Invalid regex"));

/// Check if a character lies in the Kannada block
pub fn is_kannada(c: char) -> bool {
    (KANNADA_BLOCK.0..=KANNADA_BLOCK.1).contains(&c)
}

/// Check if text contains at least one Kannada character
pub fn contains_kannada(text: &str) -> bool {
    text.chars().any(is_kannada)
}

/// Table row for a character, if it is an assigned Kannada codepoint
pub fn char_info(c: char) -> Option<&'static CharInfo> {
    if !is_kannada(c) {
        return None;
    }
    CHAR_MAP.get(&c)
}

/// Classify a character. Total: anything unknown is [`Role::Other`].
pub fn classify(c: char) -> Role {
    char_info(c).map(|info| info.role).unwrap_or_default()
}

/// All assigned Kannada codepoints with their table rows, in codepoint order
pub fn inventory() -> Vec<(char, &'static CharInfo)> {
    let mut all: Vec<(char, &'static CharInfo)> = CHAR_MAP.iter().map(|(c, i)| (*c, i)).collect();
    all.sort_by_key(|(c, _)| *c);
    all
}

/// Extract maximal runs of Kannada characters from free text.
///
/// Used to harvest candidate words from prose before building entries.
pub fn kannada_words(text: &str) -> Vec<&str> {
    KANNADA_RUN.find_iter(text).map(|m| m.as_str()).collect()
}

/// A string with a role and byte offset for each character
#[derive(Debug, Clone)]
pub struct KnString {
    /// The original string
    pub string: String,
    /// Role for each character (by char index)
    pub roles: Vec<Role>,
    /// Byte offset of each character, plus one trailing entry for the end
    offsets: Vec<usize>,
}

impl KnString {
    /// Create a new KnString from a string
    pub fn new(s: &str) -> Self {
        let mut roles = Vec::with_capacity(s.len() / 3);
        let mut offsets = Vec::with_capacity(s.len() / 3 + 1);
        for (i, c) in s.char_indices() {
            roles.push(classify(c));
            offsets.push(i);
        }
        offsets.push(s.len());

        KnString {
            string: s.to_string(),
            roles,
            offsets,
        }
    }

    /// Get the length (number of characters)
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Get the role at a specific char index
    pub fn role(&self, idx: usize) -> Option<Role> {
        self.roles.get(idx).copied()
    }

    /// Get the character at a specific char index
    pub fn char_at(&self, idx: usize) -> Option<char> {
        let start = *self.offsets.get(idx)?;
        self.string[start..].chars().next()
    }

    /// Substring covering `len` characters from char index `start`.
    ///
    /// Returns None if the window runs past the end.
    pub fn window(&self, start: usize, len: usize) -> Option<&str> {
        let end = start.checked_add(len)?;
        if end > self.len() {
            return None;
        }
        Some(&self.string[self.offsets[start]..self.offsets[end]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kannada_consonants() {
        assert_eq!(classify('ಕ'), Role::Consonant);
        assert_eq!(classify('ಸ'), Role::Consonant);
        assert_eq!(classify('ಳ'), Role::Consonant);
        assert_eq!(char_info('ಕ').unwrap().roman, "k");
        assert_eq!(char_info('ಮ').unwrap().place, Some(Place::Labial));
    }

    #[test]
    fn test_kannada_vowels() {
        assert_eq!(classify('ಅ'), Role::IndependentVowel);
        assert_eq!(classify('ಔ'), Role::IndependentVowel);
        assert_eq!(char_info('ಆ').unwrap().roman, "aa");
    }

    #[test]
    fn test_signs_and_marks() {
        assert_eq!(classify('ಾ'), Role::VowelSign);
        assert_eq!(classify('ು'), Role::VowelSign);
        assert_eq!(classify('್'), Role::Virama);
        assert_eq!(classify('ಂ'), Role::Anusvara);
        assert_eq!(classify('ಃ'), Role::Visarga);
        assert_eq!(classify('಼'), Role::Nukta);
        assert!(Role::Virama.is_mark());
        assert!(!Role::Consonant.is_mark());
    }

    #[test]
    fn test_outside_block_is_other() {
        assert_eq!(classify(' '), Role::Other);
        assert_eq!(classify('a'), Role::Other);
        assert_eq!(classify('क'), Role::Other); // Devanagari
        assert!(char_info('a').is_none());
    }

    #[test]
    fn test_kannada_digits() {
        assert_eq!(classify('೩'), Role::Other);
        assert_eq!(char_info('೩').unwrap().roman, "3");
    }

    #[test]
    fn test_unassigned_in_block() {
        // U+0C8D is unassigned
        assert_eq!(classify('\u{0C8D}'), Role::Other);
        assert!(is_kannada('\u{0C8D}'));
    }

    #[test]
    fn test_kannada_words() {
        let words = kannada_words("ಕನ್ನಡ is spoken, ನಮಸ್ಕಾರ! 42");
        assert_eq!(words, vec!["ಕನ್ನಡ", "ನಮಸ್ಕಾರ"]);
        assert!(contains_kannada("abc ಕ"));
        assert!(!contains_kannada("abc"));
    }

    #[test]
    fn test_kn_string() {
        let ks = KnString::new("ಸ್ಕಾ");
        assert_eq!(ks.len(), 4);
        assert_eq!(ks.role(0), Some(Role::Consonant));
        assert_eq!(ks.role(1), Some(Role::Virama));
        assert_eq!(ks.role(2), Some(Role::Consonant));
        assert_eq!(ks.role(3), Some(Role::VowelSign));
        assert_eq!(ks.window(1, 2), Some("್ಕ"));
        assert_eq!(ks.window(2, 3), None);
        assert_eq!(ks.char_at(2), Some('ಕ'));
    }
}
