//! Akshara segmentation.
//!
//! A single left-to-right pass over the text: at each cursor position the
//! [`LookupTable`] supplies the longest matching window, which becomes one
//! [`Akshara`]. Committed windows are never revisited, and characters the
//! table does not know become their own [`AksharaCategory::Other`] unit with
//! the character itself as romanization.

use serde::{Deserialize, Serialize};

use crate::char_categories::{char_info, KnString, Place, Role};
use crate::lookup::LookupTable;

/// Kind of orthographic unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AksharaCategory {
    /// Independent vowel
    IndependentVowel,
    /// Bare consonant with its inherent "a"
    ConsonantInherentA,
    /// Consonant whose inherent vowel is replaced by a vowel sign
    ConsonantWithVowelSign,
    /// Conjunct or geminate of N consonants, with or without a vowel sign
    ConsonantCluster(usize),
    /// Consonant + virama with no following vowel
    KilledConsonant,
    /// Anusvara, visarga, nukta, or a diacritic with no host
    Modifier,
    /// Anything else, passed through
    #[default]
    Other,
}

impl AksharaCategory {
    /// Category of a window from the roles of its codepoints.
    ///
    /// A nukta only modifies the consonant before it and is ignored here.
    pub fn from_roles(roles: &[Role]) -> Self {
        let core: Vec<Role> = roles.iter().copied().filter(|r| *r != Role::Nukta).collect();
        if core.is_empty() {
            return if roles.is_empty() {
                AksharaCategory::Other
            } else {
                AksharaCategory::Modifier
            };
        }

        let consonants = core.iter().filter(|r| **r == Role::Consonant).count();
        if consonants >= 2 {
            return AksharaCategory::ConsonantCluster(consonants);
        }

        match core.as_slice() {
            [Role::IndependentVowel] => AksharaCategory::IndependentVowel,
            [Role::Consonant] => AksharaCategory::ConsonantInherentA,
            [Role::Consonant, Role::Virama] => AksharaCategory::KilledConsonant,
            [Role::Consonant, signs @ ..] if signs.iter().all(|r| *r == Role::VowelSign) => {
                AksharaCategory::ConsonantWithVowelSign
            }
            [r] if r.is_mark() => AksharaCategory::Modifier,
            _ => AksharaCategory::Other,
        }
    }

    /// Convert to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AksharaCategory::IndependentVowel => "VOWEL",
            AksharaCategory::ConsonantInherentA => "CONS",
            AksharaCategory::ConsonantWithVowelSign => "CONS_VOWEL",
            AksharaCategory::ConsonantCluster(_) => "CLUSTER",
            AksharaCategory::KilledConsonant => "KILLED",
            AksharaCategory::Modifier => "MODIFIER",
            AksharaCategory::Other => "OTHER",
        }
    }
}

/// One segmented unit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Akshara {
    /// Source text of the unit
    pub text: String,
    /// First char index (inclusive)
    pub start: usize,
    /// Last char index (exclusive)
    pub end: usize,
    /// Kind of unit
    pub category: AksharaCategory,
    /// Latin romanization
    pub roman: String,
}

impl Akshara {
    /// Number of codepoints covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Units always cover at least one codepoint
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl std::fmt::Display for Akshara {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.text, self.roman)
    }
}

/// How the anusvara is romanized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnusvaraRule {
    /// Always the table romanization ("m")
    #[default]
    Fixed,
    /// Nasal of the following consonant's place: "m" before labials, "n"
    /// before other stops, the table romanization elsewhere
    Homorganic,
}

impl AnusvaraRule {
    /// Romanization for an anusvara followed by `next`
    pub fn resolve(&self, table_roman: &str, next: Option<char>) -> String {
        match self {
            AnusvaraRule::Fixed => table_roman.to_string(),
            AnusvaraRule::Homorganic => {
                let place = next.and_then(char_info).and_then(|info| info.place);
                match place {
                    Some(Place::Labial) => "m".to_string(),
                    Some(Place::Velar | Place::Palatal | Place::Retroflex | Place::Dental) => {
                        "n".to_string()
                    }
                    _ => table_roman.to_string(),
                }
            }
        }
    }
}

/// Greedy longest-match segmenter over a lookup table
#[derive(Debug, Clone, Copy)]
pub struct AksharaSegmenter<'a> {
    table: &'a LookupTable,
    anusvara: AnusvaraRule,
}

impl<'a> AksharaSegmenter<'a> {
    /// Create a segmenter with the fixed anusvara rule
    pub fn new(table: &'a LookupTable) -> Self {
        AksharaSegmenter {
            table,
            anusvara: AnusvaraRule::Fixed,
        }
    }

    /// Use a different anusvara rule
    pub fn with_anusvara_rule(mut self, rule: AnusvaraRule) -> Self {
        self.anusvara = rule;
        self
    }

    /// Segment text into aksharas. Never fails; the units cover the text exactly.
    pub fn segment(&self, text: &str) -> Vec<Akshara> {
        let ks = KnString::new(text);
        let mut units = Vec::with_capacity(ks.len());
        let mut cursor = 0;

        while cursor < ks.len() {
            let (len, category, roman) = match self.table.longest_match(&ks, cursor) {
                Some((len, entry)) => {
                    let roman = if entry.anusvara {
                        self.anusvara.resolve(&entry.roman, ks.char_at(cursor + len))
                    } else {
                        entry.roman.clone()
                    };
                    (len, entry.category, roman)
                }
                None => {
                    let passthrough = ks.window(cursor, 1).unwrap_or_default().to_string();
                    (1, AksharaCategory::Other, passthrough)
                }
            };

            units.push(Akshara {
                text: ks.window(cursor, len).unwrap_or_default().to_string(),
                start: cursor,
                end: cursor + len,
                category,
                roman,
            });
            cursor += len;
        }

        units
    }
}

/// Check that units are contiguous, non-empty, in order, and cover `[0, len)`
pub fn is_exact_cover(units: &[Akshara], len: usize) -> bool {
    let mut expected = 0;
    for unit in units {
        if unit.start != expected || unit.end <= unit.start {
            return false;
        }
        expected = unit.end;
    }
    expected == len
}
