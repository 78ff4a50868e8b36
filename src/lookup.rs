//! Window lookup table for greedy longest-match segmentation.
//!
//! The table maps windows of 1 to [`MAX_WINDOW`] codepoints to a romanization
//! and an akshara category. It is generated once from the codepoint inventory
//! (vowels, consonants, signs, every two-consonant conjunct) and then layered
//! with overrides for clusters whose spoken form is not the concatenation of
//! their parts.
//!
//! Matching is driven entirely by the table contents: adding a pattern means
//! adding an entry, never touching the segmenter.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

use crate::char_categories::{classify, inventory, CharInfo, KnString, Role};
use crate::segmenter::AksharaCategory;

/// Longest window the table can hold, in codepoints
pub const MAX_WINDOW: usize = 4;

/// Inherent vowel appended to a bare consonant
pub const INHERENT_VOWEL: &str = "a";

const VIRAMA: char = '\u{0CCD}';
const NUKTA: char = '\u{0CBC}';

/// Canonically decomposed vowel signs and the precomposed sign they stand for
const SPLIT_SIGNS: [(&str, char); 6] = [
    ("\u{0CBF}\u{0CD5}", '\u{0CC0}'),
    ("\u{0CC6}\u{0CD5}", '\u{0CC7}'),
    ("\u{0CC6}\u{0CD6}", '\u{0CC8}'),
    ("\u{0CC6}\u{0CC2}", '\u{0CCA}'),
    ("\u{0CCA}\u{0CD5}", '\u{0CCB}'),
    ("\u{0CC6}\u{0CC2}\u{0CD5}", '\u{0CCB}'),
];

/// Embedded override definitions
static DEFAULT_OVERRIDES: &str = include_str!("data/overrides.tsv");

/// Process-wide default table, built on first use
static DEFAULT_TABLE: Lazy<Arc<LookupTable>> = Lazy::new(|| {
    let builder = LookupTableBuilder::with_defaults().expect("Invalid embedded tables");
    Arc::new(builder.build().expect("Invalid embedded lookup table"))
});

/// A single table hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Romanization of the whole window
    pub roman: String,
    /// Category of the akshara this window forms
    pub category: AksharaCategory,
    /// Whether this window is a lone anusvara (its romanization may depend on context)
    pub anusvara: bool,
}

impl Entry {
    fn for_window(window: &str, roman: String) -> Self {
        let roles: Vec<Role> = window.chars().map(classify).collect();
        Entry {
            roman,
            category: AksharaCategory::from_roles(&roles),
            anusvara: roles == [Role::Anusvara],
        }
    }
}

/// Errors raised while building a table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Two entries of the same layer claim one window with different romanizations
    #[error("conflicting romanizations for {window:?}: {first:?} vs {second:?}")]
    Collision {
        window: String,
        first: String,
        second: String,
    },
    /// The window cannot be a table key
    #[error("invalid window {window:?}: {reason}")]
    InvalidWindow { window: String, reason: String },
    /// A definition line could not be parsed
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Non-fatal findings from table construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableWarning {
    /// An override that gives the same result as the general rules beneath it
    Redundant { window: String, roman: String },
}

/// Kind of an override line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideKind {
    /// Consonant + virama + consonant with a non-compositional base
    Cluster,
    /// Consonant + nukta, behaving as a consonant of its own
    Nukta,
    /// Literal window
    Exact,
}

impl OverrideKind {
    fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "cluster" => Some(OverrideKind::Cluster),
            "nukta" => Some(OverrideKind::Nukta),
            "exact" => Some(OverrideKind::Exact),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Override {
    form: String,
    kind: OverrideKind,
    roman: String,
    layer: usize,
}

type Layer = [HashMap<String, Entry>; MAX_WINDOW];

/// Immutable window table
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    /// Entries indexed by window length - 1
    windows: Layer,
    warnings: Vec<TableWarning>,
}

impl LookupTable {
    /// The shared default table
    pub fn shared_default() -> Arc<LookupTable> {
        Arc::clone(&DEFAULT_TABLE)
    }

    /// Look up an exact window
    pub fn get(&self, window: &str) -> Option<&Entry> {
        let len = window.chars().count();
        if len == 0 || len > MAX_WINDOW {
            return None;
        }
        self.windows[len - 1].get(window)
    }

    /// Longest window starting at char index `start` that has an entry.
    ///
    /// Tries lengths from [`MAX_WINDOW`] down to 1; the first hit wins.
    pub fn longest_match(&self, text: &KnString, start: usize) -> Option<(usize, &Entry)> {
        (1..=MAX_WINDOW).rev().find_map(|len| {
            let window = text.window(start, len)?;
            self.windows[len - 1].get(window).map(|entry| (len, entry))
        })
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.windows.iter().map(HashMap::len).sum()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries of one window length
    pub fn len_of(&self, window_len: usize) -> usize {
        match window_len {
            1..=MAX_WINDOW => self.windows[window_len - 1].len(),
            _ => 0,
        }
    }

    /// Findings recorded while building
    pub fn warnings(&self) -> &[TableWarning] {
        &self.warnings
    }
}

/// Builder for [`LookupTable`]
#[derive(Debug, Default)]
pub struct LookupTableBuilder {
    generated: OverrideLayer,
    overrides: Vec<Override>,
    layer: usize,
}

impl LookupTableBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        LookupTableBuilder::default()
    }

    /// Create a builder pre-filled with the compositional entries of the
    /// whole Kannada inventory
    pub fn with_inventory() -> Result<Self, TableError> {
        let mut builder = LookupTableBuilder::new();
        builder.load_inventory()?;
        Ok(builder)
    }

    /// Inventory plus the embedded overrides; further overrides usually go
    /// on a new layer (see [`push_layer`](Self::push_layer))
    pub fn with_defaults() -> Result<Self, TableError> {
        let mut builder = LookupTableBuilder::with_inventory()?;
        builder.load_overrides_tsv(DEFAULT_OVERRIDES)?;
        Ok(builder)
    }

    /// Generate compositional entries from the codepoint table.
    ///
    /// Every consonant also gets the forms of its nukta variant, romanized
    /// like the plain consonant unless an override says otherwise.
    pub fn load_inventory(&mut self) -> Result<(), TableError> {
        let chars = inventory();
        let consonants: Vec<(char, &CharInfo)> = chars
            .iter()
            .filter(|(_, info)| info.role == Role::Consonant)
            .map(|(c, info)| (*c, *info))
            .collect();
        let signs: Vec<(char, &CharInfo)> = chars
            .iter()
            .filter(|(_, info)| info.role == Role::VowelSign && !info.roman.is_empty())
            .map(|(c, info)| (*c, *info))
            .collect();

        for (c, info) in &chars {
            match info.role {
                Role::Consonant => {
                    self.add_forms(consonant_forms(&c.to_string(), info.roman, &signs))?;
                    let with_nukta = format!("{}{}", c, NUKTA);
                    self.add_forms(consonant_forms(&with_nukta, info.roman, &signs))?;
                }
                Role::IndependentVowel
                | Role::VowelSign
                | Role::Virama
                | Role::Anusvara
                | Role::Visarga
                | Role::Nukta => self.generated.put(c.to_string(), info.roman.to_string())?,
                Role::Other if !info.roman.is_empty() => {
                    self.generated.put(c.to_string(), info.roman.to_string())?
                }
                Role::Other => {}
            }
        }

        for (c1, first) in &consonants {
            for (c2, second) in &consonants {
                let cluster = format!("{}{}{}", c1, VIRAMA, c2);
                let base = format!("{}{}", first.roman, second.roman);
                self.add_forms(cluster_forms(&cluster, &base, &signs))?;
            }
        }
        Ok(())
    }

    /// Load override lines (`form<TAB>kind<TAB>roman`)
    pub fn load_overrides_tsv(&mut self, tsv_content: &str) -> Result<(), TableError> {
        for (idx, line) in tsv_content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() < 3 {
                return Err(TableError::Malformed {
                    line: idx + 1,
                    reason: "expected form, kind and roman".to_string(),
                });
            }
            let kind = OverrideKind::from_str(parts[1]).ok_or_else(|| TableError::Malformed {
                line: idx + 1,
                reason: format!("unknown kind {:?}", parts[1]),
            })?;

            self.add_override(parts[0].trim(), kind, parts[2].trim())?;
        }
        Ok(())
    }

    /// Add a literal window
    pub fn add_exact(&mut self, form: &str, roman: &str) -> Result<(), TableError> {
        self.add_override(form, OverrideKind::Exact, roman)
    }

    /// Add an override of any kind
    pub fn add_override(
        &mut self,
        form: &str,
        kind: OverrideKind,
        roman: &str,
    ) -> Result<(), TableError> {
        validate_form(form, kind)?;
        self.overrides.push(Override {
            form: form.to_string(),
            kind,
            roman: roman.to_string(),
            layer: self.layer,
        });
        Ok(())
    }

    /// Start a new override layer.
    ///
    /// Entries of a later layer replace those of earlier ones; within one
    /// layer, conflicting entries are a [`TableError::Collision`].
    pub fn push_layer(&mut self) {
        if self.overrides.iter().any(|ov| ov.layer == self.layer) {
            self.layer += 1;
        }
    }

    /// Validate and freeze the table
    pub fn build(self) -> Result<LookupTable, TableError> {
        let signs: Vec<(char, &CharInfo)> = inventory()
            .into_iter()
            .filter(|(_, info)| info.role == Role::VowelSign && !info.roman.is_empty())
            .collect();

        let mut windows = Layer::default();
        let mut warnings = Vec::new();

        for (window, roman) in self.generated.entries {
            let len = window.chars().count();
            let entry = Entry::for_window(&window, roman);
            windows[len - 1].insert(window, entry);
        }

        for layer_idx in 0..=self.layer {
            let mut layer = OverrideLayer::default();

            for ov in self.overrides.iter().filter(|ov| ov.layer == layer_idx) {
                let (headline, expanded) = match ov.kind {
                    OverrideKind::Cluster => (
                        format!("{}{}", ov.roman, INHERENT_VOWEL),
                        cluster_forms(&ov.form, &ov.roman, &signs),
                    ),
                    OverrideKind::Nukta => (
                        format!("{}{}", ov.roman, INHERENT_VOWEL),
                        consonant_forms(&ov.form, &ov.roman, &signs),
                    ),
                    OverrideKind::Exact => {
                        (ov.roman.clone(), vec![(ov.form.clone(), ov.roman.clone())])
                    }
                };

                if compose(&windows, &ov.form) == headline {
                    tracing::warn!(window = %ov.form, roman = %headline, "redundant override");
                    warnings.push(TableWarning::Redundant {
                        window: ov.form.clone(),
                        roman: headline,
                    });
                }

                for (window, roman) in expanded {
                    layer.put(window, roman)?;
                }
            }

            for (window, roman) in layer.entries {
                let len = window.chars().count();
                let entry = Entry::for_window(&window, roman);
                windows[len - 1].insert(window, entry);
            }
        }

        let table = LookupTable { windows, warnings };
        tracing::debug!(
            len1 = table.len_of(1),
            len2 = table.len_of(2),
            len3 = table.len_of(3),
            len4 = table.len_of(4),
            overrides = self.overrides.len(),
            "built lookup table"
        );
        Ok(table)
    }

    fn add_forms(&mut self, forms: Vec<(String, String)>) -> Result<(), TableError> {
        for (window, roman) in forms {
            self.generated.put(window, roman)?;
        }
        Ok(())
    }
}

/// Entries collected before merging; duplicates must agree
#[derive(Debug, Default)]
struct OverrideLayer {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl OverrideLayer {
    fn put(&mut self, window: String, roman: String) -> Result<(), TableError> {
        if let Some(&i) = self.index.get(&window) {
            let existing = &self.entries[i].1;
            if *existing != roman {
                return Err(TableError::Collision {
                    window,
                    first: existing.clone(),
                    second: roman,
                });
            }
            return Ok(());
        }
        self.index.insert(window.clone(), self.entries.len());
        self.entries.push((window, roman));
        Ok(())
    }
}

/// Inherent, killed and vowel-sign forms of a consonant unit.
///
/// Decomposed vowel signs romanize like their precomposed sign. Forms longer
/// than [`MAX_WINDOW`] are dropped.
fn consonant_forms(unit: &str, base: &str, signs: &[(char, &CharInfo)]) -> Vec<(String, String)> {
    let mut forms = Vec::with_capacity(signs.len() + SPLIT_SIGNS.len() + 2);
    forms.push((unit.to_string(), format!("{}{}", base, INHERENT_VOWEL)));
    forms.push((format!("{}{}", unit, VIRAMA), base.to_string()));
    for (sign, info) in signs {
        forms.push((format!("{}{}", unit, sign), format!("{}{}", base, info.roman)));
    }
    for (split, composed) in SPLIT_SIGNS {
        if let Some((_, info)) = signs.iter().find(|(sign, _)| *sign == composed) {
            forms.push((format!("{}{}", unit, split), format!("{}{}", base, info.roman)));
        }
    }
    forms.retain(|(window, _)| window.chars().count() <= MAX_WINDOW);
    forms
}

/// A cluster takes the same forms as a single consonant
fn cluster_forms(cluster: &str, base: &str, signs: &[(char, &CharInfo)]) -> Vec<(String, String)> {
    consonant_forms(cluster, base, signs)
}

/// Romanize a window with one layer only, by greedy longest match.
///
/// This is what the general rules give for a window when no override exists.
fn compose(layer: &Layer, window: &str) -> String {
    let text = KnString::new(window);
    let mut out = String::new();
    let mut i = 0;
    while i < text.len() {
        let hit = (1..=MAX_WINDOW).rev().find_map(|len| {
            let w = text.window(i, len)?;
            layer[len - 1].get(w).map(|entry| (len, entry))
        });
        match hit {
            Some((len, entry)) => {
                out.push_str(&entry.roman);
                i += len;
            }
            None => {
                if let Some(c) = text.char_at(i) {
                    out.push(c);
                }
                i += 1;
            }
        }
    }
    out
}

fn validate_form(form: &str, kind: OverrideKind) -> Result<(), TableError> {
    let invalid = |reason: &str| TableError::InvalidWindow {
        window: form.to_string(),
        reason: reason.to_string(),
    };

    let roles: Vec<Role> = form.chars().map(classify).collect();
    if roles.is_empty() {
        return Err(invalid("empty window"));
    }
    if !form.chars().all(crate::char_categories::is_kannada) {
        return Err(invalid("contains codepoints outside the Kannada block"));
    }

    match kind {
        OverrideKind::Exact if roles.len() > MAX_WINDOW => {
            Err(invalid("longer than the maximum window"))
        }
        OverrideKind::Exact => Ok(()),
        OverrideKind::Cluster => match roles.as_slice() {
            [Role::Consonant, Role::Virama, Role::Consonant] => Ok(()),
            _ => Err(invalid("cluster must be consonant + virama + consonant")),
        },
        OverrideKind::Nukta => match roles.as_slice() {
            [Role::Consonant, Role::Nukta] => Ok(()),
            _ => Err(invalid("nukta form must be consonant + nukta")),
        },
    }
}
