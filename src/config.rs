//! Romanizer configuration.
//!
//! ```toml
//! normalize = true
//! anusvara = "homorganic"
//!
//! [overrides]
//! "ಜ್ಞಾ" = "gnyaa"
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::segmenter::AnusvaraRule;

/// Settings for a [`Romanizer`](crate::Romanizer)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RomanizerConfig {
    /// NFC-normalize input before segmenting
    pub normalize: bool,
    /// Anusvara romanization rule
    pub anusvara: AnusvaraRule,
    /// Exact windows layered over the default table
    pub overrides: BTreeMap<String, String>,
}

impl RomanizerConfig {
    /// Parse TOML text
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml = r#"
normalize = true
anusvara = "homorganic"

[overrides]
"ಜ್ಞಾ" = "gnyaa"
"#;
        let config = RomanizerConfig::from_toml_str(toml).unwrap();
        assert!(config.normalize);
        assert_eq!(config.anusvara, AnusvaraRule::Homorganic);
        assert_eq!(config.overrides["ಜ್ಞಾ"], "gnyaa");
    }

    #[test]
    fn empty_config_is_default() {
        let config = RomanizerConfig::from_toml_str("").unwrap();
        assert_eq!(config, RomanizerConfig::default());
        assert_eq!(config.anusvara, AnusvaraRule::Fixed);
    }

    #[test]
    fn error_unknown_rule() {
        let err = RomanizerConfig::from_toml_str("anusvara = \"nasal\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn error_unknown_field() {
        let err = RomanizerConfig::from_toml_str("normalise = true").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn error_missing_file() {
        let err = RomanizerConfig::load(Path::new("/nonexistent/akshara.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
