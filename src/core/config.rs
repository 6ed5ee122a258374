//! Customizer configuration with documented defaults
//!
//! Every section can be overridden from a TOML file. Missing sections and
//! missing keys fall back to the values shipped here, which match the
//! current host version.

use crate::core::error::{CustomizerError, Result};
use crate::core::types::AbsoluteId;
use ahash::AHashSet;
use serde::Deserialize;
use std::path::Path;

/// Every local id fits in a `LocalId`, so larger tables have unreachable slots
pub const MAX_TABLE_SIZE: usize = u8::MAX as usize + 1;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomizerConfig {
    pub assets: AssetsConfig,
    pub roster: RosterConfig,
    pub substitution: SubstitutionConfig,
}

/// Where character records live on disk
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// File name looked up inside each character folder
    pub config_file_name: String,

    /// Character folder names in load order
    ///
    /// The position in this list (1-based) is the character's local id, so
    /// reordering it reassigns every local id.
    pub folders: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            config_file_name: "config.toml".into(),
            folders: [
                "gina",
                "sq",
                "raqio",
                "stella",
                "shigemichi",
                "chipie",
                "remnan",
                "comet",
                "yuriko",
                "jonas",
                "setsu",
                "otome",
                "sha-ming",
                "kukrushka",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// How a resolved real speaker id selects a nickname table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NicknameKeying {
    /// The real id's value names the local id of the table
    #[default]
    Direct,
    /// The real id's value is an absolute id, mapped back through `absolute_ids`
    Absolute,
}

/// Id-space tables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Size of the local→real table (largest local id + 1)
    pub table_size: usize,

    /// Absolute id for each local id, indexed by `local - 1`
    ///
    /// Must follow the same order as `assets.folders`. Verify against the
    /// host version before changing.
    pub absolute_ids: Vec<AbsoluteId>,

    pub nickname_keying: NicknameKeying,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            table_size: 15,
            absolute_ids: (1..=14).map(AbsoluteId).collect(),
            nickname_keying: NicknameKeying::Direct,
        }
    }
}

/// A placeholder replacement that must not fire when `guard` is present
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExclusionRule {
    pub key: String,
    pub guard: String,
}

/// Line rewriting constants
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SubstitutionConfig {
    /// Shown in place of empty or blank lines
    pub ellipsis: String,

    /// Marker that starts a substitution-protocol line
    pub prefix: String,

    /// Token separator inside a substitution-protocol line
    pub delimiter: char,

    /// Canonical names in absolute slot order (slot 1 first)
    pub placeholders: Vec<String>,

    pub exclusions: Vec<ExclusionRule>,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            ellipsis: "...".into(),
            prefix: "$SUBST".into(),
            delimiter: '|',
            placeholders: [
                "Gina",
                "SQ",
                "Raqio",
                "Stella",
                "Shigemichi",
                "Chipie",
                "Remnan",
                "Comet",
                "Yuriko",
                "Jonas",
                "Setsu",
                "Otome",
                "Sha-Ming",
                "Kukrushka",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            // "SQ" is a substring of the "SQUEAK"-style onomatopoeia
            exclusions: vec![ExclusionRule {
                key: "SQ".into(),
                guard: "SQU".into(),
            }],
        }
    }
}

impl CustomizerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check cross-section consistency
    pub fn validate(&self) -> Result<()> {
        if self.roster.table_size == 0 || self.roster.table_size > MAX_TABLE_SIZE {
            return Err(CustomizerError::Config(format!(
                "roster.table_size must be within 1..={}",
                MAX_TABLE_SIZE
            )));
        }

        if self.roster.absolute_ids.len() > self.assets.folders.len() {
            return Err(CustomizerError::Config(format!(
                "roster.absolute_ids has {} entries but only {} folders are configured",
                self.roster.absolute_ids.len(),
                self.assets.folders.len()
            )));
        }

        let slots = self.substitution.placeholders.len();
        let mut seen = AHashSet::new();
        for absolute in &self.roster.absolute_ids {
            if absolute.0 == 0 || absolute.0 as usize > slots {
                return Err(CustomizerError::Config(format!(
                    "absolute id {} outside placeholder slots 1..={}",
                    absolute.0, slots
                )));
            }
            if !seen.insert(*absolute) {
                return Err(CustomizerError::Config(format!(
                    "absolute id {} assigned to more than one folder",
                    absolute.0
                )));
            }
        }

        if self.substitution.prefix.contains(self.substitution.delimiter) {
            return Err(CustomizerError::Config(format!(
                "substitution.prefix '{}' contains the delimiter '{}'",
                self.substitution.prefix, self.substitution.delimiter
            )));
        }

        Ok(())
    }
}
