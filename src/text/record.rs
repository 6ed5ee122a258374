//! Per-character text records and their on-disk schema

use crate::core::error::Result;
use crate::core::types::{LocalId, SkillId};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Schema of a character folder's config file
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterFile {
    #[serde(alias = "name")]
    pub display_name: String,

    #[serde(default)]
    pub nicknames: HashMap<String, String>,

    #[serde(default)]
    pub known_skills: BTreeSet<SkillId>,

    /// Additional host text fields pushed to the host as-is
    #[serde(default)]
    pub text: BTreeMap<String, String>,
}

/// A loaded character, immutable for the rest of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    pub local_id: LocalId,
    pub display_name: String,
    /// Literal → replacement, in application order
    pub nicknames: Vec<(String, String)>,
    pub known_skills: BTreeSet<SkillId>,
    pub text: BTreeMap<String, String>,
}

impl CharacterRecord {
    /// Build a record from a parsed file
    ///
    /// Nicknames are ordered longest literal first (ties lexicographic) so
    /// enumeration order is deterministic. Empty literals are dropped.
    pub fn from_file(local_id: LocalId, file: CharacterFile) -> Self {
        let mut nicknames: Vec<(String, String)> = file
            .nicknames
            .into_iter()
            .filter(|(literal, _)| {
                if literal.is_empty() {
                    tracing::warn!("{}: ignoring empty nickname literal", local_id);
                    false
                } else {
                    true
                }
            })
            .collect();
        nicknames.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self {
            local_id,
            display_name: file.display_name,
            nicknames,
            known_skills: file.known_skills,
            text: file.text,
        }
    }

    pub fn has_nicknames(&self) -> bool {
        !self.nicknames.is_empty()
    }
}

/// Parse a character config document
pub fn parse_character_toml(content: &str, local_id: LocalId) -> Result<CharacterRecord> {
    let file: CharacterFile = toml::from_str(content)?;
    Ok(CharacterRecord::from_file(local_id, file))
}
