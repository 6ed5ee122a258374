//! In-memory host adapter
//!
//! Stands in for the game when replaying dialogue from the command line and
//! in tests. Host data starts out "not ready", like the real game during
//! early startup.

use crate::core::error::{CustomizerError, Result};
use crate::core::types::{AbsoluteId, LocalId, SkillId};
use crate::host::{ActionLog, CharacterFields, RosterSource, SkillSink};
use crate::text::CharacterRecord;
use ahash::AHashMap;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default, Clone)]
pub struct InMemoryHost {
    roster: Option<Vec<i32>>,
    action_log_ready: bool,
    pending_action: Option<i32>,
    completed_actions: Vec<i32>,
    fields: AHashMap<AbsoluteId, BTreeMap<String, String>>,
    skills: Option<BTreeMap<LocalId, BTreeSet<SkillId>>>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a roster snapshot (real id → local id)
    pub fn set_roster(&mut self, real_to_local: Vec<i32>) {
        self.roster = Some(real_to_local);
    }

    /// Mark the action log as initialized
    pub fn ready_actions(&mut self) {
        self.action_log_ready = true;
    }

    pub fn set_pending_action(&mut self, speaker: Option<i32>) {
        self.action_log_ready = true;
        self.pending_action = speaker;
    }

    pub fn complete_action(&mut self, speaker: i32) {
        self.action_log_ready = true;
        self.completed_actions.push(speaker);
    }

    /// Seed a host field, as the game's own data would
    pub fn set_field(&mut self, id: AbsoluteId, field: &str, value: &str) {
        self.fields
            .entry(id)
            .or_default()
            .insert(field.to_string(), value.to_string());
    }

    pub fn received_skills(&self) -> Option<&BTreeMap<LocalId, BTreeSet<SkillId>>> {
        self.skills.as_ref()
    }
}

impl RosterSource for InMemoryHost {
    fn roster_snapshot(&self) -> Result<Vec<i32>> {
        self.roster
            .clone()
            .ok_or_else(|| CustomizerError::HostUnavailable("roster not initialized".into()))
    }
}

impl ActionLog for InMemoryHost {
    fn pending_action_speaker(&self) -> Result<Option<i32>> {
        if !self.action_log_ready {
            return Err(CustomizerError::HostUnavailable("action log not initialized".into()));
        }
        Ok(self.pending_action)
    }

    fn last_completed_action_speaker(&self) -> Result<Option<i32>> {
        if !self.action_log_ready {
            return Err(CustomizerError::HostUnavailable("action log not initialized".into()));
        }
        Ok(self.completed_actions.last().copied())
    }
}

impl CharacterFields for InMemoryHost {
    fn apply_text(&mut self, id: AbsoluteId, record: &CharacterRecord) -> Result<()> {
        let fields = self.fields.entry(id).or_default();
        fields.insert("name".into(), record.display_name.clone());
        for (field, value) in &record.text {
            fields.insert(field.clone(), value.clone());
        }
        Ok(())
    }

    fn query_field(&self, id: AbsoluteId, field: &str) -> Result<Option<String>> {
        let fields = self.fields.get(&id).ok_or_else(|| CustomizerError::UnknownField {
            id,
            field: field.to_string(),
        })?;
        Ok(fields.get(field).cloned())
    }
}

impl SkillSink for InMemoryHost {
    fn receive_skills(&mut self, skills: BTreeMap<LocalId, BTreeSet<SkillId>>) {
        self.skills = Some(skills);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_until_published() {
        let mut host = InMemoryHost::new();
        assert!(host.roster_snapshot().is_err());
        assert!(host.pending_action_speaker().is_err());

        host.set_roster(vec![1, 2]);
        host.ready_actions();
        assert_eq!(host.roster_snapshot().unwrap(), vec![1, 2]);
        assert_eq!(host.pending_action_speaker().unwrap(), None);
        assert_eq!(host.last_completed_action_speaker().unwrap(), None);
    }

    #[test]
    fn test_last_completed_action_wins() {
        let mut host = InMemoryHost::new();
        host.complete_action(3);
        host.complete_action(5);
        assert_eq!(host.last_completed_action_speaker().unwrap(), Some(5));
    }

    #[test]
    fn test_unknown_character_field() {
        let host = InMemoryHost::new();
        assert!(matches!(
            host.query_field(AbsoluteId(1), "name"),
            Err(CustomizerError::UnknownField { .. })
        ));
    }
}
