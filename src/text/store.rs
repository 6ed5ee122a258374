//! Central storage for loaded character records

use crate::core::types::{LocalId, SkillId};
use crate::text::record::CharacterRecord;
use ahash::AHashMap;
use std::collections::{BTreeMap, BTreeSet};

/// Character records keyed by local id
#[derive(Debug, Default, Clone)]
pub struct CharacterTextStore {
    records: AHashMap<LocalId, CharacterRecord>,
}

impl CharacterTextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record unless one is already stored for its local id
    ///
    /// Returns `false` when the slot was taken; the stored record is kept.
    pub fn insert(&mut self, record: CharacterRecord) -> bool {
        if self.records.contains_key(&record.local_id) {
            tracing::warn!(
                "{} already has a record; keeping the first one loaded",
                record.local_id
            );
            return false;
        }
        self.records.insert(record.local_id, record);
        true
    }

    pub fn get(&self, id: LocalId) -> Option<&CharacterRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in local id order
    pub fn iter(&self) -> impl Iterator<Item = &CharacterRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by_key(|r| r.local_id);
        records.into_iter()
    }

    /// Skill sets of every loaded character, for the skill subsystem
    pub fn skill_map(&self) -> BTreeMap<LocalId, BTreeSet<SkillId>> {
        self.records
            .values()
            .map(|r| (r.local_id, r.known_skills.clone()))
            .collect()
    }
}

impl FromIterator<CharacterRecord> for CharacterTextStore {
    fn from_iter<T: IntoIterator<Item = CharacterRecord>>(iter: T) -> Self {
        let mut store = Self::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u8, name: &str) -> CharacterRecord {
        CharacterRecord {
            local_id: LocalId(id),
            display_name: name.into(),
            nicknames: vec![("Gina".into(), "Gigi".into())],
            known_skills: ["dogeza".to_string()].into_iter().collect(),
            text: Default::default(),
        }
    }

    #[test]
    fn test_insert_never_overwrites() {
        let mut store = CharacterTextStore::new();
        assert!(store.insert(record(1, "First")));
        assert!(!store.insert(record(1, "Second")));
        assert_eq!(store.get(LocalId(1)).unwrap().display_name, "First");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_iter_in_local_order() {
        let store: CharacterTextStore =
            vec![record(5, "E"), record(2, "B"), record(9, "I")].into_iter().collect();
        let ids: Vec<_> = store.iter().map(|r| r.local_id.0).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_skill_map_and_nicknames() {
        let store: CharacterTextStore = vec![record(3, "C")].into_iter().collect();
        let skills = store.skill_map();
        assert!(skills[&LocalId(3)].contains("dogeza"));
        assert!(store.get(LocalId(3)).unwrap().has_nicknames());
        assert!(store.get(LocalId(4)).is_none());
    }
}
