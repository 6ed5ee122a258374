//! Placeholder name → display name table
//!
//! Filled once, after the host has its character data ready, by pushing
//! each loaded record into the host and reading the resulting name back.

use crate::host::CharacterFields;
use crate::roster::AbsoluteTable;
use crate::text::store::CharacterTextStore;

/// Ordered placeholder → display name pairs
///
/// Enumeration order is insertion order; replacing an existing key keeps
/// its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameReplacementTable {
    entries: Vec<(String, String)>,
}

impl NameReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the display name for a placeholder
    pub fn upsert(&mut self, placeholder: &str, display_name: &str) {
        if placeholder.is_empty() {
            tracing::warn!("Ignoring empty placeholder for {}", display_name);
            return;
        }
        match self.entries.iter_mut().find(|(key, _)| key == placeholder) {
            Some((_, value)) => *value = display_name.to_string(),
            None => self
                .entries
                .push((placeholder.to_string(), display_name.to_string())),
        }
    }

    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == placeholder)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Push loaded text into the host and record each character's final name
///
/// Characters are visited in local order through the absolute table. A
/// character whose record is missing, whose slot has no placeholder, or that
/// the host rejects is skipped. Returns the number of characters applied.
pub fn apply_loaded_text<H: CharacterFields + ?Sized>(
    store: &CharacterTextStore,
    absolute: &AbsoluteTable,
    placeholders: &[String],
    host: &mut H,
    table: &mut NameReplacementTable,
) -> usize {
    let mut applied = 0;

    for (local, absolute_id) in absolute.pairs() {
        let Some(record) = store.get(local) else {
            continue;
        };

        let Some(placeholder) = absolute_id.slot_index().and_then(|i| placeholders.get(i)) else {
            tracing::warn!("{} has no placeholder slot, skipping {}", absolute_id, local);
            continue;
        };

        if let Err(e) = host.apply_text(absolute_id, record) {
            tracing::error!("Failed to apply text for {}: {}", absolute_id, e);
            continue;
        }

        let name = match host.query_field(absolute_id, "name") {
            Ok(Some(name)) if !name.is_empty() => name,
            Ok(_) => {
                tracing::warn!(
                    "{} has no name after apply, using {}",
                    absolute_id,
                    record.display_name
                );
                record.display_name.clone()
            }
            Err(e) => {
                tracing::warn!("Could not read name of {}: {}", absolute_id, e);
                record.display_name.clone()
            }
        };

        tracing::info!("Character {} name is now: {}", absolute_id, name);
        table.upsert(placeholder, &name);
        applied += 1;
    }

    applied
}
