//! Local → real id mapping for the current roster configuration

use crate::core::types::{LocalId, RealId};

/// Local → real lookup table
///
/// Only valid for one roster configuration. The host has to ask for a
/// rebuild whenever it may have reassigned real ids (loop start, game data
/// initialization, load from save); the mapper cannot detect staleness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierMapper {
    table: Vec<Option<RealId>>,
}

impl IdentifierMapper {
    /// Create an all-unmapped table with room for local ids `0..table_size`
    pub fn new(table_size: usize) -> Self {
        Self {
            table: vec![None; table_size],
        }
    }

    /// Rebuild from a snapshot indexed by real id holding local ids
    ///
    /// Negative or out-of-range local ids are ignored. The whole table is
    /// replaced at once. Returns the number of mapped local ids.
    pub fn rebuild(&mut self, real_to_local: &[i32]) -> usize {
        let mut table = vec![None; self.table.len()];

        for (real, &local) in real_to_local.iter().enumerate() {
            let Ok(real) = u16::try_from(real) else {
                break;
            };
            if local >= 0 && (local as usize) < table.len() {
                table[local as usize] = Some(RealId(real));
            }
        }

        self.table = table;
        self.mapped_count()
    }

    /// Current real id of a local id, `None` when unmapped or out of range
    pub fn to_real(&self, local: LocalId) -> Option<RealId> {
        self.table.get(local.index()).copied().flatten()
    }

    pub fn table_size(&self) -> usize {
        self.table.len()
    }

    pub fn mapped_count(&self) -> usize {
        self.table.iter().filter(|slot| slot.is_some()).count()
    }
}
