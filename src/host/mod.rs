//! Boundary with the host game
//!
//! The core never reaches into host internals. Everything it needs is
//! expressed by the traits below, and an adapter for a concrete host
//! version implements them. Raw integers coming through these traits are
//! converted into tagged ids by the session, nowhere else.

pub mod memory;
pub mod session;

use crate::core::error::Result;
use crate::core::types::{AbsoluteId, LocalId, SkillId};
use crate::text::CharacterRecord;
use std::collections::{BTreeMap, BTreeSet};

pub use memory::InMemoryHost;
pub use session::{DialogueSession, RosterEvent};

/// Host query for the current roster
pub trait RosterSource {
    /// Sequence indexed by real id, each value the local id occupying that
    /// slot or a negative value for an empty slot
    ///
    /// Errors with `HostUnavailable` when the host data is not ready.
    fn roster_snapshot(&self) -> Result<Vec<i32>>;
}

/// Host query for the actions that carry a speaker
pub trait ActionLog {
    /// Speaker of the action currently being executed, if any
    fn pending_action_speaker(&self) -> Result<Option<i32>>;

    /// Speaker of the most recently completed action, if any
    fn last_completed_action_speaker(&self) -> Result<Option<i32>>;
}

/// Host per-character fields
pub trait CharacterFields {
    /// Push a loaded record into the host's character data
    fn apply_text(&mut self, id: AbsoluteId, record: &CharacterRecord) -> Result<()>;

    /// Read a field back as a string
    fn query_field(&self, id: AbsoluteId, field: &str) -> Result<Option<String>>;
}

/// Consumer of the loaded skill sets
pub trait SkillSink {
    fn receive_skills(&mut self, skills: BTreeMap<LocalId, BTreeSet<SkillId>>);
}
