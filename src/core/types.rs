//! Tagged identifier types
//!
//! The host game exposes three unrelated integer id spaces for the same
//! characters. Each gets its own type here, and conversions between them
//! only happen at the roster mapper, the absolute slot table, and the
//! host boundary (`from_host`).

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Position of a character in the ordered folder list (1-based).
///
/// Also used as the raw index into the local→real table, so `0` is a valid
/// index even though no folder is ever assigned it.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display(fmt = "local#{}", _0)]
pub struct LocalId(pub u8);

impl LocalId {
    pub fn new(id: u8) -> Self {
        Self(id)
    }

    /// Convert a raw host integer, rejecting negative and oversized values
    pub fn from_host(raw: i32) -> Option<Self> {
        u8::try_from(raw).ok().map(Self)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifier the host runtime currently assigns to a character.
///
/// Only valid for one roster configuration; see `roster::IdentifierMapper`.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display(fmt = "real#{}", _0)]
pub struct RealId(pub u16);

impl RealId {
    pub fn new(id: u16) -> Self {
        Self(id)
    }

    pub fn from_host(raw: i32) -> Option<Self> {
        u16::try_from(raw).ok().map(Self)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Static per-slot id used for host character fields and placeholder names
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display(fmt = "abs#{}", _0)]
pub struct AbsoluteId(pub u8);

impl AbsoluteId {
    pub fn new(id: u8) -> Self {
        Self(id)
    }

    /// Zero-based index into the placeholder list (`None` for slot 0)
    pub fn slot_index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

/// Speaker as observed by whichever hook recorded it
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeakerId {
    #[display(fmt = "{}", _0)]
    Local(LocalId),
    #[display(fmt = "{}", _0)]
    Real(RealId),
}

impl Default for SpeakerId {
    fn default() -> Self {
        SpeakerId::Local(LocalId(0))
    }
}

/// Opaque skill identifier, consumed by the skill subsystem
pub type SkillId = String;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_host_rejects_negative() {
        assert_eq!(LocalId::from_host(-1), None);
        assert_eq!(RealId::from_host(-1), None);
        assert_eq!(LocalId::from_host(3), Some(LocalId(3)));
        assert_eq!(LocalId::from_host(300), None);
    }

    #[test]
    fn test_absolute_slot_index() {
        assert_eq!(AbsoluteId(1).slot_index(), Some(0));
        assert_eq!(AbsoluteId(14).slot_index(), Some(13));
        assert_eq!(AbsoluteId(0).slot_index(), None);
    }

    #[test]
    fn test_display_tags_id_space() {
        assert_eq!(LocalId(2).to_string(), "local#2");
        assert_eq!(RealId(7).to_string(), "real#7");
        assert_eq!(SpeakerId::Real(RealId(7)).to_string(), "real#7");
        assert_eq!(SpeakerId::default(), SpeakerId::Local(LocalId(0)));
    }
}
