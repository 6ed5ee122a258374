//! Current speaker state
//!
//! Several host hooks claim to know who is speaking. Instead of letting
//! whichever fires last win, each claim carries its source, and within one
//! line cycle a claim is only accepted if its source ranks at least as high
//! as the source that last set the speaker. The cycle ends when the line
//! has been rewritten (`finish_line`).

use crate::core::types::SpeakerId;

/// Hook that reported a speaker, lowest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpeakerSource {
    /// Read from the pending action just before a line is shown
    LineRender,
    /// Explicit speaker passed to the normal dialogue setter
    NormalDialogue,
    /// Speaker of the action that just completed
    ActionCompleted,
}

#[derive(Debug, Clone, Default)]
pub struct SpeakerTracker {
    current: SpeakerId,
    claimed_by: Option<SpeakerSource>,
}

impl SpeakerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the speaker regardless of precedence
    pub fn set(&mut self, id: SpeakerId) {
        self.current = id;
    }

    /// Record a claim from a hook; returns whether it was accepted
    pub fn observe(&mut self, source: SpeakerSource, id: SpeakerId) -> bool {
        match self.claimed_by {
            Some(holder) if source < holder => {
                tracing::debug!(
                    "Ignoring {:?} speaker {} (held by {:?} with {})",
                    source,
                    id,
                    holder,
                    self.current
                );
                false
            }
            _ => {
                self.current = id;
                self.claimed_by = Some(source);
                true
            }
        }
    }

    pub fn get(&self) -> SpeakerId {
        self.current
    }

    /// Source of the claim holding the current cycle, if any
    pub fn claimed_by(&self) -> Option<SpeakerSource> {
        self.claimed_by
    }

    /// Start a new line cycle; the speaker value itself is kept
    pub fn finish_line(&mut self) {
        self.claimed_by = None;
    }
}
