//! Session context threaded through every host hook
//!
//! One `DialogueSession` is built at startup and owns everything the hooks
//! share: the loaded text, the name table, the roster mapper and the speaker
//! tracker. Hooks never return errors to the host. Failures are logged and
//! the affected step is skipped for that call only.

use crate::core::config::CustomizerConfig;
use crate::core::error::Result;
use crate::core::types::{LocalId, RealId, SkillId, SpeakerId};
use crate::host::{ActionLog, CharacterFields, RosterSource, SkillSink};
use crate::roster::IdentifierMapper;
use crate::speaker::{SpeakerSource, SpeakerTracker};
use crate::substitution::{RewriteContext, SubstitutionEngine};
use crate::text::{
    apply_loaded_text, load_characters, CharacterTextStore, LoadFailure, LoadOutcome,
    NameReplacementTable,
};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

/// Host lifecycle points after which real ids may have been reassigned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterEvent {
    LoopStarted,
    GameDataInitialized,
    LoadedFromSave,
}

pub struct DialogueSession {
    config: CustomizerConfig,
    store: Arc<CharacterTextStore>,
    pending_skills: Mutex<Option<BTreeMap<LocalId, BTreeSet<SkillId>>>>,
    engine: SubstitutionEngine,
    names: RwLock<NameReplacementTable>,
    mapper: RwLock<IdentifierMapper>,
    speaker: Mutex<SpeakerTracker>,
}

impl DialogueSession {
    /// Build a session from an already completed load phase
    pub fn new(config: CustomizerConfig, outcome: LoadOutcome) -> Self {
        let engine = SubstitutionEngine::new(&config);
        let mapper = IdentifierMapper::new(config.roster.table_size);
        Self {
            engine,
            store: Arc::new(outcome.store),
            pending_skills: Mutex::new(Some(outcome.skills)),
            names: RwLock::new(NameReplacementTable::new()),
            mapper: RwLock::new(mapper),
            speaker: Mutex::new(SpeakerTracker::new()),
            config,
        }
    }

    /// Validate the configuration, load every character folder and build a session
    ///
    /// Characters that failed to load are returned alongside the session;
    /// they simply have no customization.
    pub fn from_assets(
        config: CustomizerConfig,
        assets_root: &Path,
    ) -> Result<(Self, Vec<LoadFailure>)> {
        config.validate()?;
        let mut outcome = load_characters(assets_root, &config.assets);
        let failures = std::mem::take(&mut outcome.failures);
        Ok((Self::new(config, outcome), failures))
    }

    pub fn config(&self) -> &CustomizerConfig {
        &self.config
    }

    pub fn store(&self) -> &CharacterTextStore {
        &self.store
    }

    /// Snapshot of the placeholder name table
    pub fn names(&self) -> NameReplacementTable {
        self.names.read().clone()
    }

    pub fn speaker(&self) -> SpeakerId {
        self.speaker.lock().get()
    }

    pub fn to_real(&self, local: LocalId) -> Option<RealId> {
        self.mapper.read().to_real(local)
    }

    /// Give the loaded skill sets to the skill subsystem (first call only)
    pub fn hand_off_skills<S: SkillSink + ?Sized>(&self, sink: &mut S) -> bool {
        match self.pending_skills.lock().take() {
            Some(skills) => {
                tracing::info!("Handing off skills for {} characters", skills.len());
                sink.receive_skills(skills);
                true
            }
            None => {
                tracing::warn!("Skills were already handed off");
                false
            }
        }
    }

    /// Host character data is ready: push loaded text and fill the name table
    pub fn on_character_data_ready<H: CharacterFields + ?Sized>(&self, host: &mut H) -> usize {
        let mut names = self.names.write();
        let applied = apply_loaded_text(
            &self.store,
            self.engine.absolute_table(),
            &self.config.substitution.placeholders,
            host,
            &mut names,
        );
        drop(names);

        tracing::info!("Applied loaded text to {} characters", applied);
        applied
    }

    /// Rebuild the roster mapping; returns `false` if the host was not ready
    pub fn on_roster_event<R: RosterSource + ?Sized>(
        &self,
        event: RosterEvent,
        roster: &R,
    ) -> bool {
        let snapshot = match roster.roster_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("{:?}: roster unavailable, keeping previous mapping: {}", event, e);
                return false;
            }
        };

        let mut fresh = IdentifierMapper::new(self.config.roster.table_size);
        let mapped = fresh.rebuild(&snapshot);
        *self.mapper.write() = fresh;

        tracing::info!("{:?}: id map rebuilt, {} characters mapped", event, mapped);
        true
    }

    /// Normal dialogue was set with an explicit speaker
    pub fn on_normal_dialogue(&self, main: i32) {
        match LocalId::from_host(main) {
            Some(local) => {
                self.speaker
                    .lock()
                    .observe(SpeakerSource::NormalDialogue, SpeakerId::Local(local));
            }
            None => tracing::warn!("Normal dialogue speaker {} is not a local id", main),
        }
    }

    /// An action finished executing
    pub fn on_action_completed<A: ActionLog + ?Sized>(&self, actions: &A) {
        match actions.last_completed_action_speaker() {
            Ok(Some(raw)) => match LocalId::from_host(raw) {
                Some(local) => {
                    self.speaker
                        .lock()
                        .observe(SpeakerSource::ActionCompleted, SpeakerId::Local(local));
                }
                None => tracing::warn!("Completed action speaker {} is not a local id", raw),
            },
            Ok(None) => tracing::debug!("No completed actions recorded"),
            Err(e) => tracing::error!("Could not read completed actions: {}", e),
        }
    }

    /// A line is about to be shown; returns the text to show instead
    pub fn about_to_show_line<A: ActionLog + ?Sized>(&self, line: &str, actions: &A) -> String {
        let speaker = match actions.pending_action_speaker() {
            Ok(Some(raw)) => {
                let mut tracker = self.speaker.lock();
                match LocalId::from_host(raw) {
                    Some(local) => {
                        tracker.observe(SpeakerSource::LineRender, SpeakerId::Local(local));
                    }
                    None => tracing::warn!("Pending action speaker {} is not a local id", raw),
                }
                Some(tracker.get())
            }
            Ok(None) => {
                tracing::debug!("No pending action, keeping current speaker");
                Some(self.speaker())
            }
            Err(e) => {
                tracing::error!("Speaker resolution failed: {}", e);
                None
            }
        };

        self.rewrite_as(line, speaker)
    }

    /// Rewrite a line with the tracked speaker, without consulting the host
    pub fn rewrite(&self, line: &str) -> String {
        self.rewrite_as(line, Some(self.speaker()))
    }

    fn rewrite_as(&self, line: &str, speaker: Option<SpeakerId>) -> String {
        let rewritten = {
            let names = self.names.read();
            let mapper = self.mapper.read();
            self.engine.rewrite(
                line,
                &RewriteContext {
                    store: &self.store,
                    names: &names,
                    mapper: &mapper,
                    speaker,
                },
            )
        };
        self.speaker.lock().finish_line();
        rewritten
    }
}
