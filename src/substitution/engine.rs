//! Dialogue line rewriting
//!
//! Each outgoing line goes through four stages in a fixed order:
//! 1. Empty normalization (blank lines become the ellipsis and stop here)
//! 2. Protocol unwrap (prefixed lines are replaced by their message key)
//! 3. Global placeholder name replacement
//! 4. Nickname replacement for the current speaker
//!
//! The engine holds no mutable state. Everything that changes during a
//! session is passed in through `RewriteContext`.

use crate::core::config::{CustomizerConfig, ExclusionRule, NicknameKeying, SubstitutionConfig};
use crate::core::types::{AbsoluteId, LocalId, RealId, SpeakerId};
use crate::roster::{AbsoluteTable, IdentifierMapper};
use crate::substitution::protocol::unwrap_protocol;
use crate::text::{CharacterTextStore, NameReplacementTable};

/// Session state read by a single rewrite
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'a> {
    pub store: &'a CharacterTextStore,
    pub names: &'a NameReplacementTable,
    pub mapper: &'a IdentifierMapper,
    /// `None` when the speaker could not be resolved for this line
    pub speaker: Option<SpeakerId>,
}

#[derive(Debug, Clone)]
pub struct SubstitutionEngine {
    config: SubstitutionConfig,
    keying: NicknameKeying,
    absolute: AbsoluteTable,
}

impl SubstitutionEngine {
    pub fn new(config: &CustomizerConfig) -> Self {
        Self {
            config: config.substitution.clone(),
            keying: config.roster.nickname_keying,
            absolute: AbsoluteTable::new(config.roster.absolute_ids.clone()),
        }
    }

    pub fn absolute_table(&self) -> &AbsoluteTable {
        &self.absolute
    }

    /// Rewrite one dialogue line
    pub fn rewrite(&self, line: &str, ctx: &RewriteContext<'_>) -> String {
        tracing::debug!("Original line: {}", line);

        if line.trim().is_empty() {
            return self.config.ellipsis.clone();
        }

        let mut message = match unwrap_protocol(line, &self.config.prefix, self.config.delimiter) {
            Some(key) => {
                tracing::debug!("After substitution prefix: {}", key);
                key.to_string()
            }
            None => line.to_string(),
        };

        message = self.replace_names(message, ctx.names);

        if let Some(owner) = ctx.speaker.and_then(|s| self.nickname_owner(s, ctx.mapper)) {
            if let Some(record) = ctx.store.get(owner).filter(|r| r.has_nicknames()) {
                message = replace_nicknames(&message, &record.nicknames);
            }
        }

        tracing::debug!("Final line: {}", message);
        message
    }

    fn replace_names(&self, mut message: String, names: &NameReplacementTable) -> String {
        for (placeholder, display_name) in names.iter() {
            if !message.contains(placeholder) {
                continue;
            }
            if is_excluded(&self.config.exclusions, placeholder, &message) {
                continue;
            }
            message = message.replace(placeholder, display_name);
            tracing::debug!("Name replaced: {} -> {}", placeholder, display_name);
        }
        message
    }

    /// Local id whose nickname table applies to this speaker
    ///
    /// A local speaker is first resolved through the roster mapper; the
    /// resulting real id then selects a table according to the keying.
    fn nickname_owner(&self, speaker: SpeakerId, mapper: &IdentifierMapper) -> Option<LocalId> {
        let real = match speaker {
            SpeakerId::Local(local) => mapper.to_real(local)?,
            SpeakerId::Real(real) => real,
        };
        self.owner_of(real)
    }

    fn owner_of(&self, real: RealId) -> Option<LocalId> {
        match self.keying {
            NicknameKeying::Direct => LocalId::from_host(real.0 as i32),
            NicknameKeying::Absolute => u8::try_from(real.0)
                .ok()
                .and_then(|abs| self.absolute.to_local(AbsoluteId(abs))),
        }
    }
}

fn is_excluded(rules: &[ExclusionRule], placeholder: &str, message: &str) -> bool {
    rules
        .iter()
        .any(|rule| rule.key == placeholder && message.contains(&rule.guard))
}

/// Single left-to-right scan taking the longest literal that matches at
/// each position. Replacement text is never scanned again.
fn replace_nicknames(message: &str, nicknames: &[(String, String)]) -> String {
    let mut out = String::with_capacity(message.len());
    let mut rest = message;

    while let Some(c) = rest.chars().next() {
        let matched = nicknames
            .iter()
            .filter(|(literal, _)| !literal.is_empty() && rest.starts_with(literal.as_str()))
            .max_by_key(|(literal, _)| literal.len());

        match matched {
            Some((literal, replacement)) => {
                tracing::debug!("Nickname replaced: {} -> {}", literal, replacement);
                out.push_str(replacement);
                rest = &rest[literal.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}
