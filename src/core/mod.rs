pub mod config;
pub mod error;
pub mod types;

pub use config::{CustomizerConfig, ExclusionRule, NicknameKeying};
pub use error::{CustomizerError, Result};
pub use types::{AbsoluteId, LocalId, RealId, SkillId, SpeakerId};
