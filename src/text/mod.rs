//! Character text loaded from per-character config files

pub mod loader;
pub mod names;
pub mod record;
pub mod store;

pub use loader::{load_characters, LoadFailure, LoadOutcome};
pub use names::{apply_loaded_text, NameReplacementTable};
pub use record::{parse_character_toml, CharacterFile, CharacterRecord};
pub use store::CharacterTextStore;
