use crate::core::types::AbsoluteId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CustomizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Host state unavailable: {0}")]
    HostUnavailable(String),

    #[error("Failed to load character folder {folder}: {source}")]
    CharacterLoad {
        folder: String,
        #[source]
        source: Box<CustomizerError>,
    },

    #[error("Unknown field '{field}' for character {id}")]
    UnknownField { id: AbsoluteId, field: String },
}

pub type Result<T> = std::result::Result<T, CustomizerError>;
