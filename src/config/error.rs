//! Configuration error types.

use crate::utils::fs::FileError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] FileError),

    #[error("unable to decode config, check for valid JSON")]
    Json(#[source] serde_json::Error),

    #[error("unable to encode config")]
    Encode(#[source] serde_json::Error),

    #[error("`template` is missing from config or is not a string")]
    MissingTemplate,
}

impl ConfigError {
    /// Stage name reported in the terminal error line.
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Io(err) => err.stage(),
            Self::Json(_) | Self::MissingTemplate => "load_config",
            Self::Encode(_) => "save_config",
        }
    }
}
