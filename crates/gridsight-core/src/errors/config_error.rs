//! Configuration errors.

use super::error_code::{self, GridsightErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl GridsightErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => error_code::CONFIG_ERROR,
            Self::Parse(_) => error_code::CONFIG_PARSE_ERROR,
        }
    }
}
