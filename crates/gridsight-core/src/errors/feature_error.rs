//! Feature store errors.

use super::error_code::{self, GridsightErrorCode};
use super::ConfigError;

/// Errors that can occur while loading a feature matrix.
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error("Feature source not found: {path}")]
    NotFound { path: String },

    #[error("No numeric feature columns remain in {path}")]
    EmptyFeatureSet { path: String },

    #[error("Duplicate feature column: {name}")]
    DuplicateColumn { name: String },

    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Feature source parse error: {message}")]
    Parse { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Feature store config: {0}")]
    Config(#[from] ConfigError),
}

impl GridsightErrorCode for FeatureError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::FEATURE_SOURCE_NOT_FOUND,
            Self::EmptyFeatureSet { .. } => error_code::EMPTY_FEATURE_SET,
            Self::DuplicateColumn { .. } => error_code::DUPLICATE_COLUMN,
            Self::RaggedRow { .. } => error_code::RAGGED_ROW,
            Self::Parse { .. } => error_code::FEATURE_PARSE_ERROR,
            Self::Io(_) => error_code::IO_ERROR,
            Self::Config(e) => e.error_code(),
        }
    }
}
