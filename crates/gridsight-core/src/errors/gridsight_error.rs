//! Top-level error aggregating every subsystem error.

use super::error_code::{self, GridsightErrorCode};
use super::{ConfigError, ExplainError, FeatureError, ModelError};

/// Top-level error type for Gridsight.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum GridsightError {
    #[error("feature error: {0}")]
    Feature(#[from] FeatureError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("explain error: {0}")]
    Explain(#[from] ExplainError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("tracing error: {0}")]
    Tracing(String),
}

impl GridsightErrorCode for GridsightError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Feature(e) => e.error_code(),
            Self::Model(e) => e.error_code(),
            Self::Explain(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Tracing(_) => error_code::TRACING_ERROR,
        }
    }
}

/// Convenience type alias.
pub type GridsightResult<T> = Result<T, GridsightError>;
