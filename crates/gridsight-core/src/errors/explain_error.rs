//! Explanation engine errors.

use super::error_code::{self, GridsightErrorCode};
use super::ModelError;

/// Errors returned by explanation lookups and precompute passes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExplainError {
    #[error("Explanation engine not ready: model has not been fit")]
    NotReady,

    #[error("Index {index} out of range (row count {row_count})")]
    IndexOutOfRange { index: i64, row_count: usize },

    #[error("Non-finite attribution for row {index}, feature `{feature}`")]
    NumericFailure { index: usize, feature: String },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

impl ExplainError {
    /// True for errors the caller caused and can correct.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }
}

impl GridsightErrorCode for ExplainError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotReady => error_code::NOT_READY,
            Self::IndexOutOfRange { .. } => error_code::INDEX_OUT_OF_RANGE,
            Self::NumericFailure { .. } => error_code::NUMERIC_FAILURE,
            Self::Model(e) => e.error_code(),
        }
    }
}
