//! Anomaly model errors.

use super::error_code::{self, GridsightErrorCode};

/// Errors raised while fitting the outlier-scoring model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Cannot fit model: feature matrix has zero rows")]
    EmptyMatrix,

    #[error("Contamination must be in (0, 0.5], got {value}")]
    InvalidContamination { value: f64 },

    #[error("Invalid model parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl GridsightErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMatrix => error_code::FIT_ERROR,
            Self::InvalidContamination { .. } | Self::InvalidParameter { .. } => {
                error_code::INVALID_MODEL_PARAMETER
            }
        }
    }
}
