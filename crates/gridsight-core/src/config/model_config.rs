//! Isolation forest configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONTAMINATION, DEFAULT_MAX_SAMPLES, DEFAULT_N_ESTIMATORS, DEFAULT_SEED,
    MAX_CONTAMINATION,
};
use crate::errors::ConfigError;

/// Parameters for fitting the outlier-scoring model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Expected fraction of outliers. Must be in (0, 0.5]. Default: 0.1.
    pub contamination: f64,
    /// RNG seed. Default: 42.
    pub seed: u64,
    /// Number of isolation trees. Default: 100.
    pub n_estimators: usize,
    /// Rows sampled per tree, capped at the row count. Default: 256.
    pub max_samples: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            contamination: DEFAULT_CONTAMINATION,
            seed: DEFAULT_SEED,
            n_estimators: DEFAULT_N_ESTIMATORS,
            max_samples: DEFAULT_MAX_SAMPLES,
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.contamination > 0.0 && self.contamination <= MAX_CONTAMINATION) {
            return Err(ConfigError::Invalid {
                field: "model.contamination",
                reason: format!("must be in (0, {MAX_CONTAMINATION}], got {}", self.contamination),
            });
        }
        if self.n_estimators == 0 {
            return Err(ConfigError::Invalid {
                field: "model.n_estimators",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_samples == 0 {
            return Err(ConfigError::Invalid {
                field: "model.max_samples",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
