//! Explanation engine configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PRECOMPUTE_CAP;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExplainConfig {
    /// Maximum attributions inserted per precompute pass. Default: 50.
    pub precompute_cap: usize,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            precompute_cap: DEFAULT_PRECOMPUTE_CAP,
        }
    }
}

impl ExplainConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precompute_cap == 0 {
            return Err(ConfigError::Invalid {
                field: "explain.precompute_cap",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
