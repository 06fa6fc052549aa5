pub mod explain_config;
pub mod feature_config;
pub mod model_config;
pub mod observability_config;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use explain_config::ExplainConfig;
pub use feature_config::FeatureConfig;
pub use model_config::ModelConfig;
pub use observability_config::ObservabilityConfig;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GridsightConfig {
    pub features: FeatureConfig,
    pub model: ModelConfig,
    pub explain: ExplainConfig,
    pub observability: ObservabilityConfig,
}

impl GridsightConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every subsystem's values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.features.validate()?;
        self.model.validate()?;
        self.explain.validate()
    }
}
