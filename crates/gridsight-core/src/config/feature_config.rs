//! Feature store configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TIMESTAMP_COLUMNS;
use crate::errors::ConfigError;

/// Configuration for loading the feature matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeatureConfig {
    /// Columns dropped before type detection. Matched case-insensitively.
    pub timestamp_columns: Vec<String>,
    /// Field delimiter of the tabular source. Default: `,`.
    pub delimiter: char,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            timestamp_columns: DEFAULT_TIMESTAMP_COLUMNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            delimiter: ',',
        }
    }
}

impl FeatureConfig {
    /// Returns true if `column` names a timestamp.
    pub fn is_timestamp_column(&self, column: &str) -> bool {
        self.timestamp_columns
            .iter()
            .any(|name| name.eq_ignore_ascii_case(column.trim()))
    }

    /// The delimiter as a single byte, as the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| ConfigError::Invalid {
                field: "features.delimiter",
                reason: format!("must be a single ASCII character, got {:?}", self.delimiter),
            })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.delimiter_byte().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_delimiter_maps_to_its_byte() {
        let config = FeatureConfig {
            delimiter: ';',
            ..FeatureConfig::default()
        };
        assert_eq!(config.delimiter_byte().unwrap(), b';');
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        for delimiter in ['é', '¦', '→'] {
            let config = FeatureConfig {
                delimiter,
                ..FeatureConfig::default()
            };
            assert!(matches!(
                config.delimiter_byte(),
                Err(ConfigError::Invalid { field: "features.delimiter", .. })
            ));
            assert!(config.validate().is_err());
        }
    }
}
