pub mod error_code;

mod config_error;
mod explain_error;
mod feature_error;
mod gridsight_error;
mod model_error;

pub use config_error::ConfigError;
pub use explain_error::ExplainError;
pub use feature_error::FeatureError;
pub use gridsight_error::{GridsightError, GridsightResult};
pub use model_error::ModelError;
