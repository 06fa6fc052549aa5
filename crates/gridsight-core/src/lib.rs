//! # gridsight-core
//!
//! Foundation crate for the Gridsight anomaly explainer.
//! Defines config, errors, error codes, tracing setup, and constants.
//! `gridsight-analysis` depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::GridsightConfig;
pub use errors::error_code::GridsightErrorCode;
pub use errors::{GridsightError, GridsightResult};
pub use types::{FxHashMap, FxHashSet};
