//! # gridsight-analysis
//!
//! Anomaly explanation for energy-usage feature tables.
//! Contains the feature store, the isolation-forest scoring model,
//! per-row attribution with its precompute cache, and the host boundary.

pub mod explain;
pub mod features;
pub mod host;
pub mod model;

pub use explain::{
    EngineState, ExplanationCache, ExplanationEngine, FeatureAttribution, PrecomputeReport,
};
pub use features::{ColumnStats, FeatureMatrix, FeatureStore};
pub use host::{ErrorPayload, ExplainService};
pub use model::{AnomalyModel, IsolationForest, Prediction};
