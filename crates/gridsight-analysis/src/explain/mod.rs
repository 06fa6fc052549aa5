//! Per-row anomaly explanation: attribution, cache, and the engine that
//! owns the fitted model.

pub mod attribution;
pub mod cache;
pub mod engine;
pub mod report;

pub use attribution::FeatureAttribution;
pub use cache::{CacheStats, ExplanationCache};
pub use engine::{EngineState, ExplanationEngine};
pub use report::PrecomputeReport;
