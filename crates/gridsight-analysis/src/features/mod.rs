//! Feature store: tabular source → row-indexed numeric matrix.

pub mod matrix;
pub mod stats;
pub mod store;

pub use matrix::FeatureMatrix;
pub use stats::ColumnStats;
pub use store::FeatureStore;
