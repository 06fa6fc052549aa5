//! Numeric constants shared across the workspace.

/// Added to every column's standard deviation before dividing, so a
/// zero-variance column yields a finite deviation.
pub const DEVIATION_EPSILON: f64 = 1e-6;

/// Maximum number of attributions a single precompute pass inserts.
pub const DEFAULT_PRECOMPUTE_CAP: usize = 50;

/// Expected fraction of outliers in the training data.
pub const DEFAULT_CONTAMINATION: f64 = 0.1;

/// Upper bound accepted for `contamination`.
pub const MAX_CONTAMINATION: f64 = 0.5;

/// Seed for the isolation forest's sampling RNG.
pub const DEFAULT_SEED: u64 = 42;

/// Number of isolation trees.
pub const DEFAULT_N_ESTIMATORS: usize = 100;

/// Rows drawn (without replacement) per isolation tree.
pub const DEFAULT_MAX_SAMPLES: usize = 256;

/// Euler–Mascheroni constant, used in the average path length of an
/// unsuccessful BST search.
pub const EULER_GAMMA: f64 = 0.577_215_664_9;

/// Column names removed by the feature store before type detection.
pub const DEFAULT_TIMESTAMP_COLUMNS: &[&str] = &["timestamp"];

/// Wire label the scoring model emits for an anomalous row.
pub const ANOMALY_LABEL: i8 = -1;

/// Wire label the scoring model emits for a normal row.
pub const NORMAL_LABEL: i8 = 1;
