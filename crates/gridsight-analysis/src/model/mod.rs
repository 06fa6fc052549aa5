//! Outlier-scoring models.

pub mod isolation_forest;
pub mod tree;

use serde::{Deserialize, Serialize};

use gridsight_core::constants::{ANOMALY_LABEL, NORMAL_LABEL};

use crate::features::FeatureMatrix;

pub use isolation_forest::IsolationForest;

/// Discrete classification of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    Normal,
    Anomaly,
}

impl Prediction {
    /// Wire label: `-1` for an anomaly, `1` for a normal row.
    pub fn label(self) -> i8 {
        match self {
            Self::Normal => NORMAL_LABEL,
            Self::Anomaly => ANOMALY_LABEL,
        }
    }

    /// Inverse of [`Prediction::label`]. Any other value is rejected.
    pub fn from_label(label: i8) -> Option<Self> {
        match label {
            NORMAL_LABEL => Some(Self::Normal),
            ANOMALY_LABEL => Some(Self::Anomaly),
            _ => None,
        }
    }

    pub fn is_anomaly(self) -> bool {
        self == Self::Anomaly
    }
}

/// A fitted, immutable outlier-scoring function over feature rows.
///
/// Higher decision scores are more normal; a negative score is an anomaly.
pub trait AnomalyModel: Send + Sync {
    /// Raw signed decision score for one row.
    fn decision_score(&self, row: &[f64]) -> f64;

    fn predict(&self, row: &[f64]) -> Prediction {
        if self.decision_score(row) < 0.0 {
            Prediction::Anomaly
        } else {
            Prediction::Normal
        }
    }

    /// Predictions for every row, in row order.
    fn predict_batch(&self, matrix: &FeatureMatrix) -> Vec<Prediction> {
        matrix.rows().map(|row| self.predict(row)).collect()
    }

    /// Indices of rows predicted anomalous, ascending.
    fn anomaly_indices(&self, matrix: &FeatureMatrix) -> Vec<usize> {
        self.predict_batch(matrix)
            .into_iter()
            .enumerate()
            .filter(|(_, p)| p.is_anomaly())
            .map(|(i, _)| i)
            .collect()
    }
}
