//! Deviation-based feature attribution.
//!
//! Isolation-based scores have no native per-feature decomposition, so the
//! importance of a feature is how far the row sits from that feature's
//! mean in units of its standard deviation, scaled so the largest
//! deviation in the row is 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use gridsight_core::errors::ExplainError;

use crate::features::{ColumnStats, FeatureMatrix};
use crate::model::AnomalyModel;

/// Explanation of a single row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureAttribution {
    /// Feature name → importance in `[0, 1]`.
    pub feature_importance: BTreeMap<String, f64>,
    /// The model's raw signed decision score for the row.
    pub decision_score: f64,
    /// The row's original feature values.
    pub data_point: BTreeMap<String, f64>,
}

impl FeatureAttribution {
    /// Compute the attribution for row `index`.
    ///
    /// Fails with `IndexOutOfRange` for a missing row and `NumericFailure`
    /// if the decision score or any deviation is not finite.
    pub fn compute(
        index: usize,
        matrix: &FeatureMatrix,
        stats: &ColumnStats,
        model: &dyn AnomalyModel,
    ) -> Result<Self, ExplainError> {
        let row = matrix.row(index).ok_or_else(|| ExplainError::IndexOutOfRange {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            row_count: matrix.row_count(),
        })?;

        let decision_score = model.decision_score(row);
        if !decision_score.is_finite() {
            return Err(ExplainError::NumericFailure {
                index,
                feature: "decision_score".to_string(),
            });
        }

        let deviations: Vec<f64> = row
            .iter()
            .enumerate()
            .map(|(j, &value)| stats.deviation(j, value))
            .collect();
        if let Some(j) = deviations.iter().position(|d| !d.is_finite()) {
            return Err(ExplainError::NumericFailure {
                index,
                feature: matrix.columns()[j].clone(),
            });
        }

        // All-zero deviations: every importance is 0.
        let max = deviations.iter().copied().fold(0.0, f64::max);
        let scale = if max > 0.0 { max } else { 1.0 };

        let columns = matrix.columns();
        let feature_importance = columns
            .iter()
            .cloned()
            .zip(deviations.iter().map(|d| d / scale))
            .collect();
        let data_point = columns.iter().cloned().zip(row.iter().copied()).collect();

        Ok(Self {
            feature_importance,
            decision_score,
            data_point,
        })
    }

    /// The `n` most important features, highest first. Ties go to the
    /// lexically smaller name.
    pub fn top_features(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .feature_importance
            .iter()
            .map(|(name, score)| (name.as_str(), *score))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }

    /// Largest importance in the row. 1 unless every deviation was 0.
    pub fn max_importance(&self) -> f64 {
        self.feature_importance.values().copied().fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScore(f64);

    impl AnomalyModel for FixedScore {
        fn decision_score(&self, _row: &[f64]) -> f64 {
            self.0
        }
    }

    fn three_rows() -> FeatureMatrix {
        FeatureMatrix::new(
            vec!["a".into(), "b".into()],
            vec![vec![0.0, 0.0], vec![10.0, 10.0], vec![0.0, 10.0]],
        )
        .unwrap()
    }

    #[test]
    fn largest_deviation_is_scaled_to_one() {
        let m = three_rows();
        let stats = ColumnStats::from_matrix(&m);
        let attr = FeatureAttribution::compute(0, &m, &stats, &FixedScore(-0.2)).unwrap();
        // Row 0 is 10/3 below mean(a) and 20/3 below mean(b); spreads are equal.
        assert_eq!(attr.feature_importance["b"], 1.0);
        assert!((attr.feature_importance["a"] - 0.5).abs() < 1e-9);
        assert_eq!(attr.decision_score, -0.2);
        assert_eq!(attr.data_point["a"], 0.0);
        assert_eq!(attr.max_importance(), 1.0);
    }

    #[test]
    fn row_at_the_mean_has_zero_importance() {
        let m = FeatureMatrix::new(
            vec!["a".into(), "b".into()],
            vec![vec![1.0, 5.0], vec![2.0, 6.0], vec![3.0, 7.0]],
        )
        .unwrap();
        let stats = ColumnStats::from_matrix(&m);
        let attr = FeatureAttribution::compute(1, &m, &stats, &FixedScore(0.1)).unwrap();
        assert!(attr.feature_importance.values().all(|&v| v == 0.0));
        assert_eq!(attr.max_importance(), 0.0);
    }

    #[test]
    fn non_finite_score_is_a_numeric_failure() {
        let m = three_rows();
        let stats = ColumnStats::from_matrix(&m);
        let err = FeatureAttribution::compute(1, &m, &stats, &FixedScore(f64::NAN)).unwrap_err();
        assert!(matches!(err, ExplainError::NumericFailure { index: 1, .. }));
    }

    #[test]
    fn missing_row_is_out_of_range() {
        let m = three_rows();
        let stats = ColumnStats::from_matrix(&m);
        let err = FeatureAttribution::compute(3, &m, &stats, &FixedScore(0.0)).unwrap_err();
        assert_eq!(err, ExplainError::IndexOutOfRange { index: 3, row_count: 3 });
    }

    #[test]
    fn top_features_rank_and_break_ties_by_name() {
        let attr = FeatureAttribution {
            feature_importance: [("z", 1.0), ("a", 0.4), ("m", 1.0)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            decision_score: -0.1,
            data_point: BTreeMap::new(),
        };
        assert_eq!(attr.top_features(2), vec![("m", 1.0), ("z", 1.0)]);
        assert_eq!(attr.top_features(10).len(), 3);
    }

    #[test]
    fn serializes_with_dashboard_field_names() {
        let m = three_rows();
        let stats = ColumnStats::from_matrix(&m);
        let attr = FeatureAttribution::compute(2, &m, &stats, &FixedScore(0.05)).unwrap();
        let json = serde_json::to_value(&attr).unwrap();
        assert!(json["feature_importance"]["a"].is_number());
        assert_eq!(json["decision_score"], 0.05);
        assert_eq!(json["data_point"]["b"], 10.0);
    }
}
