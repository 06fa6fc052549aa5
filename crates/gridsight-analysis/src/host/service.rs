//! ExplainService — what request handlers call.

use std::sync::Arc;

use serde::Serialize;

use gridsight_core::errors::ExplainError;

use super::payload::ErrorPayload;
use crate::explain::{ExplanationEngine, FeatureAttribution, PrecomputeReport};

/// Successful response body for an explain request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainEnvelope {
    pub index: i64,
    pub explanation: FeatureAttribution,
}

/// Shares one engine across handlers. Every core failure comes back as an
/// [`ErrorPayload`]; nothing here panics on bad input.
#[derive(Clone)]
pub struct ExplainService {
    engine: Arc<ExplanationEngine>,
}

impl ExplainService {
    pub fn new(engine: Arc<ExplanationEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ExplanationEngine {
        &self.engine
    }

    /// Explain row `index`. Negative indices are out of range.
    pub fn explain(&self, index: i64) -> Result<FeatureAttribution, ErrorPayload> {
        let result = usize::try_from(index)
            .map_err(|_| ExplainError::IndexOutOfRange {
                index,
                row_count: self.engine.row_count(),
            })
            .and_then(|i| self.engine.explain_index(i));

        match result {
            Ok(attribution) => Ok(attribution.as_ref().clone()),
            Err(e) => {
                if e.is_user_facing() {
                    tracing::debug!(index, error = %e, "Explain request rejected");
                } else {
                    tracing::error!(index, error = %e, "Explain request failed");
                }
                Err(ErrorPayload::from(&e))
            }
        }
    }

    /// [`Self::explain`] wrapped in the `{ index, explanation }` envelope.
    pub fn respond(&self, index: i64) -> Result<ExplainEnvelope, ErrorPayload> {
        self.explain(index)
            .map(|explanation| ExplainEnvelope { index, explanation })
    }

    /// Best-effort precompute for indices an external merge step flagged.
    /// Failures are logged, never returned.
    pub fn precompute(&self, indices: &[i64]) -> Option<PrecomputeReport> {
        let negatives = indices.iter().filter(|&&i| i < 0).count();
        let valid: Vec<usize> = indices
            .iter()
            .filter_map(|&i| usize::try_from(i).ok())
            .collect();

        match self.engine.precompute(&valid) {
            Ok(mut report) => {
                report.out_of_range += negatives;
                Some(report)
            }
            Err(e) => {
                tracing::warn!(error = %e, requested = indices.len(), "Precompute skipped");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use gridsight_core::GridsightConfig;

    use super::*;
    use crate::features::FeatureMatrix;
    use crate::model::AnomalyModel;

    struct Constant;

    impl AnomalyModel for Constant {
        fn decision_score(&self, _row: &[f64]) -> f64 {
            -0.25
        }
    }

    fn service(ready: bool) -> ExplainService {
        let matrix = FeatureMatrix::new(
            vec!["usage".into()],
            vec![vec![1.0], vec![2.0], vec![9.0]],
        )
        .unwrap();
        let engine = if ready {
            ExplanationEngine::with_model(matrix, Constant, GridsightConfig::default())
        } else {
            ExplanationEngine::new(matrix, GridsightConfig::default())
        };
        ExplainService::new(Arc::new(engine))
    }

    #[test]
    fn negative_and_large_indices_are_404() {
        let svc = service(true);
        for index in [-1, 3, i64::MAX] {
            let err = svc.explain(index).unwrap_err();
            assert_eq!(err.status, 404, "index {index}");
            assert_eq!(err.code, "INDEX_OUT_OF_RANGE");
        }
    }

    #[test]
    fn unfitted_engine_is_500() {
        let err = service(false).explain(0).unwrap_err();
        assert_eq!(err.status, 500);
        assert_eq!(err.code, "NOT_READY");
    }

    #[test]
    fn respond_wraps_in_envelope() {
        let envelope = service(true).respond(2).unwrap();
        assert_eq!(envelope.index, 2);
        assert_eq!(envelope.explanation.decision_score, -0.25);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["explanation"]["data_point"]["usage"], 9.0);
    }

    #[test]
    fn precompute_never_fails() {
        assert!(service(false).precompute(&[0, 1]).is_none());

        let svc = service(true);
        let report = svc.precompute(&[-4, 0, 2, 7]).unwrap();
        assert_eq!(report.cached, 2);
        assert_eq!(report.out_of_range, 2);
        assert_eq!(svc.engine().cache().indices(), vec![0, 2]);
    }
}
