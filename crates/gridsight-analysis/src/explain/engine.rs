//! ExplanationEngine — owns the fitted model, the column statistics, and
//! the explanation cache for one feature matrix.
//!
//! The engine starts `Uninitialized`. `fit()` moves it to `Ready` exactly
//! once; there is no way back. Once ready, every query takes `&self`, so
//! the engine is shared across request handlers behind an `Arc`.

use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Instant;

use gridsight_core::config::GridsightConfig;
use gridsight_core::errors::{ExplainError, GridsightError};

use super::attribution::FeatureAttribution;
use super::cache::{CacheStats, ExplanationCache};
use super::report::PrecomputeReport;
use crate::features::{ColumnStats, FeatureMatrix, FeatureStore};
use crate::model::{AnomalyModel, IsolationForest};

/// Lifecycle of an [`ExplanationEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Ready,
}

/// Everything that exists only after fitting.
struct Fitted {
    model: Box<dyn AnomalyModel>,
    stats: ColumnStats,
}

pub struct ExplanationEngine {
    matrix: Arc<FeatureMatrix>,
    config: GridsightConfig,
    fitted: OnceLock<Fitted>,
    fit_lock: Mutex<()>,
    cache: ExplanationCache,
}

impl ExplanationEngine {
    /// Create an unfitted engine over `matrix`.
    pub fn new(matrix: impl Into<Arc<FeatureMatrix>>, config: GridsightConfig) -> Self {
        Self {
            matrix: matrix.into(),
            config,
            fitted: OnceLock::new(),
            fit_lock: Mutex::new(()),
            cache: ExplanationCache::new(),
        }
    }

    /// Create a ready engine around an already-fitted model.
    pub fn with_model(
        matrix: impl Into<Arc<FeatureMatrix>>,
        model: impl AnomalyModel + 'static,
        config: GridsightConfig,
    ) -> Self {
        let engine = Self::new(matrix, config);
        let stats = ColumnStats::from_matrix(&engine.matrix);
        // A fresh OnceLock always accepts the first value.
        let _ = engine.fitted.set(Fitted {
            model: Box::new(model),
            stats,
        });
        engine
    }

    /// Load the feature source, fit, and precompute explanations for the
    /// rows the model flags.
    pub fn from_source(
        path: impl AsRef<Path>,
        config: GridsightConfig,
    ) -> Result<Self, GridsightError> {
        config.validate()?;
        let matrix = FeatureStore::with_config(config.features.clone()).load(path)?;
        let engine = Self::new(matrix, config);
        engine.fit()?;
        engine.precompute_for_anomalies()?;
        Ok(engine)
    }

    /// Fit the isolation forest. Idempotent: once ready, later calls
    /// return immediately.
    pub fn fit(&self) -> Result<(), ExplainError> {
        if self.fitted.get().is_some() {
            return Ok(());
        }
        let _guard = self.fit_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if self.fitted.get().is_some() {
            return Ok(());
        }

        let model = IsolationForest::fit(&self.matrix, &self.config.model)?;
        let stats = ColumnStats::from_matrix(&self.matrix);
        let _ = self.fitted.set(Fitted {
            model: Box::new(model),
            stats,
        });
        tracing::debug!(rows = self.matrix.row_count(), "Explanation engine ready");
        Ok(())
    }

    pub fn state(&self) -> EngineState {
        if self.fitted.get().is_some() {
            EngineState::Ready
        } else {
            EngineState::Uninitialized
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == EngineState::Ready
    }

    pub fn matrix(&self) -> &FeatureMatrix {
        &self.matrix
    }

    pub fn row_count(&self) -> usize {
        self.matrix.row_count()
    }

    pub fn config(&self) -> &GridsightConfig {
        &self.config
    }

    /// The fitted model.
    pub fn model(&self) -> Result<&dyn AnomalyModel, ExplainError> {
        self.fitted().map(|f| f.model.as_ref())
    }

    pub fn cache(&self) -> &ExplanationCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Explain row `index`.
    ///
    /// Served from the cache when a precompute pass stored it, otherwise
    /// computed fresh. The fresh path never writes to the cache.
    pub fn explain_index(&self, index: usize) -> Result<Arc<FeatureAttribution>, ExplainError> {
        let fitted = self.fitted()?;
        if index >= self.matrix.row_count() {
            return Err(ExplainError::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                row_count: self.matrix.row_count(),
            });
        }
        if let Some(cached) = self.cache.get(index) {
            return Ok(cached);
        }
        self.attribute(fitted, index).map(Arc::new)
    }

    /// Cache explanations for the rows the model predicts anomalous,
    /// lowest indices first, up to the per-batch cap.
    pub fn precompute_for_anomalies(&self) -> Result<PrecomputeReport, ExplainError> {
        let fitted = self.fitted()?;
        let flagged = fitted.model.anomaly_indices(&self.matrix);
        tracing::info!(anomalies = flagged.len(), "Computing explanations for flagged rows");
        Ok(self.run_batch(fitted, flagged, None))
    }

    /// Cache explanations for host-supplied anomaly indices. Duplicates
    /// collapse, out-of-range indices are skipped, and at most the cap's
    /// worth of the lowest indices are computed.
    pub fn precompute(&self, indices: &[usize]) -> Result<PrecomputeReport, ExplainError> {
        let fitted = self.fitted()?;
        Ok(self.run_batch(fitted, indices.to_vec(), None))
    }

    /// [`Self::precompute`], stopping early once `deadline` passes.
    /// Whatever was cached before the deadline stays cached.
    pub fn precompute_until(
        &self,
        indices: &[usize],
        deadline: Instant,
    ) -> Result<PrecomputeReport, ExplainError> {
        let fitted = self.fitted()?;
        Ok(self.run_batch(fitted, indices.to_vec(), Some(deadline)))
    }

    fn fitted(&self) -> Result<&Fitted, ExplainError> {
        self.fitted.get().ok_or(ExplainError::NotReady)
    }

    fn attribute(&self, fitted: &Fitted, index: usize) -> Result<FeatureAttribution, ExplainError> {
        FeatureAttribution::compute(index, &self.matrix, &fitted.stats, fitted.model.as_ref())
    }

    fn run_batch(
        &self,
        fitted: &Fitted,
        mut candidates: Vec<usize>,
        deadline: Option<Instant>,
    ) -> PrecomputeReport {
        candidates.sort_unstable();
        candidates.dedup();

        let row_count = self.matrix.row_count();
        let in_range = candidates.partition_point(|&i| i < row_count);
        let out_of_range = candidates.len() - in_range;
        if out_of_range > 0 {
            tracing::warn!(out_of_range, row_count, "Ignoring out-of-range precompute indices");
        }
        candidates.truncate(in_range);

        let flagged = candidates.len();
        candidates.truncate(self.config.explain.precompute_cap);

        let mut report = PrecomputeReport {
            flagged,
            selected: candidates.len(),
            out_of_range,
            ..PrecomputeReport::default()
        };

        for index in candidates {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                report.truncated = true;
                tracing::warn!(
                    cached = report.cached,
                    selected = report.selected,
                    "Precompute deadline reached, remaining rows fall back to on-demand"
                );
                break;
            }
            if self.cache.contains(index) {
                report.already_cached += 1;
                continue;
            }
            match self.attribute(fitted, index) {
                Ok(attribution) => {
                    if self.cache.insert_if_absent(index, attribution) {
                        report.cached += 1;
                    } else {
                        report.already_cached += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping row in precompute pass");
                    report.skipped.push(index);
                }
            }
        }

        tracing::info!(
            flagged = report.flagged,
            cached = report.cached,
            skipped = report.skipped.len(),
            total = self.cache.len(),
            "Precomputed explanations"
        );
        report
    }
}
