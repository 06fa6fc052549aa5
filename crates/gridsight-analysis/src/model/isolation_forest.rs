//! Isolation forest outlier scoring.
//!
//! Anomalies are few and different, so random axis-aligned splits isolate
//! them in fewer steps than inliers. The anomaly score of a row is
//! `2^(-E[h(x)] / c(ψ))` where `h` is the path length in one tree and `ψ`
//! the per-tree sample size. The decision threshold is placed at the
//! `contamination` quantile of the training scores.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use gridsight_core::config::ModelConfig;
use gridsight_core::constants::MAX_CONTAMINATION;
use gridsight_core::errors::ModelError;

use super::tree::{average_path_length, IsolationTree};
use super::{AnomalyModel, Prediction};
use crate::features::FeatureMatrix;

/// A fitted isolation forest. Immutable after [`IsolationForest::fit`].
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    sample_size: usize,
    normalizer: f64,
    offset: f64,
    contamination: f64,
    feature_count: usize,
}

impl IsolationForest {
    /// Fit over every row of `matrix`.
    ///
    /// Trees are grown in parallel; each draws from its own RNG seeded from
    /// `(config.seed, tree index)`, so the fitted model does not depend on
    /// thread scheduling.
    pub fn fit(matrix: &FeatureMatrix, config: &ModelConfig) -> Result<Self, ModelError> {
        validate(config)?;
        if matrix.is_empty() {
            return Err(ModelError::EmptyMatrix);
        }

        let rows = matrix.row_count();
        let sample_size = config.max_samples.min(rows);
        let max_depth = (sample_size as f64).log2().ceil().max(0.0) as usize;

        let trees: Vec<IsolationTree> = (0..config.n_estimators)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(tree_seed(config.seed, t));
                let mut sample = rand::seq::index::sample(&mut rng, rows, sample_size).into_vec();
                IsolationTree::build(matrix, &mut sample, max_depth, &mut rng)
            })
            .collect();

        let mut forest = Self {
            trees,
            sample_size,
            normalizer: average_path_length(sample_size),
            offset: 0.0,
            contamination: config.contamination,
            feature_count: matrix.feature_count(),
        };

        let training_scores: Vec<f64> = (0..rows)
            .into_par_iter()
            .map(|i| forest.score_sample(matrix.row(i).unwrap_or(&[])))
            .collect();
        forest.offset = percentile(&training_scores, 100.0 * config.contamination);

        tracing::info!(
            rows,
            features = forest.feature_count,
            trees = forest.trees.len(),
            sample_size,
            offset = forest.offset,
            "Fitted isolation forest"
        );
        Ok(forest)
    }

    /// Negated anomaly score in `[-1, 0)`. Lower is more anomalous.
    pub fn score_sample(&self, row: &[f64]) -> f64 {
        let mean_path =
            self.trees.iter().map(|t| t.path_length(row)).sum::<f64>() / self.trees.len() as f64;
        let exponent = if self.normalizer > 0.0 {
            mean_path / self.normalizer
        } else {
            0.0
        };
        -(2.0f64.powf(-exponent))
    }

    /// Score subtracted from [`Self::score_sample`] to center the decision
    /// boundary at zero.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn contamination(&self) -> f64 {
        self.contamination
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }
}

impl AnomalyModel for IsolationForest {
    fn decision_score(&self, row: &[f64]) -> f64 {
        self.score_sample(row) - self.offset
    }

    fn predict_batch(&self, matrix: &FeatureMatrix) -> Vec<Prediction> {
        (0..matrix.row_count())
            .into_par_iter()
            .map(|i| self.predict(matrix.row(i).unwrap_or(&[])))
            .collect()
    }
}

fn validate(config: &ModelConfig) -> Result<(), ModelError> {
    if !(config.contamination > 0.0 && config.contamination <= MAX_CONTAMINATION) {
        return Err(ModelError::InvalidContamination {
            value: config.contamination,
        });
    }
    if config.n_estimators == 0 {
        return Err(ModelError::InvalidParameter {
            name: "n_estimators",
            reason: "must be at least 1".to_string(),
        });
    }
    if config.max_samples == 0 {
        return Err(ModelError::InvalidParameter {
            name: "max_samples",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn tree_seed(seed: u64, tree: usize) -> u64 {
    seed ^ (tree as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Percentile with linear interpolation between closest ranks.
fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let rank = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}
