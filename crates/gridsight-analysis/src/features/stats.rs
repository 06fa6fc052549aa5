//! Per-column mean and sample standard deviation.

use statrs::statistics::Statistics;

use gridsight_core::constants::DEVIATION_EPSILON;

use super::matrix::FeatureMatrix;

/// Column summary used by the deviation attribution.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    means: Vec<f64>,
    std_devs: Vec<f64>,
}

impl ColumnStats {
    /// Compute mean and sample (n - 1) standard deviation for every column.
    ///
    /// With fewer than two rows the sample deviation is undefined; it is
    /// stored as 0 so the epsilon guard applies. A spread that overflows
    /// stays infinite, so every deviation in that column is 0.
    pub fn from_matrix(matrix: &FeatureMatrix) -> Self {
        let width = matrix.feature_count();
        let mut means = Vec::with_capacity(width);
        let mut std_devs = Vec::with_capacity(width);
        for j in 0..width {
            let mean = matrix.column(j).mean();
            let std_dev = matrix.column(j).std_dev();
            means.push(mean);
            std_devs.push(if std_dev.is_nan() { 0.0 } else { std_dev });
        }
        Self { means, std_devs }
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn std_devs(&self) -> &[f64] {
        &self.std_devs
    }

    /// `|value - mean_j| / (std_j + epsilon)`.
    pub fn deviation(&self, column: usize, value: f64) -> f64 {
        (value - self.means[column]).abs() / (self.std_devs[column] + DEVIATION_EPSILON)
    }
}
