//! Feature store: loads a delimited table with a header row and keeps
//! only the numeric, non-timestamp columns.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use gridsight_core::config::FeatureConfig;
use gridsight_core::errors::FeatureError;
use gridsight_core::FxHashSet;

use super::matrix::FeatureMatrix;

/// Loads feature matrices. Holds no state beyond its configuration.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    config: FeatureConfig,
}

/// A candidate column while the table is being read.
struct ColumnScan {
    name: String,
    position: usize,
    values: Vec<f64>,
    numeric: bool,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Load the table at `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<FeatureMatrix, FeatureError> {
        let path = path.as_ref();
        let label = path.display().to_string();
        if !path.exists() {
            return Err(FeatureError::NotFound { path: label });
        }
        let file = File::open(path)?;
        self.load_from_reader(file, &label)
    }

    /// Load a table from any reader. `source` names it in logs and errors.
    pub fn load_from_reader<R: Read>(
        &self,
        reader: R,
        source: &str,
    ) -> Result<FeatureMatrix, FeatureError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter_byte()?)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().map_err(parse_error)?.clone();
        let mut seen = FxHashSet::default();
        for name in headers.iter() {
            if !seen.insert(name) {
                return Err(FeatureError::DuplicateColumn {
                    name: name.to_string(),
                });
            }
        }

        let mut scans: Vec<ColumnScan> = Vec::new();
        for (position, name) in headers.iter().enumerate() {
            if self.config.is_timestamp_column(name) {
                tracing::debug!(source, column = name, "Dropping timestamp column");
                continue;
            }
            scans.push(ColumnScan {
                name: name.to_string(),
                position,
                values: Vec::new(),
                numeric: true,
            });
        }

        let mut row_count = 0usize;
        for record in rdr.records() {
            let record = record.map_err(parse_error)?;
            for scan in scans.iter_mut().filter(|s| s.numeric) {
                match record.get(scan.position).and_then(parse_numeric) {
                    Some(value) => scan.values.push(value),
                    None => {
                        scan.numeric = false;
                        scan.values = Vec::new();
                    }
                }
            }
            row_count += 1;
        }

        // A header with no data rows carries no evidence of a numeric dtype.
        let (kept, dropped): (Vec<ColumnScan>, Vec<ColumnScan>) = scans
            .into_iter()
            .partition(|s| s.numeric && row_count > 0);
        for scan in &dropped {
            tracing::debug!(source, column = %scan.name, "Dropping non-numeric column");
        }
        if kept.is_empty() {
            return Err(FeatureError::EmptyFeatureSet {
                path: source.to_string(),
            });
        }

        let (names, data): (Vec<String>, Vec<Vec<f64>>) =
            kept.into_iter().map(|s| (s.name, s.values)).unzip();
        let matrix = FeatureMatrix::from_columns(names, data)?;
        tracing::info!(
            source,
            rows = matrix.row_count(),
            features = ?matrix.columns(),
            "Loaded feature matrix"
        );
        Ok(matrix)
    }
}

/// A cell counts as numeric only if it parses to a finite float.
fn parse_numeric(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_error(e: csv::Error) -> FeatureError {
    FeatureError::Parse {
        message: e.to_string(),
    }
}
