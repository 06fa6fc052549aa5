//! Row-major numeric feature matrix.
//!
//! Row identity is the 0-based position in load order. Columns are fixed at
//! construction and every row carries a value for every column.

use std::collections::BTreeMap;

use gridsight_core::errors::FeatureError;
use gridsight_core::FxHashMap;

/// Label used in errors for matrices built in memory.
const IN_MEMORY_SOURCE: &str = "<in-memory>";

/// Read-only numeric table. Owned by the feature store's caller and shared
/// immutably with the explanation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    column_lookup: FxHashMap<String, usize>,
    values: Vec<f64>,
    row_count: usize,
}

impl FeatureMatrix {
    /// Build a matrix from row vectors.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, FeatureError> {
        let column_lookup = index_columns(&columns)?;
        let width = columns.len();
        let row_count = rows.len();
        let mut values = Vec::with_capacity(width * row_count);
        for (row, row_values) in rows.into_iter().enumerate() {
            if row_values.len() != width {
                return Err(FeatureError::RaggedRow {
                    row,
                    expected: width,
                    found: row_values.len(),
                });
            }
            values.extend(row_values);
        }
        Ok(Self {
            columns,
            column_lookup,
            values,
            row_count,
        })
    }

    /// Build a matrix from column vectors. All columns must have equal length.
    pub fn from_columns(columns: Vec<String>, data: Vec<Vec<f64>>) -> Result<Self, FeatureError> {
        let column_lookup = index_columns(&columns)?;
        if data.len() != columns.len() {
            return Err(FeatureError::RaggedRow {
                row: 0,
                expected: columns.len(),
                found: data.len(),
            });
        }
        let row_count = data.first().map_or(0, Vec::len);
        if let Some(short) = data.iter().position(|col| col.len() != row_count) {
            return Err(FeatureError::Parse {
                message: format!(
                    "column `{}` has {} values, expected {row_count}",
                    columns[short],
                    data[short].len()
                ),
            });
        }
        let width = columns.len();
        let mut values = vec![0.0; width * row_count];
        for (j, column) in data.iter().enumerate() {
            for (i, value) in column.iter().enumerate() {
                values[i * width + j] = *value;
            }
        }
        Ok(Self {
            columns,
            column_lookup,
            values,
            row_count,
        })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn feature_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, features)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Feature names in column order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_lookup.get(name).copied()
    }

    /// Values of row `index`, in column order.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.row_count {
            return None;
        }
        let width = self.columns.len();
        Some(&self.values[index * width..(index + 1) * width])
    }

    /// Iterator over every row.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.columns.len())
    }

    /// Iterator down column `j`. Empty if `j` is out of range.
    pub fn column(&self, j: usize) -> impl Iterator<Item = f64> + '_ {
        let width = self.columns.len();
        let (start, rows) = if j < width { (j, self.row_count) } else { (0, 0) };
        self.values
            .iter()
            .skip(start)
            .step_by(width.max(1))
            .take(rows)
            .copied()
    }

    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        if column >= self.columns.len() {
            return None;
        }
        self.row(row).map(|r| r[column])
    }

    /// Row `index` keyed by feature name.
    pub fn row_map(&self, index: usize) -> Option<BTreeMap<String, f64>> {
        self.row(index).map(|row| {
            self.columns
                .iter()
                .cloned()
                .zip(row.iter().copied())
                .collect()
        })
    }
}

fn index_columns(columns: &[String]) -> Result<FxHashMap<String, usize>, FeatureError> {
    if columns.is_empty() {
        return Err(FeatureError::EmptyFeatureSet {
            path: IN_MEMORY_SOURCE.to_string(),
        });
    }
    let mut lookup = FxHashMap::default();
    for (j, name) in columns.iter().enumerate() {
        if lookup.insert(name.clone(), j).is_some() {
            return Err(FeatureError::DuplicateColumn { name: name.clone() });
        }
    }
    Ok(lookup)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rows_and_columns_agree() {
        let m = FeatureMatrix::new(
            cols(&["a", "b"]),
            vec![vec![0.0, 0.0], vec![10.0, 10.0], vec![0.0, 10.0]],
        )
        .unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.row(2), Some(&[0.0, 10.0][..]));
        assert_eq!(m.column(1).collect::<Vec<_>>(), vec![0.0, 10.0, 10.0]);
        assert_eq!(m.value(1, 0), Some(10.0));
        assert_eq!(m.column_index("b"), Some(1));
        assert!(m.row(3).is_none());
        assert_eq!(m.column(5).count(), 0);
        assert_eq!(m.rows().len(), 3);
    }

    #[test]
    fn from_columns_transposes() {
        let by_row =
            FeatureMatrix::new(cols(&["a", "b"]), vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let by_col = FeatureMatrix::from_columns(
            cols(&["a", "b"]),
            vec![vec![1.0, 3.0], vec![2.0, 4.0]],
        )
        .unwrap();
        assert_eq!(by_row, by_col);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err =
            FeatureMatrix::new(cols(&["a", "b"]), vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, FeatureError::RaggedRow { row: 1, expected: 2, found: 1 }));
    }

    #[test]
    fn duplicate_and_missing_columns_are_rejected() {
        assert!(matches!(
            FeatureMatrix::new(cols(&["a", "a"]), vec![]),
            Err(FeatureError::DuplicateColumn { .. })
        ));
        assert!(matches!(
            FeatureMatrix::new(Vec::new(), vec![]),
            Err(FeatureError::EmptyFeatureSet { .. })
        ));
    }

    #[test]
    fn row_map_keys_by_name() {
        let m = FeatureMatrix::new(cols(&["load", "temp"]), vec![vec![1.5, 20.0]]).unwrap();
        let row = m.row_map(0).unwrap();
        assert_eq!(row["load"], 1.5);
        assert_eq!(row["temp"], 20.0);
    }
}
