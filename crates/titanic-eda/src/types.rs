use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptive statistics of one numeric column (a `describe()` column).
///
/// Statistics that are undefined for the column (e.g. the standard
/// deviation of a single value) are `NaN`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Schema entry of one column (an `info()` row).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null_count: usize,
    pub dtype: String,
}

/// Everything the summarizer prints about the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub shape: (usize, usize),
    pub numeric: Vec<NumericSummary>,
    pub columns: Vec<ColumnInfo>,
    /// Number of columns per dtype, in order of first appearance.
    pub dtype_counts: Vec<(String, usize)>,
    /// Estimated heap size of the frame in bytes.
    pub estimated_bytes: usize,
}

/// How a column's missing values were filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImputationStrategy {
    Median,
    Mode,
}

impl fmt::Display for ImputationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Median => write!(f, "median"),
            Self::Mode => write!(f, "mode"),
        }
    }
}

/// One imputation performed by the cleaner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImputationRecord {
    pub column: String,
    pub strategy: ImputationStrategy,
    /// Rendered fill value; `None` when the column had no present value.
    pub fill_value: Option<String>,
    /// Number of cells that were missing and got filled.
    pub filled: usize,
}

/// What the cleaner did to the dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub rows_before: usize,
    pub rows_after: usize,
    pub imputations: Vec<ImputationRecord>,
    pub dropped_columns: Vec<String>,
}

impl CleaningSummary {
    /// Total number of cells filled across all imputations.
    pub fn cells_filled(&self) -> usize {
        self.imputations.iter().map(|r| r.filled).sum()
    }
}

/// Pearson correlation matrix over the numeric columns.
///
/// `values[i][j]` correlates `columns[i]` with `columns[j]`; undefined
/// entries are `NaN`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Correlation between two named columns, if both are in the matrix.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Smallest and largest defined entries.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
