//! Dataset summarization.
//!
//! Computes the descriptive statistics, schema listing and correlation
//! matrix of a loaded dataset. Nothing here mutates the frame.

pub mod statistics;

use crate::error::Result;
use crate::types::{ColumnInfo, CorrelationMatrix, DatasetSummary, NumericSummary};
use crate::utils::{nan_as_null, numeric_column_names, present_values, require_column};
use polars::prelude::cov::pearson_corr;
use polars::prelude::*;
use std::fmt::Write as _;
use tracing::debug;

use statistics::{mean, quantile_sorted, sample_std, sorted};

/// Row labels of the describe table, in print order.
const DESCRIBE_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Read-only statistics over a dataset.
pub struct DataProfiler;

impl DataProfiler {
    /// Build the full summary printed by the summarizer stage.
    pub fn summarize(df: &DataFrame) -> Result<DatasetSummary> {
        let numeric = Self::describe(df)?;
        let columns = Self::schema(df);

        let mut dtype_counts: Vec<(String, usize)> = Vec::new();
        for info in &columns {
            match dtype_counts.iter_mut().find(|(dtype, _)| *dtype == info.dtype) {
                Some((_, count)) => *count += 1,
                None => dtype_counts.push((info.dtype.clone(), 1)),
            }
        }

        Ok(DatasetSummary {
            shape: df.shape(),
            numeric,
            columns,
            dtype_counts,
            estimated_bytes: df.estimated_size(),
        })
    }

    /// Descriptive statistics for every numeric column.
    pub fn describe(df: &DataFrame) -> Result<Vec<NumericSummary>> {
        numeric_column_names(df)
            .into_iter()
            .map(|name| -> Result<NumericSummary> {
                let values = present_values(require_column(df, &name)?)?;
                Ok(Self::describe_values(name, &values))
            })
            .collect()
    }

    /// Descriptive statistics of one column's present values.
    pub fn describe_values(name: impl Into<String>, values: &[f64]) -> NumericSummary {
        let sorted = sorted(values);
        let quantile = |q| quantile_sorted(&sorted, q).unwrap_or(f64::NAN);

        NumericSummary {
            name: name.into(),
            count: values.len(),
            mean: mean(values).unwrap_or(f64::NAN),
            std: sample_std(values).unwrap_or(f64::NAN),
            min: quantile(0.0),
            q25: quantile(0.25),
            median: quantile(0.5),
            q75: quantile(0.75),
            max: quantile(1.0),
        }
    }

    /// Name, non-null count and dtype of every column.
    pub fn schema(df: &DataFrame) -> Vec<ColumnInfo> {
        df.get_columns()
            .iter()
            .map(|col| ColumnInfo {
                name: col.name().to_string(),
                non_null_count: col.len() - col.null_count(),
                dtype: col.dtype().to_string(),
            })
            .collect()
    }

    /// Pearson correlation between all numeric columns, pairwise-complete.
    ///
    /// A pair with a constant side, or fewer than two complete rows, is NaN.
    pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
        let columns = numeric_column_names(df);
        let series: Vec<Series> = columns
            .iter()
            .map(|name| nan_as_null(require_column(df, name)?))
            .collect::<Result<_>>()?;

        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = pearson_corr(series[i].f64()?, series[j].f64()?)
                    .filter(|r| r.is_finite())
                    .map_or(f64::NAN, |r| r.clamp(-1.0, 1.0));
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        debug!("Correlation matrix computed over {} columns", n);
        Ok(CorrelationMatrix { columns, values })
    }
}

impl NumericSummary {
    /// Statistic values in [`DESCRIBE_ROWS`] order.
    fn row_values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", value)
    }
}

impl DatasetSummary {
    /// Render the describe block: one row per statistic, one column per
    /// numeric feature.
    pub fn describe_table(&self) -> String {
        let label_width = DESCRIBE_ROWS.iter().map(|r| r.len()).max().unwrap_or(0);

        let cells: Vec<Vec<String>> = self
            .numeric
            .iter()
            .map(|s| s.row_values().iter().map(|v| format_stat(*v)).collect())
            .collect();
        let widths: Vec<usize> = self
            .numeric
            .iter()
            .zip(&cells)
            .map(|(s, col)| {
                col.iter()
                    .map(String::len)
                    .chain(std::iter::once(s.name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let _ = write!(out, "{:label_width$}", "");
        for (s, width) in self.numeric.iter().zip(&widths) {
            let _ = write!(out, "  {:>width$}", s.name);
        }
        out.push('\n');

        for (row, label) in DESCRIBE_ROWS.iter().enumerate() {
            let _ = write!(out, "{:<label_width$}", label);
            for (col, width) in cells.iter().zip(&widths) {
                let _ = write!(out, "  {:>width$}", col[row]);
            }
            out.push('\n');
        }
        out
    }

    /// Render the schema block: entries, per-column non-null counts and
    /// dtypes, dtype tally and memory estimate.
    pub fn info_table(&self) -> String {
        let (rows, cols) = self.shape;
        let name_width = self
            .columns
            .iter()
            .map(|c| c.name.len())
            .chain(std::iter::once("Column".len()))
            .max()
            .unwrap_or(0);
        let count_width = self
            .columns
            .iter()
            .map(|c| format!("{} non-null", c.non_null_count).len())
            .chain(std::iter::once("Non-Null Count".len()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "DataFrame");
        if rows == 0 {
            let _ = writeln!(out, "Index: 0 entries");
        } else {
            let _ = writeln!(out, "Index: {} entries, 0 to {}", rows, rows - 1);
        }
        let _ = writeln!(out, "Data columns (total {} columns):", cols);
        let _ = writeln!(
            out,
            " {:<3} {:<name_width$}  {:<count_width$}  Dtype",
            "#", "Column", "Non-Null Count"
        );
        let _ = writeln!(
            out,
            " {:<3} {:<name_width$}  {:<count_width$}  -----",
            "---",
            "-".repeat("Column".len()),
            "-".repeat("Non-Null Count".len())
        );
        for (idx, info) in self.columns.iter().enumerate() {
            let _ = writeln!(
                out,
                " {:<3} {:<name_width$}  {:<count_width$}  {}",
                idx,
                info.name,
                format!("{} non-null", info.non_null_count),
                info.dtype
            );
        }

        let dtypes: Vec<String> = self
            .dtype_counts
            .iter()
            .map(|(dtype, count)| format!("{}({})", dtype, count))
            .collect();
        let _ = writeln!(out, "dtypes: {}", dtypes.join(", "));
        let _ = writeln!(
            out,
            "memory usage: {:.1}+ KB",
            self.estimated_bytes as f64 / 1024.0
        );
        out
    }

    /// Describe row of the named column.
    pub fn numeric_column(&self, name: &str) -> Option<&NumericSummary> {
        self.numeric.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        df![
            "PassengerId" => [1i64, 2, 3, 4, 5],
            "Survived" => [0i64, 1, 1, 1, 0],
            "Name" => ["Braund", "Cumings", "Heikkinen", "Futrelle", "Allen"],
            "Age" => [Some(22.0), Some(38.0), Some(26.0), None, Some(35.0)],
            "Fare" => [7.25, 71.2833, 7.925, 53.1, 8.05],
        ]
        .unwrap()
    }

    #[test]
    fn test_describe_numeric_only() {
        let summaries = DataProfiler::describe(&sample_df()).unwrap();
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["PassengerId", "Survived", "Age", "Fare"]);
    }

    #[test]
    fn test_describe_skips_missing() {
        let summaries = DataProfiler::describe(&sample_df()).unwrap();
        let age = summaries.iter().find(|s| s.name == "Age").unwrap();
        assert_eq!(age.count, 4);
        assert_eq!(age.min, 22.0);
        assert_eq!(age.max, 38.0);
        assert!((age.mean - 30.25).abs() < 1e-9);
        // sorted [22, 26, 35, 38]: q25 at pos 0.75
        assert!((age.q25 - 25.0).abs() < 1e-9);
        assert!((age.median - 30.5).abs() < 1e-9);
    }

    #[test]
    fn test_describe_values_single() {
        let summary = DataProfiler::describe_values("x", &[3.0]);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.mean, 3.0);
        assert!(summary.std.is_nan());
    }

    #[test]
    fn test_schema_counts_non_null() {
        let schema = DataProfiler::schema(&sample_df());
        assert_eq!(schema.len(), 5);
        let age = schema.iter().find(|c| c.name == "Age").unwrap();
        assert_eq!(age.non_null_count, 4);
        assert_eq!(age.dtype, DataType::Float64.to_string());
    }

    #[test]
    fn test_summary_does_not_mutate() {
        let df = sample_df();
        let before = df.clone();
        let _ = DataProfiler::summarize(&df).unwrap();
        assert!(df.equals_missing(&before));
    }

    #[test]
    fn test_dtype_counts() {
        let summary = DataProfiler::summarize(&sample_df()).unwrap();
        let total: usize = summary.dtype_counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 5);
        assert_eq!(summary.dtype_counts[0], (DataType::Int64.to_string(), 2));
    }

    #[test]
    fn test_describe_table_layout() {
        let summary = DataProfiler::summarize(&sample_df()).unwrap();
        let table = summary.describe_table();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 9);
        assert!(lines[0].contains("PassengerId"));
        assert!(lines[1].starts_with("count"));
        assert!(lines[1].contains("4.000000"));
        assert!(lines[8].starts_with("max"));
        assert!(lines[8].contains("71.283300"));
    }

    #[test]
    fn test_info_table_lists_columns() {
        let summary = DataProfiler::summarize(&sample_df()).unwrap();
        let info = summary.info_table();

        assert!(info.contains("Index: 5 entries, 0 to 4"));
        assert!(info.contains("Data columns (total 5 columns):"));
        assert!(info.contains("4 non-null"));
        assert!(info.contains("dtypes: "));
        assert!(info.contains("memory usage: "));
    }

    #[test]
    fn test_correlation_matrix_symmetric() {
        let matrix = DataProfiler::correlation_matrix(&sample_df()).unwrap();
        assert_eq!(matrix.len(), 4);
        for i in 0..matrix.len() {
            assert!((matrix.values[i][i] - 1.0).abs() < 1e-9);
            for j in 0..matrix.len() {
                let (a, b) = (matrix.values[i][j], matrix.values[j][i]);
                assert!(a == b || (a.is_nan() && b.is_nan()));
            }
        }
        let fare_survived = matrix.get("Fare", "Survived").unwrap();
        assert!(fare_survived > 0.0);
    }

    #[test]
    fn test_correlation_matrix_skips_incomplete_pairs() {
        let df = df![
            "x" => [Some(1.0), None, Some(2.0), Some(3.0)],
            "y" => [Some(1.0), Some(100.0), Some(2.0), Some(3.0)],
            "z" => [Some(3.0), Some(f64::NAN), Some(2.0), Some(1.0)],
        ]
        .unwrap();
        let matrix = DataProfiler::correlation_matrix(&df).unwrap();
        assert!((matrix.get("x", "y").unwrap() - 1.0).abs() < 1e-9);
        assert!((matrix.get("x", "z").unwrap() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_matrix_constant_column_is_nan() {
        let df = df![
            "a" => [1.0, 2.0, 3.0],
            "b" => [5.0, 5.0, 5.0],
        ]
        .unwrap();
        let matrix = DataProfiler::correlation_matrix(&df).unwrap();
        assert!(matrix.get("a", "b").unwrap().is_nan());
        assert!(matrix.get("b", "b").unwrap().is_nan());
        assert_eq!(matrix.range(), Some((1.0, 1.0)));
    }
}
