//! Statistical imputation methods.
//!
//! Median fill for numeric columns and mode fill for categorical columns.
//! The fill value is computed once from the present values before any cell
//! is written.

use crate::error::Result;
use crate::types::{ImputationRecord, ImputationStrategy};
use crate::utils::{fill_numeric_nulls, fill_string_nulls, nan_as_null, require_column, string_mode};
use polars::prelude::*;
use tracing::{debug, warn};

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill the missing values of a numeric column with its median.
    ///
    /// NaN counts as missing. The column becomes `Float64`. A column with no
    /// present value is left untouched.
    pub fn fill_median(df: &mut DataFrame, col_name: &str) -> Result<ImputationRecord> {
        let series = nan_as_null(require_column(df, col_name)?)?;
        let missing = series.null_count();

        let Some(fill_value) = series.median() else {
            warn!("'{}' has no present values, median fill skipped", col_name);
            return Ok(ImputationRecord {
                column: col_name.to_string(),
                strategy: ImputationStrategy::Median,
                fill_value: None,
                filled: 0,
            });
        };

        let filled = fill_numeric_nulls(&series, fill_value)?;
        df.replace(col_name, filled)?;

        debug!("Filled {} missing '{}' values with median {:.2}", missing, col_name, fill_value);
        Ok(ImputationRecord {
            column: col_name.to_string(),
            strategy: ImputationStrategy::Median,
            fill_value: Some(fill_value.to_string()),
            filled: missing,
        })
    }

    /// Fill the missing values of a column with its most frequent value.
    ///
    /// Ties resolve to the smallest value. The column keeps its dtype.
    pub fn fill_mode(df: &mut DataFrame, col_name: &str) -> Result<ImputationRecord> {
        let series = require_column(df, col_name)?;
        let missing = series.null_count();

        let Some(mode_val) = string_mode(series) else {
            warn!("'{}' has no present values, mode fill skipped", col_name);
            return Ok(ImputationRecord {
                column: col_name.to_string(),
                strategy: ImputationStrategy::Mode,
                fill_value: None,
                filled: 0,
            });
        };

        let filled = fill_string_nulls(series, &mode_val)?;
        df.replace(col_name, filled)?;

        debug!("Filled {} missing '{}' values with mode '{}'", missing, col_name, mode_val);
        Ok(ImputationRecord {
            column: col_name.to_string(),
            strategy: ImputationStrategy::Mode,
            fill_value: Some(mode_val),
            filled: missing,
        })
    }
}
