//! Shared helpers over polars columns.
//!
//! Common conversions used by the cleaner, the profiler and the visualizer
//! to move between polars series and plain Rust vectors.

use crate::error::{EdaError, Result};
use polars::prelude::*;
use std::collections::BTreeMap;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Names of the numeric columns, in frame order.
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|c| is_numeric_dtype(c.dtype()))
        .map(|c| c.name().to_string())
        .collect()
}

/// Look up a column, mapping the polars error to [`EdaError::ColumnNotFound`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|c| c.as_materialized_series())
        .map_err(|_| EdaError::ColumnNotFound(name.to_string()))
}

// =============================================================================
// Series Extraction Utilities
// =============================================================================

/// Values of a numeric series as `f64`, one entry per row, `None` for missing.
///
/// NaN is treated as missing.
pub fn optional_values(series: &Series) -> Result<Vec<Option<f64>>> {
    let float_series = series.cast(&DataType::Float64)?;
    let values = float_series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values)
}

/// Cast a numeric series to `Float64` with NaN turned into null, so polars
/// aggregations skip it the way they skip nulls.
pub fn nan_as_null(series: &Series) -> Result<Series> {
    let values: Float64Chunked = optional_values(series)?.into_iter().collect();
    Ok(values.with_name(series.name().clone()).into_series())
}

/// Present values of a numeric series as `f64`, in row order.
pub fn present_values(series: &Series) -> Result<Vec<f64>> {
    Ok(optional_values(series)?.into_iter().flatten().collect())
}

/// Present values of a numeric column, looked up by name.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    present_values(require_column(df, name)?)
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Calculate the mode (most frequent value) of a series, rendered as text.
///
/// Ties resolve to the smallest value, so the result does not depend on
/// hashing order.
pub fn string_mode(series: &Series) -> Option<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return None;
    }

    let str_series = non_null.cast(&DataType::String).ok()?;
    let str_chunked = str_series.str().ok()?;

    let mut value_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for val in str_chunked.into_iter().flatten() {
        *value_counts.entry(val).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (val, count) in value_counts {
        // strict comparison keeps the first (smallest) key among equal counts
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((val, count));
        }
    }
    best.map(|(val, _)| val.to_string())
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null and NaN values in a numeric Series with a specific value.
///
/// The result is a `Float64` series with the same name.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let float_series = series.cast(&DataType::Float64)?;
    let filled: Float64Chunked = float_series
        .f64()?
        .into_iter()
        .map(|v| Some(v.filter(|x| !x.is_nan()).unwrap_or(fill_value)))
        .collect();
    Ok(filled.with_name(series.name().clone()).into_series())
}

/// Fill null values in a Series with a value given as text.
///
/// The series is filled as `String` and cast back to its original dtype,
/// so a categorical text column stays text and an integer column stays
/// integer.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let original_dtype = series.dtype().clone();
    let str_series = series.cast(&DataType::String)?;
    let filled: StringChunked = str_series
        .str()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();
    let filled = filled.with_name(series.name().clone()).into_series();

    if original_dtype == DataType::String {
        Ok(filled)
    } else {
        filled.cast(&original_dtype)
    }
}

// =============================================================================
// Tests
// =============================================================================
