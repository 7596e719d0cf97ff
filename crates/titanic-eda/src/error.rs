//! Custom error types for the EDA pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Only
//! [`EdaError::DatasetNotFound`] is handled by the binary; every other
//! variant propagates to the top and ends the run.

use plotters::drawing::DrawingAreaErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the EDA pipeline.
#[derive(Error, Debug)]
pub enum EdaError {
    /// The source dataset file does not exist.
    #[error("Dataset file not found: {}", .0.display())]
    DatasetNotFound(PathBuf),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// No valid values found in a column for computation.
    #[error("No valid values found in column '{0}'")]
    NoValidValues(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A plot could not be drawn or encoded.
    #[error("Failed to render {plot}: {reason}")]
    Render { plot: String, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable code for the error kind, used in log lines.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DatasetNotFound(_) => "DATASET_NOT_FOUND",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::NoValidValues(_) => "NO_VALID_VALUES",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Render { .. } => "RENDER_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error means the source dataset is missing.
    ///
    /// Looks through any context wrappers.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::DatasetNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Build a render error for the named plot.
    pub fn render(plot: impl Into<String>, reason: impl ToString) -> Self {
        EdaError::Render {
            plot: plot.into(),
            reason: reason.to_string(),
        }
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for EdaError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        EdaError::render("plot", err)
    }
}

/// Result type alias for EDA operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            EdaError::DatasetNotFound(PathBuf::from("x.csv")).error_code(),
            "DATASET_NOT_FOUND"
        );
        assert_eq!(
            EdaError::ColumnNotFound("Age".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
        assert_eq!(EdaError::render("pairplot", "boom").error_code(), "RENDER_FAILED");
    }

    #[test]
    fn test_is_not_found() {
        assert!(EdaError::DatasetNotFound(PathBuf::from("x.csv")).is_not_found());
        assert!(!EdaError::ColumnNotFound("Cabin".to_string()).is_not_found());
    }

    #[test]
    fn test_is_not_found_through_context() {
        let error = EdaError::DatasetNotFound(PathBuf::from("x.csv")).with_context("Loading");
        assert!(error.is_not_found());
        assert_eq!(error.error_code(), "DATASET_NOT_FOUND");
    }

    #[test]
    fn test_with_context() {
        let error = EdaError::ColumnNotFound("Embarked".to_string()).with_context("During cleaning");
        assert!(error.to_string().contains("During cleaning"));
        assert!(error.to_string().contains("Embarked"));
        assert_eq!(error.error_code(), "COLUMN_NOT_FOUND"); // Preserves original code
    }

    #[test]
    fn test_render_message() {
        let error = EdaError::render("boxplot_Age.png", "backend error");
        assert_eq!(
            error.to_string(),
            "Failed to render boxplot_Age.png: backend error"
        );
    }
}
