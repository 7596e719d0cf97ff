//! Imputation module for handling missing values.
//!
//! Provides the statistical fills (median for numeric columns, mode for
//! categorical columns) used by the cleaner.

mod statistical;

pub use statistical::StatisticalImputer;
