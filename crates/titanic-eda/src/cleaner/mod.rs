//! Data cleaning for the EDA run.
//!
//! The cleaner takes ownership of the loaded dataset and returns the cleaned
//! one, so no uncleaned alias outlives this stage. It:
//! - fills missing numeric values with the column median
//! - fills missing categorical values with the column mode
//! - drops configured columns outright
//!
//! Rows are never removed and untouched columns keep their position and
//! values.

use crate::config::CleaningPlan;
use crate::error::{EdaError, Result, ResultExt};
use crate::imputers::StatisticalImputer;
use crate::types::CleaningSummary;
use polars::prelude::*;
use tracing::{debug, info};

/// Data cleaner applying a fixed [`CleaningPlan`].
pub struct DataCleaner {
    plan: CleaningPlan,
}

impl DataCleaner {
    pub fn new(plan: CleaningPlan) -> Self {
        Self { plan }
    }

    /// Clean the dataset according to the plan.
    ///
    /// Median fills run first, then mode fills, then column drops. Every
    /// column the plan names must exist.
    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, CleaningSummary)> {
        let mut df = df;
        let mut summary = CleaningSummary {
            rows_before: df.height(),
            ..Default::default()
        };

        info!("Cleaning dataset ({} rows x {} columns)", df.height(), df.width());

        for col in &self.plan.median_fill {
            let record = StatisticalImputer::fill_median(&mut df, col)
                .context(format!("Median fill of '{}'", col))?;
            summary.imputations.push(record);
        }

        for col in &self.plan.mode_fill {
            let record = StatisticalImputer::fill_mode(&mut df, col)
                .context(format!("Mode fill of '{}'", col))?;
            summary.imputations.push(record);
        }

        for col in &self.plan.drop_columns {
            df.drop_in_place(col)
                .map_err(|_| EdaError::ColumnNotFound(col.clone()))?;
            debug!("Dropped column '{}'", col);
            summary.dropped_columns.push(col.clone());
        }

        summary.rows_after = df.height();
        debug_assert_eq!(summary.rows_before, summary.rows_after);

        for record in &summary.imputations {
            info!(
                "Filled {} missing '{}' values with {} {}",
                record.filled,
                record.column,
                record.strategy,
                record.fill_value.as_deref().unwrap_or("(none)")
            );
        }

        Ok((df, summary))
    }
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new(CleaningPlan::default())
    }
}
