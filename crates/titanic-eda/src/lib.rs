//! Titanic Exploratory Data Analysis Library
//!
//! A single-pass EDA pipeline over the Titanic passenger dataset, built with
//! Rust, Polars and Plotters.
//!
//! # Overview
//!
//! The pipeline runs five stages strictly in order:
//!
//! - **Loading**: Read the passenger CSV, inferring column types
//! - **Cleaning**: Median-fill `Age`, mode-fill `Embarked`, drop `Cabin`
//! - **Summarizing**: Print descriptive statistics and the schema to stdout
//! - **Visualizing**: Write histograms, boxplots, a correlation heatmap and a pairplot
//! - **Reporting**: Write the narrative `EDA_Inferences.md`
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use titanic_eda::{EdaConfig, EdaPipeline};
//!
//! let outcome = EdaPipeline::new(EdaConfig::default()).run()?;
//!
//! println!("Filled {} cells", outcome.cleaning.cells_filled());
//! for path in &outcome.artifacts {
//!     println!("Plot: {}", path.display());
//! }
//! ```
//!
//! # Using the stages directly
//!
//! ```rust,ignore
//! use titanic_eda::{DataCleaner, DataProfiler, DatasetLoader};
//!
//! let df = DatasetLoader::load("Titanic-Dataset.csv")?;
//! let (df, cleaning) = DataCleaner::default().clean(df)?;
//! let summary = DataProfiler::summarize(&df)?;
//! print!("{}", summary.describe_table());
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod loader;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;
pub mod visualization;

// Re-exports for convenient access
pub use cleaner::DataCleaner;
pub use config::{CleaningPlan, ConfigValidationError, EdaConfig, EdaConfigBuilder, FigureSize};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use loader::DatasetLoader;
pub use pipeline::{EdaPipeline, EdaStage, PipelineOutcome};
pub use profiler::DataProfiler;
pub use reporting::{EDA_INFERENCES, ReportGenerator};
pub use types::{
    CleaningSummary, ColumnInfo, CorrelationMatrix, DatasetSummary, ImputationRecord,
    ImputationStrategy, NumericSummary,
};
pub use visualization::Visualizer;
