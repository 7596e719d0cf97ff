//! Narrative report output.
//!
//! The report is a fixed markdown document describing what the Titanic
//! passenger data typically shows. It is written as-is on every run and
//! does not read the statistics of the current dataset.
//!
//! # Example
//!
//! ```rust,ignore
//! use titanic_eda::reporting::ReportGenerator;
//!
//! let path = ReportGenerator::new("EDA_Inferences.md").write()?;
//! ```

mod generator;

pub use generator::{ReportGenerator, EDA_INFERENCES};
