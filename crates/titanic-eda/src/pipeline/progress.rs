//! Stages of an EDA run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stages of the EDA pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdaStage {
    /// Reading the source dataset
    Loading,
    /// Filling missing values and dropping columns
    Cleaning,
    /// Printing descriptive statistics and the schema
    Summarizing,
    /// Rendering the plot images
    Visualizing,
    /// Writing the narrative report
    Reporting,
}

impl EdaStage {
    /// Every stage in the order the pipeline runs them.
    pub const ALL: [EdaStage; 5] = [
        Self::Loading,
        Self::Cleaning,
        Self::Summarizing,
        Self::Visualizing,
        Self::Reporting,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Dataset",
            Self::Cleaning => "Cleaning Data",
            Self::Summarizing => "Summarizing Dataset",
            Self::Visualizing => "Generating Plots",
            Self::Reporting => "Writing Report",
        }
    }

    /// One-based position of the stage in the run.
    pub fn step(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).map_or(0, |i| i + 1)
    }
}

impl fmt::Display for EdaStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
