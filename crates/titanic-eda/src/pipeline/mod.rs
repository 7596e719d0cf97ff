//! Pipeline module.
//!
//! Runs the five EDA stages strictly in sequence:
//! loading, cleaning, summarizing, visualizing, reporting. Each stage
//! completes before the next starts and any error ends the run.

pub mod progress;

pub use progress::EdaStage;

use crate::cleaner::DataCleaner;
use crate::config::EdaConfig;
use crate::error::{EdaError, Result, ResultExt};
use crate::loader::DatasetLoader;
use crate::profiler::DataProfiler;
use crate::reporting::ReportGenerator;
use crate::types::{CleaningSummary, DatasetSummary};
use crate::visualization::Visualizer;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// What a completed run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub cleaning: CleaningSummary,
    /// Statistics of the cleaned dataset, as printed.
    pub summary: DatasetSummary,
    /// Plot images, in the order they were written.
    pub artifacts: Vec<PathBuf>,
    pub report_path: PathBuf,
    pub duration: Duration,
}

/// The EDA pipeline over one dataset.
pub struct EdaPipeline {
    config: EdaConfig,
}

static_assertions::assert_impl_all!(EdaPipeline: Send);

impl EdaPipeline {
    pub fn new(config: EdaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EdaConfig {
        &self.config
    }

    /// Run every stage once.
    ///
    /// Progress banners and the summary tables go to stdout. A missing
    /// dataset fails before any output is written.
    pub fn run(&self) -> Result<PipelineOutcome> {
        let start_time = Instant::now();
        self.config
            .validate()
            .map_err(|e| EdaError::InvalidConfig(e.to_string()))?;

        info!("Starting EDA pipeline...");

        Self::enter(EdaStage::Loading);
        let df = DatasetLoader::load(&self.config.dataset_path)?;

        Self::enter(EdaStage::Cleaning);
        let (df, cleaning) = DataCleaner::new(self.config.cleaning.clone())
            .clean(df)
            .context(EdaStage::Cleaning.display_name())?;

        Self::enter(EdaStage::Summarizing);
        let summary = DataProfiler::summarize(&df).context(EdaStage::Summarizing.display_name())?;
        println!("--- Summary Statistics ---");
        print!("{}", summary.describe_table());
        println!("\n--- Data Info ---");
        print!("{}", summary.info_table());

        Self::enter(EdaStage::Visualizing);
        let visualizer = Visualizer::new(&self.config);
        let plots_dir = visualizer.plots_dir().display().to_string();
        visualizer.prepare_output_dir()?;

        println!("\n--- Generating Histograms and Boxplots ---");
        let mut artifacts = visualizer.render_distributions(&df)?;
        println!("Histograms and boxplots saved in the '{}' directory.", plots_dir);

        println!("\n--- Generating Pairplot and Correlation Matrix ---");
        artifacts.extend(visualizer.render_relationships(&df)?);
        println!("Pairplot and correlation matrix saved in the '{}' directory.", plots_dir);

        Self::enter(EdaStage::Reporting);
        let report_path = ReportGenerator::new(&self.config.report_path).write()?;
        println!("\n--- Analysis Complete ---");
        println!(
            "Inferences and observations have been saved to '{}'.",
            report_path.display()
        );

        let duration = start_time.elapsed();
        info!(
            "EDA pipeline finished in {:.2}s: {} plots, {} cells filled",
            duration.as_secs_f64(),
            artifacts.len(),
            cleaning.cells_filled()
        );

        Ok(PipelineOutcome {
            cleaning,
            summary,
            artifacts,
            report_path,
            duration,
        })
    }

    fn enter(stage: EdaStage) {
        info!("Step {}/{}: {}", stage.step(), EdaStage::ALL.len(), stage);
    }
}
