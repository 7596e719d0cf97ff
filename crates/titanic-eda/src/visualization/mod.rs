//! Plot rendering.
//!
//! Every plot opens its own bitmap backend on its output path, draws,
//! presents and drops it before the next one starts, so no drawing state is
//! shared between artifacts.
//!
//! Artifacts written to the plots directory:
//! - `histogram_<feature>.png` and `boxplot_<feature>.png` per feature
//! - `correlation_matrix.png`
//! - `pairplot.png`

mod boxplot;
mod heatmap;
mod histogram;
pub mod palette;
mod pairplot;

pub use boxplot::draw_boxplot;
pub use heatmap::{draw_heatmap, HEATMAP_TITLE};
pub use histogram::draw_histogram;
pub use pairplot::{draw_pairplot, HueColumn, PairVariable, PAIRPLOT_TITLE};

use crate::config::EdaConfig;
use crate::error::{EdaError, Result, ResultExt};
use crate::profiler::DataProfiler;
use crate::utils::{column_values, optional_values, require_column};
use polars::prelude::DataFrame;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Font of figure titles.
pub(crate) const TITLE_FONT: (&str, u32) = ("sans-serif", 24);

pub const CORRELATION_FILE: &str = "correlation_matrix.png";
pub const PAIRPLOT_FILE: &str = "pairplot.png";

/// File name of a feature's histogram.
pub fn histogram_file(feature: &str) -> String {
    format!("histogram_{}.png", feature)
}

/// File name of a feature's boxplot.
pub fn boxplot_file(feature: &str) -> String {
    format!("boxplot_{}.png", feature)
}

/// Axis range around `lo..hi` with 5% padding on each side.
///
/// A single value gets a unit-wide range centred on it.
pub fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        let pad = (hi - lo) * 0.05;
        (lo - pad, hi + pad)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

/// Renders the plot catalog of a cleaned dataset.
pub struct Visualizer {
    config: EdaConfig,
}

impl Visualizer {
    pub fn new(config: &EdaConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn plots_dir(&self) -> &Path {
        &self.config.plots_dir
    }

    fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.config.plots_dir.join(file_name)
    }

    /// Create the plots directory if it does not exist yet.
    pub fn prepare_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.config.plots_dir)
            .map_err(EdaError::from)
            .context(format!("Creating '{}'", self.config.plots_dir.display()))?;
        debug!("Plots directory ready: {}", self.config.plots_dir.display());
        Ok(())
    }

    /// Histograms for every feature, then boxplots for every feature.
    pub fn render_distributions(&self, df: &DataFrame) -> Result<Vec<PathBuf>> {
        let figure = self.config.distribution_figure;
        let mut features: Vec<(&str, Vec<f64>)> = Vec::new();
        for feature in &self.config.numeric_features {
            features.push((feature.as_str(), column_values(df, feature)?));
        }

        let mut artifacts = Vec::with_capacity(features.len() * 2);

        for (feature, values) in &features {
            let path = self.artifact_path(&histogram_file(feature));
            draw_histogram(&path, feature, values, figure)
                .context(format!("Rendering {}", path.display()))?;
            info!("Saved {}", path.display());
            artifacts.push(path);
        }

        for (feature, values) in &features {
            let path = self.artifact_path(&boxplot_file(feature));
            draw_boxplot(&path, feature, values, figure)
                .context(format!("Rendering {}", path.display()))?;
            info!("Saved {}", path.display());
            artifacts.push(path);
        }

        Ok(artifacts)
    }

    /// Correlation heatmap, then the pairplot.
    pub fn render_relationships(&self, df: &DataFrame) -> Result<Vec<PathBuf>> {
        let matrix = DataProfiler::correlation_matrix(df)?;
        let heatmap_path = self.artifact_path(CORRELATION_FILE);
        draw_heatmap(&heatmap_path, &matrix, self.config.heatmap_figure)
            .context(format!("Rendering {}", heatmap_path.display()))?;
        info!("Saved {}", heatmap_path.display());

        let variables: Vec<PairVariable> = self
            .config
            .pairplot_vars()
            .into_iter()
            .map(|name| -> Result<PairVariable> {
                Ok(PairVariable {
                    name: name.to_string(),
                    values: optional_values(require_column(df, name)?)?,
                })
            })
            .collect::<Result<_>>()?;
        let hue = HueColumn {
            name: self.config.hue_column.clone(),
            values: optional_values(require_column(df, &self.config.hue_column)?)?,
        };

        let pairplot_path = self.artifact_path(PAIRPLOT_FILE);
        draw_pairplot(&pairplot_path, &variables, &hue, self.config.pairplot_panel)
            .context(format!("Rendering {}", pairplot_path.display()))?;
        info!("Saved {}", pairplot_path.display());

        Ok(vec![heatmap_path, pairplot_path])
    }
}
