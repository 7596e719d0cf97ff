//! Configuration types for the EDA pipeline.
//!
//! The binary always runs with [`EdaConfig::default()`]: the dataset path,
//! output locations, feature lists and cleaning plan are fixed. The builder
//! exists so library callers (and tests) can point a run at other paths.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default source dataset, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "Titanic-Dataset.csv";
/// Default directory receiving the plot images.
pub const DEFAULT_PLOTS_DIR: &str = "plots";
/// Default markdown report path.
pub const DEFAULT_REPORT_PATH: &str = "EDA_Inferences.md";

/// Features that get a histogram and a boxplot each.
pub const DEFAULT_NUMERIC_FEATURES: [&str; 5] = ["Age", "Fare", "Pclass", "SibSp", "Parch"];
/// Columns taken into the pairplot (the hue column included).
pub const DEFAULT_PAIRPLOT_COLUMNS: [&str; 6] = ["Survived", "Pclass", "Age", "SibSp", "Parch", "Fare"];
/// Column whose categories colour the pairplot.
pub const DEFAULT_HUE_COLUMN: &str = "Survived";

/// Pixel size of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width: u32,
    pub height: u32,
}

impl FigureSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Which columns the cleaner touches and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningPlan {
    /// Numeric columns whose missing values get the column median.
    pub median_fill: Vec<String>,
    /// Categorical columns whose missing values get the most frequent value.
    pub mode_fill: Vec<String>,
    /// Columns removed outright.
    pub drop_columns: Vec<String>,
}

impl Default for CleaningPlan {
    fn default() -> Self {
        Self {
            median_fill: vec!["Age".to_string()],
            mode_fill: vec!["Embarked".to_string()],
            drop_columns: vec!["Cabin".to_string()],
        }
    }
}

/// Configuration for an EDA run.
///
/// Use [`EdaConfig::builder()`] to override individual settings.
///
/// # Example
///
/// ```rust,ignore
/// use titanic_eda::config::EdaConfig;
///
/// let config = EdaConfig::builder()
///     .dataset_path("data/train.csv")
///     .plots_dir("out/plots")
///     .report_path("out/EDA_Inferences.md")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdaConfig {
    /// Delimited source file.
    /// Default: "Titanic-Dataset.csv"
    pub dataset_path: PathBuf,

    /// Directory the plot images are written to; created if absent.
    /// Default: "plots"
    pub plots_dir: PathBuf,

    /// Markdown file receiving the narrative report; overwritten every run.
    /// Default: "EDA_Inferences.md"
    pub report_path: PathBuf,

    /// Features that get a histogram and a boxplot.
    /// Default: Age, Fare, Pclass, SibSp, Parch
    pub numeric_features: Vec<String>,

    /// Columns of the pairwise relationship grid, hue column included.
    /// Default: Survived, Pclass, Age, SibSp, Parch, Fare
    pub pairplot_columns: Vec<String>,

    /// Column whose levels colour the pairplot.
    /// Default: "Survived"
    pub hue_column: String,

    /// Imputation and column removal performed by the cleaner.
    pub cleaning: CleaningPlan,

    /// Size of each histogram and boxplot image.
    /// Default: 800x600
    pub distribution_figure: FigureSize,

    /// Size of the correlation heatmap image.
    /// Default: 1200x1000
    pub heatmap_figure: FigureSize,

    /// Size of one pairplot panel; the image grows with the grid.
    /// Default: 250x250
    pub pairplot_panel: FigureSize,
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            plots_dir: PathBuf::from(DEFAULT_PLOTS_DIR),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            numeric_features: to_strings(&DEFAULT_NUMERIC_FEATURES),
            pairplot_columns: to_strings(&DEFAULT_PAIRPLOT_COLUMNS),
            hue_column: DEFAULT_HUE_COLUMN.to_string(),
            cleaning: CleaningPlan::default(),
            distribution_figure: FigureSize::new(800, 600),
            heatmap_figure: FigureSize::new(1200, 1000),
            pairplot_panel: FigureSize::new(250, 250),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl EdaConfig {
    /// Create a new configuration builder.
    pub fn builder() -> EdaConfigBuilder {
        EdaConfigBuilder::default()
    }

    /// Pairplot columns without the hue column, in configured order.
    pub fn pairplot_vars(&self) -> Vec<&str> {
        self.pairplot_columns
            .iter()
            .filter(|c| **c != self.hue_column)
            .map(String::as_str)
            .collect()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.numeric_features.is_empty() {
            return Err(ConfigValidationError::EmptyFeatureList("numeric_features"));
        }

        if self.pairplot_vars().is_empty() {
            return Err(ConfigValidationError::EmptyFeatureList("pairplot_columns"));
        }

        if !self.pairplot_columns.contains(&self.hue_column) {
            return Err(ConfigValidationError::HueNotInPairplot(
                self.hue_column.clone(),
            ));
        }

        for (field, size) in [
            ("distribution_figure", self.distribution_figure),
            ("heatmap_figure", self.heatmap_figure),
            ("pairplot_panel", self.pairplot_panel),
        ] {
            if size.width == 0 || size.height == 0 {
                return Err(ConfigValidationError::InvalidFigureSize {
                    field: field.to_string(),
                    width: size.width,
                    height: size.height,
                });
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("'{0}' must name at least one column")]
    EmptyFeatureList(&'static str),

    #[error("Hue column '{0}' must be one of the pairplot columns")]
    HueNotInPairplot(String),

    #[error("Invalid figure size for '{field}': {width}x{height}")]
    InvalidFigureSize {
        field: String,
        width: u32,
        height: u32,
    },
}

/// Builder for [`EdaConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct EdaConfigBuilder {
    dataset_path: Option<PathBuf>,
    plots_dir: Option<PathBuf>,
    report_path: Option<PathBuf>,
    numeric_features: Option<Vec<String>>,
    pairplot_columns: Option<Vec<String>>,
    hue_column: Option<String>,
    cleaning: Option<CleaningPlan>,
    distribution_figure: Option<FigureSize>,
    heatmap_figure: Option<FigureSize>,
    pairplot_panel: Option<FigureSize>,
}

impl EdaConfigBuilder {
    /// Set the source dataset path.
    pub fn dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = Some(path.into());
        self
    }

    /// Set the directory receiving the plot images.
    pub fn plots_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.plots_dir = Some(path.into());
        self
    }

    /// Set the markdown report path.
    pub fn report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    /// Set the features plotted as histogram and boxplot.
    pub fn numeric_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric_features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    /// Set the pairplot columns (the hue column must be among them).
    pub fn pairplot_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pairplot_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the column whose levels colour the pairplot.
    pub fn hue_column(mut self, column: impl Into<String>) -> Self {
        self.hue_column = Some(column.into());
        self
    }

    /// Set the cleaning plan.
    pub fn cleaning(mut self, plan: CleaningPlan) -> Self {
        self.cleaning = Some(plan);
        self
    }

    /// Set the histogram/boxplot image size.
    pub fn distribution_figure(mut self, width: u32, height: u32) -> Self {
        self.distribution_figure = Some(FigureSize::new(width, height));
        self
    }

    /// Set the heatmap image size.
    pub fn heatmap_figure(mut self, width: u32, height: u32) -> Self {
        self.heatmap_figure = Some(FigureSize::new(width, height));
        self
    }

    /// Set the size of a single pairplot panel.
    pub fn pairplot_panel(mut self, width: u32, height: u32) -> Self {
        self.pairplot_panel = Some(FigureSize::new(width, height));
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `EdaConfig` or an error if validation fails.
    pub fn build(self) -> Result<EdaConfig, ConfigValidationError> {
        let defaults = EdaConfig::default();
        let config = EdaConfig {
            dataset_path: self.dataset_path.unwrap_or(defaults.dataset_path),
            plots_dir: self.plots_dir.unwrap_or(defaults.plots_dir),
            report_path: self.report_path.unwrap_or(defaults.report_path),
            numeric_features: self.numeric_features.unwrap_or(defaults.numeric_features),
            pairplot_columns: self.pairplot_columns.unwrap_or(defaults.pairplot_columns),
            hue_column: self.hue_column.unwrap_or(defaults.hue_column),
            cleaning: self.cleaning.unwrap_or(defaults.cleaning),
            distribution_figure: self
                .distribution_figure
                .unwrap_or(defaults.distribution_figure),
            heatmap_figure: self.heatmap_figure.unwrap_or(defaults.heatmap_figure),
            pairplot_panel: self.pairplot_panel.unwrap_or(defaults.pairplot_panel),
        };

        config.validate()?;
        Ok(config)
    }
}

static_assertions::assert_impl_all!(EdaConfig: Send, Sync);
