//! Integration tests for the Titanic EDA pipeline.
//!
//! These tests run the stages and the full pipeline against a small
//! Titanic-shaped fixture, writing every output into a temporary directory.

use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use titanic_eda::{
    DataCleaner, DataProfiler, DatasetLoader, EDA_INFERENCES, EdaConfig, EdaPipeline,
    ImputationStrategy,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn sample_path() -> PathBuf {
    fixtures_path().join("titanic_sample.csv")
}

fn config_in(dir: &Path, dataset: PathBuf) -> EdaConfig {
    EdaConfig::builder()
        .dataset_path(dataset)
        .plots_dir(dir.join("plots"))
        .report_path(dir.join("EDA_Inferences.md"))
        .build()
        .expect("valid config")
}

fn ages(df: &DataFrame) -> Vec<Option<f64>> {
    df.column("Age")
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_sample() {
    let df = DatasetLoader::load(sample_path()).unwrap();

    assert_eq!(df.shape(), (33, 12));
    assert_eq!(df.column("Age").unwrap().dtype(), &DataType::Float64);
    assert_eq!(df.column("Age").unwrap().null_count(), 6);
    assert_eq!(df.column("Embarked").unwrap().null_count(), 2);

    let names = strings(&df, "Name");
    assert_eq!(names[22].as_deref(), Some("McGowan, Miss. Anna \"Annie\""));
}

// ============================================================================
// Cleaning
// ============================================================================

#[test]
fn test_cleaning_invariants() {
    let original = DatasetLoader::load(sample_path()).unwrap();
    let ages_before = ages(&original);
    let embarked_before = strings(&original, "Embarked");
    let fare_before = original.column("Fare").unwrap().clone();
    let names_before: Vec<String> = original
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .filter(|s| s != "Cabin")
        .collect();

    let (cleaned, summary) = DataCleaner::default().clean(original).unwrap();

    // row count unchanged, Cabin gone, remaining columns keep their order
    assert_eq!(cleaned.height(), 33);
    assert!(cleaned.column("Cabin").is_err());
    let names_after: Vec<String> = cleaned
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(names_after, names_before);

    // missing ages take the median of the present ones, present ages are kept
    let ages_after = ages(&cleaned);
    for (before, after) in ages_before.iter().zip(&ages_after) {
        match before {
            Some(v) => assert_eq!(after, &Some(*v)),
            None => assert_eq!(after, &Some(28.0)),
        }
    }

    // missing ports take the most frequent one
    let embarked_after = strings(&cleaned, "Embarked");
    for (before, after) in embarked_before.iter().zip(&embarked_after) {
        match before {
            Some(v) => assert_eq!(after.as_deref(), Some(v.as_str())),
            None => assert_eq!(after.as_deref(), Some("S")),
        }
    }

    assert!(cleaned.column("Fare").unwrap().equals_missing(&fare_before));

    assert_eq!(summary.rows_before, summary.rows_after);
    assert_eq!(summary.cells_filled(), 8);
    assert_eq!(summary.imputations[0].strategy, ImputationStrategy::Median);
    assert_eq!(summary.imputations[0].fill_value.as_deref(), Some("28"));
    assert_eq!(summary.imputations[1].fill_value.as_deref(), Some("S"));
    assert_eq!(summary.dropped_columns, vec!["Cabin".to_string()]);
}

#[test]
fn test_summary_after_cleaning() {
    let df = DatasetLoader::load(sample_path()).unwrap();
    let (df, _) = DataCleaner::default().clean(df).unwrap();

    let summary = DataProfiler::summarize(&df).unwrap();
    let age = summary.numeric_column("Age").unwrap();
    assert_eq!(age.count, 33);
    assert_eq!(age.min, 0.42);
    assert_eq!(age.max, 62.0);
    assert!(summary.numeric_column("Name").is_none());
    assert_eq!(summary.shape, (33, 11));

    let fare_pclass = DataProfiler::correlation_matrix(&df)
        .unwrap()
        .get("Fare", "Pclass")
        .unwrap();
    assert!(fare_pclass < 0.0);
}

// ============================================================================
// Full Pipeline
// ============================================================================

#[test]
fn test_full_pipeline_writes_all_artifacts() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), sample_path());

    let outcome = EdaPipeline::new(config).run().unwrap();

    let mut names: Vec<String> = outcome
        .artifacts
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    names.sort();
    let mut expected: Vec<String> = ["Age", "Fare", "Pclass", "SibSp", "Parch"]
        .iter()
        .flat_map(|f| [format!("histogram_{}.png", f), format!("boxplot_{}.png", f)])
        .chain(["correlation_matrix.png".to_string(), "pairplot.png".to_string()])
        .collect();
    expected.sort();
    assert_eq!(names, expected);

    for path in &outcome.artifacts {
        assert!(path.starts_with(dir.path().join("plots")));
        let len = fs::metadata(path).unwrap().len();
        assert!(len > 0, "{} is empty", path.display());
    }

    let entries = fs::read_dir(dir.path().join("plots")).unwrap().count();
    assert_eq!(entries, 12);

    let report = fs::read_to_string(dir.path().join("EDA_Inferences.md")).unwrap();
    assert_eq!(report, EDA_INFERENCES);
    assert_eq!(outcome.summary.shape, (33, 11));
}

#[test]
fn test_missing_dataset_produces_nothing() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("Titanic-Dataset.csv");
    let config = config_in(dir.path(), missing.clone());

    let err = EdaPipeline::new(config).run().unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        DatasetLoader::not_found_message(&missing),
        format!(
            "Dataset file not found. Please make sure '{}' is in the correct directory.",
            missing.display()
        )
    );
    assert!(!dir.path().join("plots").exists());
    assert!(!dir.path().join("EDA_Inferences.md").exists());
}

#[test]
fn test_rerun_overwrites_outputs() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), sample_path());

    let first = EdaPipeline::new(config.clone()).run().unwrap();
    let first_bytes: Vec<Vec<u8>> = first
        .artifacts
        .iter()
        .map(|p| fs::read(p).unwrap())
        .collect();

    fs::write(dir.path().join("EDA_Inferences.md"), "edited by hand").unwrap();

    let second = EdaPipeline::new(config).run().unwrap();
    assert_eq!(first.artifacts, second.artifacts);
    for (path, before) in second.artifacts.iter().zip(&first_bytes) {
        assert!(fs::read(path).unwrap() == *before, "{} changed", path.display());
    }

    let report = fs::read_to_string(dir.path().join("EDA_Inferences.md")).unwrap();
    assert_eq!(report, EDA_INFERENCES);
}

#[test]
fn test_outcome_serializes() {
    let dir = TempDir::new().unwrap();
    let outcome = EdaPipeline::new(config_in(dir.path(), sample_path()))
        .run()
        .unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["cleaning"]["rows_before"], 33);
    assert_eq!(json["artifacts"].as_array().unwrap().len(), 12);
}
