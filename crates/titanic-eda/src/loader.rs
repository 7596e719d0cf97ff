//! Dataset loading.

use crate::error::{EdaError, Result, ResultExt};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads the source CSV into a [`DataFrame`].
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load the dataset at `path`.
    ///
    /// A missing file is reported as [`EdaError::DatasetNotFound`] before
    /// anything is read. The schema is inferred from every row, so a
    /// fractional value far down a mostly integral column still makes it a
    /// float column. Empty fields load as nulls.
    pub fn load(path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(EdaError::DatasetNotFound(path.to_path_buf()));
        }

        info!("Loading dataset from: {}", path.display());
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
            .try_into_reader_with_file_path(Some(PathBuf::from(path)))
            .context(format!("Opening '{}'", path.display()))?
            .finish()
            .context(format!("Parsing '{}'", path.display()))?;

        info!("Dataset loaded successfully: {:?}", df.shape());
        debug!("Columns: {:?}", df.get_column_names());
        Ok(df)
    }

    /// The diagnostic printed when the dataset file is absent.
    pub fn not_found_message(path: impl AsRef<Path>) -> String {
        format!(
            "Dataset file not found. Please make sure '{}' is in the correct directory.",
            path.as_ref().display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let err = DatasetLoader::load("definitely/not/here.csv").unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, EdaError::DatasetNotFound(ref p) if p.ends_with("here.csv")));
    }

    #[test]
    fn test_load_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = DatasetLoader::load(dir.path()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            DatasetLoader::not_found_message("Titanic-Dataset.csv"),
            "Dataset file not found. Please make sure 'Titanic-Dataset.csv' is in the correct directory."
        );
    }

    #[test]
    fn test_load_infers_types_and_nulls() {
        let file = write_csv(
            "PassengerId,Name,Age,Cabin,Embarked\n\
             1,\"Braund, Mr. Owen Harris\",22,,S\n\
             2,\"Cumings, Mrs. John Bradley\",38,C85,C\n\
             3,\"Heikkinen, Miss. Laina\",,,S\n",
        );

        let df = DatasetLoader::load(file.path()).unwrap();
        assert_eq!(df.shape(), (3, 5));
        assert_eq!(df.column("PassengerId").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("Name").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("Age").unwrap().null_count(), 1);
        assert_eq!(df.column("Cabin").unwrap().null_count(), 2);

        let names: Vec<Option<&str>> = df.column("Name").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(names[0], Some("Braund, Mr. Owen Harris"));
    }

    #[test]
    fn test_load_uses_whole_file_for_schema() {
        let mut content = String::from("Age\n");
        for _ in 0..150 {
            content.push_str("30\n");
        }
        content.push_str("0.42\n");
        let file = write_csv(&content);

        let df = DatasetLoader::load(file.path()).unwrap();
        assert_eq!(df.column("Age").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.height(), 151);
    }
}
