//! CLI entry point for the Titanic EDA run.

use anyhow::Result;
use clap::Parser;
use titanic_eda::{DatasetLoader, EdaConfig, EdaPipeline};
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory data analysis of the Titanic passenger dataset",
    long_about = "Reads Titanic-Dataset.csv from the working directory, fills missing \
                  Age and Embarked values, drops Cabin, prints summary statistics, \
                  writes plots to ./plots and the narrative to EDA_Inferences.md.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  RUST_LOG    Log filter for diagnostics on stderr (default: info)"
)]
struct Args {}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so stdout only carries the summary tables and the
/// progress banners.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let _args = Args::parse();
    init_logging();

    let config = EdaConfig::default();
    let dataset_path = config.dataset_path.clone();

    match EdaPipeline::new(config).run() {
        Ok(outcome) => {
            debug!("Run took {:?}", outcome.duration);
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            println!("{}", DatasetLoader::not_found_message(&dataset_path));
            Ok(())
        }
        Err(e) => {
            error!("[{}] {}", e.error_code(), e);
            Err(e.into())
        }
    }
}
