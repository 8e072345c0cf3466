use slcsp_resolver::{CsvError, PipelineError};
use std::path::PathBuf;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    #[error("Input file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
