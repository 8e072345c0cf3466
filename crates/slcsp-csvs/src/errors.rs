use std::path::PathBuf;
use thiserror::Error;

pub type CsvResult<T> = Result<T, CsvError>;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: missing required header '{header}'")]
    MissingHeader { file: String, header: String },

    #[error("{file}: header '{header}' appears more than once")]
    DuplicateHeader { file: String, header: String },
}
