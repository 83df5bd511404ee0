use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("reference dataset not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read reference dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed reference dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("reference dataset is missing required column '{name}'")]
    MissingColumn { name: &'static str },

    #[error("invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("reference dataset contains no rows")]
    Empty,
}
