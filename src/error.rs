use std::path::PathBuf;

use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File not found : {}", .0.display())]
    FileNotFound(PathBuf),

    #[error(
        "Worksheet '{sheet}' column count mismatch: expected {expected} columns, found {actual}"
    )]
    ColumnCountMismatch {
        sheet: String,
        expected: usize,
        actual: usize,
    },

    #[error("Worksheet '{sheet}' is missing required column '{column}'")]
    MissingField { sheet: String, column: String },

    #[error("Worksheet '{sheet}' row {row}, column '{column}': {message}")]
    InvalidCell {
        sheet: String,
        row: usize,
        column: String,
        message: String,
    },

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
