use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Data file not found: {}. {hint}", .path.display())]
    MissingInput { path: PathBuf, hint: String },

    #[error("Column '{column}' not found in {}", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("City '{name}' not found in the city table")]
    CityNotFound { name: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ProcessingError {
    /// Raw source file absent.
    pub fn missing_source(path: impl Into<PathBuf>) -> Self {
        ProcessingError::MissingInput {
            path: path.into(),
            hint: "Check the [paths] section of the configuration or pass --data-dir".to_string(),
        }
    }

    /// Derived table absent, preprocessing has not been run yet.
    pub fn missing_table(path: impl Into<PathBuf>) -> Self {
        ProcessingError::MissingInput {
            path: path.into(),
            hint: "Please run `frost-processor preprocess` first".to_string(),
        }
    }

    pub fn is_missing_input(&self) -> bool {
        matches!(self, ProcessingError::MissingInput { .. })
    }
}
