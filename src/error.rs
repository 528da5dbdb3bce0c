use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error in {origin} at row {row}, column '{column}': '{value}' {reason}")]
    Parse {
        origin: String,
        row: usize,
        column: String,
        value: String,
        reason: String,
    },

    #[error("Column '{column}' not found in {origin}")]
    Schema { column: String, origin: String },

    #[error("Group '{group}' has no usable values")]
    EmptyGroup { group: String },

    #[error("Percent change is undefined for a zero base value")]
    Division,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
