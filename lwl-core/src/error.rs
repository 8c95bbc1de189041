/// Error types for the LWL core library
use thiserror::Error;

/// Main error type for lake level ingestion
#[derive(Error, Debug)]
pub enum LevelError {
    /// Failed to read an input file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// No header row with both a date and a value column
    #[error("No header with date column {date_columns:?} and value column {value_columns:?}")]
    MissingHeader {
        date_columns: Vec<String>,
        value_columns: Vec<String>,
    },

    /// Failed to serialize or deserialize JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    DateParse(String),

    /// Value parsing failed
    #[error("Failed to parse value: {0}")]
    ValueParse(String),

    /// Color string is not a hex color
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Type alias for Results using LevelError
pub type Result<T> = std::result::Result<T, LevelError>;
