use thiserror::Error;

/// Convenience result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Error type returned while turning a CSV file into JSON records.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Reading the CSV or writing the JSON scratch file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV could not be parsed (bad UTF-8, unterminated quote, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The object key names none of the known data types.
    #[error("cannot infer data type from object key '{key}'")]
    UnknownDataType { key: String },
}
