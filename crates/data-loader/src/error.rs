//! Error types for the data-loader crate.
//!
//! Only the I/O boundary can fail. Normalization itself never errors:
//! unparsable values degrade to their documented defaults instead.

use thiserror::Error;

/// Errors that can occur while reading or writing candidate tables
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON input was malformed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Line in a data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data row carries more cells than the header declares
    #[error("Expected at most {expected} fields but found {found} at line {line} in {file}")]
    FieldCountMismatch {
        file: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    /// A spreadsheet could not be read or written
    #[error("Spreadsheet error in {file}: {reason}")]
    Spreadsheet { file: String, reason: String },

    /// The input file extension is not a supported tabular format
    #[error("Unsupported input format: {path} (expected .csv, .json, .xlsx or .xls)")]
    UnsupportedInput { path: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
