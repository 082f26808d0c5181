//! Error types for import-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in import-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The uploaded stream could not be parsed as CSV
    #[error("unable to load CSV: {message}")]
    CsvParse { message: String },

    /// A file was rejected at the upload boundary
    #[error("file rejected: {reason}")]
    Rejected { reason: String },

    /// Row/column layout does not match the mapping selectors
    #[error("invalid CSV structure: {detail}")]
    InvalidStructure { detail: String },

    /// A column is missing a resolvable mapping value
    #[error("incomplete mapping: every column needs a mapping value")]
    IncompleteMapping,

    /// Every row was dropped as unpopulated; nothing to persist
    #[error("no valid data to import")]
    EmptyResult,

    /// The persistence call failed
    #[error("an error occurred while saving the data: {message}")]
    Persistence { message: String },

    /// A mapping name is not part of the catalog vocabulary
    #[error("unknown mapping '{name}'")]
    UnknownMapping { name: String },

    /// A selector index is outside the current column range
    #[error("column {column} out of range (selector count is {count})")]
    ColumnOutOfRange { column: usize, count: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
