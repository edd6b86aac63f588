use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads, reshapes, or writes catalog files.
///
/// Malformed cell values are never represented here: transcoding degrades to
/// a safe default instead of failing the run.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the CSV reader or writer fails.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when a required column cannot be located in a catalog header.
    #[error("could not find {column} column in {path}; headers: {headers:?}")]
    MissingColumn {
        column: String,
        path: PathBuf,
        headers: Vec<String>,
    },

    /// Raised when a fixed-size split is requested with an empty chunk.
    #[error("chunk size must be at least 1, got {0}")]
    InvalidChunkSize(usize),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
