//! # Export Errors

use thiserror::Error;

/// Errors raised while producing export files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer rejected a record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The export directory or file could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
