use thiserror::Error;

use dmx_core::ValidationError;

/// Errors produced while writing the CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination could not be opened or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row field could not be extracted from a retained descriptor.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
