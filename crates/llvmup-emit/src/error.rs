//! Emitter error types.

/// Errors that can occur while writing build files.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// I/O error writing an output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for emit operations.
pub type Result<T> = std::result::Result<T, EmitError>;
