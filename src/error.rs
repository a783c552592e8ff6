//! Error types for the FocusFlow engine

use thiserror::Error;

/// Errors that can occur at the engine boundary.
///
/// The evaluation functions themselves are infallible; errors only arise when
/// parsing requests or encoding reports.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to parse evaluation request: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
