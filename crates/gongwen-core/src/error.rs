//! Error types for the document compiler

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the compiler
///
/// Everything not listed here is absorbed by the tolerant parsers.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Structured input is not valid JSON
    #[error("Malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// A required input or body file does not exist
    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// Error reading input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CoreError>;
