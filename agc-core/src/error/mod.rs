//! Core error types for agc

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for clustering runs
#[derive(Error, Debug)]
pub enum AgcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input not found: {} does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input is a directory: {}", .0.display())]
    InputIsDirectory(PathBuf),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid alignment: {0}")]
    InvalidAlignment(String),

    #[error("Alignment failure: {0}")]
    AlignmentFailure(String),

    #[error("Matrix parse error: {0}")]
    MatrixParse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),
}

/// Result type alias for agc operations
pub type AgcResult<T> = Result<T, AgcError>;

impl AgcError {
    /// Errors raised because the input path itself is unusable
    pub fn is_input_error(&self) -> bool {
        matches!(self, AgcError::InputNotFound(_) | AgcError::InputIsDirectory(_))
    }
}
