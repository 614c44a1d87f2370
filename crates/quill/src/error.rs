//! Error types for Quill

use thiserror::Error;

/// Main error type for Quill operations
#[derive(Error, Debug)]
pub enum QuillError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Quill operations
pub type Result<T> = std::result::Result<T, QuillError>;
