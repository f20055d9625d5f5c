// src/error.rs
// =============================================================================
// Error types for the library side of the checker.
//
// Only file-level problems and client setup end up here. A link that fails
// to respond is NOT an error: it becomes a CheckOutcome (see checker/http.rs)
// and the run keeps going.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for link checking operations
#[derive(Debug, Error)]
pub enum LinkCheckError {
    /// The document to check does not exist
    #[error("Cannot find README.md file: {}", .0.display())]
    MissingDocument(PathBuf),

    /// Reading or rewriting the document failed
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The HTTP client could not be built (bad TLS backend, etc.)
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl LinkCheckError {
    // Wraps an io::Error together with the file it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LinkCheckError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for link checking operations
pub type Result<T> = std::result::Result<T, LinkCheckError>;
