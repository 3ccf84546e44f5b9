//! Event store error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during event store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized.
    #[error("failed to encode event record: {0}")]
    Encode(#[source] serde_json::Error),

    /// A stored record could not be decoded.
    #[error("malformed event record at {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// The file the error concerns, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            StoreError::Io { path, .. } | StoreError::Malformed { path, .. } => Some(path),
            StoreError::Encode(_) => None,
        }
    }
}

/// Result type for event store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
