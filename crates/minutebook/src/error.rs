//! Error types for minutebook.
//!
//! This module defines all error types used throughout the minutebook crate.
//! Not-found conditions are not errors anywhere in the public API; they are
//! reported as `Option`/`bool` values and never appear here.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for minutebook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// The store could not be hydrated from its backend.
    #[error("failed to initialize store: {message}")]
    StorageInit {
        /// Description of what went wrong.
        message: String,
    },

    /// Failed to read the persisted blob.
    #[error("failed to read data at {path}: {source}")]
    BlobRead {
        /// Path to the blob file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the persisted blob.
    #[error("failed to write data at {path}: {source}")]
    BlobWrite {
        /// Path to the blob file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The persisted blob exists but is not valid JSON for the record layout.
    #[error("persisted data is malformed: {source}")]
    BlobParse {
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for minutebook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a storage initialization error.
    #[must_use]
    pub fn storage_init(message: impl Into<String>) -> Self {
        Self::StorageInit {
            message: message.into(),
        }
    }

    /// Check if this error means the persisted blob was unreadable or
    /// malformed at open time.
    #[must_use]
    pub fn is_storage_init(&self) -> bool {
        matches!(
            self,
            Self::StorageInit { .. } | Self::BlobParse { .. } | Self::BlobRead { .. }
        )
    }
}
