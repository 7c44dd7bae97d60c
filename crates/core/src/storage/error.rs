//! Storage error types.

use std::path::PathBuf;

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The report location is not an `s3://bucket/prefix` URL.
    #[error("invalid storage location '{0}'")]
    InvalidLocation(String),

    /// File not found in storage.
    #[error("object not found: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// Storage client configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),

    /// An external command could not be started.
    #[error("failed to run {program}: {reason}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        reason: String,
    },

    /// An external command exited unsuccessfully.
    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        /// Command line, without secrets.
        command: String,
        /// Exit status description.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// An object could not be downloaded.
    #[error("can't download: {uri}: {reason}")]
    DownloadFailed {
        /// Object URI.
        uri: String,
        /// Failure description.
        reason: String,
    },

    /// Local filesystem error while storing an object.
    #[error("failed to write {path}: {reason}")]
    Io {
        /// Local path.
        path: PathBuf,
        /// Underlying I/O error.
        reason: String,
    },

    /// OpenDAL operation error.
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// Create an invalid location error.
    #[must_use]
    pub fn invalid_location(location: impl Into<String>) -> Self {
        Self::InvalidLocation(location.into())
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a download error.
    #[must_use]
    pub fn download_failed(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DownloadFailed {
            uri: uri.into(),
            reason: reason.into(),
        }
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound {
                key: err.to_string(),
            },
            opendal::ErrorKind::ConfigInvalid => Self::Configuration(err.to_string()),
            _ => Self::Operation(err.to_string()),
        }
    }
}

impl From<StorageError> for reportmail_shared::AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidLocation(_) => Self::Usage(err.to_string()),
            StorageError::Configuration(_) => Self::Configuration(err.to_string()),
            _ => Self::ExternalTool(err.to_string()),
        }
    }
}
