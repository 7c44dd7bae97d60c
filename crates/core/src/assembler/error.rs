//! Report assembly error types.

use std::path::PathBuf;

use reportmail_shared::AppError;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while assembling a report.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// The report name cannot be used as a file name.
    #[error("invalid report name '{0}'")]
    InvalidName(String),

    /// The scratch workspace could not be prepared.
    #[error("workspace error at {path}: {reason}")]
    Workspace {
        /// Directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        reason: String,
    },

    /// Listing or location parsing failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A part could not be downloaded.
    #[error("can't download: {uri}: {reason}")]
    Download {
        /// Object URI.
        uri: String,
        /// Failure description.
        reason: String,
    },

    /// The location held no objects.
    #[error("no files found in {location}")]
    NoFilesFound {
        /// Normalized location URI.
        location: String,
    },

    /// The parts could not be concatenated.
    #[error("error creating {}: {reason}", .path.display())]
    Concatenate {
        /// CSV path.
        path: PathBuf,
        /// Underlying I/O error.
        reason: String,
    },

    /// The CSV could not be archived.
    #[error("error zipping {}: {reason}", .path.display())]
    Archive {
        /// Archive path.
        path: PathBuf,
        /// Underlying error.
        reason: String,
    },

    /// The archive ended up missing or empty.
    #[error("archive {} is missing or empty", .0.display())]
    EmptyArchive(PathBuf),
}

impl AssemblyError {
    /// Create a workspace error.
    #[must_use]
    pub fn workspace(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Workspace {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Create a no files found error.
    #[must_use]
    pub fn no_files_found(location: impl Into<String>) -> Self {
        Self::NoFilesFound {
            location: location.into(),
        }
    }
}

impl From<AssemblyError> for AppError {
    fn from(err: AssemblyError) -> Self {
        match err {
            AssemblyError::InvalidName(_) => Self::Usage(err.to_string()),
            AssemblyError::NoFilesFound { location } => Self::NoFilesFound(location),
            AssemblyError::Storage(e) => e.into(),
            AssemblyError::Workspace { .. } => Self::Internal(err.to_string()),
            _ => Self::ExternalTool(err.to_string()),
        }
    }
}
