//! Credential resolution errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving storage credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No candidate file yielded both an access key and a secret key.
    #[error("no storage credentials found in {}", display_paths(.searched))]
    NotFound {
        /// Files that were considered, in scan order.
        searched: Vec<PathBuf>,
    },

    /// A candidate file exists but could not be read.
    #[error("failed to read {path}: {reason}")]
    Read {
        /// Offending file.
        path: PathBuf,
        /// Underlying I/O error.
        reason: String,
    },
}

impl CredentialError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(searched: Vec<PathBuf>) -> Self {
        Self::NotFound { searched }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<CredentialError> for reportmail_shared::AppError {
    fn from(err: CredentialError) -> Self {
        Self::Credentials(err.to_string())
    }
}
