//! Application-wide error types.

use thiserror::Error;

use crate::email::EmailError;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Run-level error taxonomy. Every variant is fatal.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid command-line usage.
    #[error("Usage error: {0}")]
    Usage(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Storage credentials could not be resolved.
    #[error("Credential error: {0}")]
    Credentials(String),

    /// An external tool or storage operation failed.
    #[error("External tool error: {0}")]
    ExternalTool(String),

    /// The report location held no objects.
    #[error("No files found in {0}")]
    NoFilesFound(String),

    /// Mail submission failed.
    #[error("Mail error: {0}")]
    Mail(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Configuration(_)
            | Self::Credentials(_)
            | Self::ExternalTool(_)
            | Self::NoFilesFound(_)
            | Self::Mail(_)
            | Self::Internal(_) => 1,
        }
    }

    /// Returns the error code used in log output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Usage(_) => "USAGE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Credentials(_) => "CREDENTIALS_NOT_FOUND",
            Self::ExternalTool(_) => "EXTERNAL_TOOL_ERROR",
            Self::NoFilesFound(_) => "NO_FILES_FOUND",
            Self::Mail(_) => "MAIL_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::InvalidSenderDomain(_) => Self::Configuration(err.to_string()),
            _ => Self::Mail(err.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
