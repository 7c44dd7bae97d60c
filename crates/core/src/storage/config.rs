//! OpenDAL provider configuration.

use std::path::PathBuf;

use reportmail_shared::config::StorageSettings;

use crate::credentials::Credentials;

/// Storage provider for the native client.
#[derive(Debug, Clone)]
pub enum StorageProvider {
    /// S3 or an S3-compatible service.
    S3 {
        /// Custom endpoint URL (MinIO, LocalStack); AWS when `None`.
        endpoint: Option<String>,
        /// Bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Local directory standing in for a bucket (development and tests).
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// S3 provider for `bucket` using resolved credentials and storage settings.
    #[must_use]
    pub fn s3(bucket: impl Into<String>, creds: &Credentials, settings: &StorageSettings) -> Self {
        Self::S3 {
            endpoint: settings.endpoint.clone(),
            bucket: bucket.into(),
            access_key_id: creds.access_key.clone(),
            secret_access_key: creds.secret_key.clone(),
            region: settings.region.clone(),
        }
    }

    /// Local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
        }
    }
}
