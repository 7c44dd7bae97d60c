//! Native storage client on Apache OpenDAL.

use std::path::Path;

use opendal::{EntryMode, Operator, services};
use tracing::debug;

use super::client::{RemoteObject, StorageClient};
use super::config::StorageProvider;
use super::error::StorageError;
use super::location::StorageLocation;

/// Storage client backed by an OpenDAL operator.
///
/// The operator is bound to one bucket; `list` lists the location's prefix
/// within it.
pub struct OpendalClient {
    operator: Operator,
    provider: &'static str,
}

impl OpendalClient {
    /// Create a client from provider config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be initialized.
    pub fn from_provider(provider: &StorageProvider) -> Result<Self, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let mut builder = services::S3::default()
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);
                if let Some(endpoint) = endpoint {
                    builder = builder.endpoint(endpoint);
                }

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
        };

        Ok(Self {
            operator,
            provider: provider.name(),
        })
    }
}

impl StorageClient for OpendalClient {
    async fn list(&self, location: &StorageLocation) -> Result<Vec<RemoteObject>, StorageError> {
        let dir = if location.prefix().is_empty() {
            "/"
        } else {
            location.prefix()
        };
        debug!(provider = self.provider, %location, "Listing objects");

        let entries = self.operator.list(dir).await.map_err(StorageError::from)?;

        let objects = entries
            .into_iter()
            .filter(|entry| entry.metadata().mode() == EntryMode::FILE)
            .filter_map(|entry| {
                let key = entry.path().trim_start_matches('/');
                RemoteObject::from_uri(&format!("s3://{}/{key}", location.bucket()))
            })
            .collect();

        Ok(objects)
    }

    async fn fetch(&self, object: &RemoteObject, dest: &Path) -> Result<(), StorageError> {
        let buffer = self
            .operator
            .read(&object.key)
            .await
            .map_err(|e| StorageError::download_failed(&object.uri, e.to_string()))?;

        tokio::fs::write(dest, buffer.to_vec())
            .await
            .map_err(|e| StorageError::Io {
                path: dest.to_path_buf(),
                reason: e.to_string(),
            })
    }
}
