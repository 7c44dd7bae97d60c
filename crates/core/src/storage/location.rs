//! Report locations (`s3://bucket/prefix/`).

use std::fmt;

use super::error::StorageError;

const SCHEME: &str = "s3://";

/// Appends a trailing `/` unless one is already present.
#[must_use]
pub fn normalize_location(location: &str) -> String {
    if location.ends_with('/') {
        location.to_string()
    } else {
        format!("{location}/")
    }
}

/// A bucket and a directory-like key prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    bucket: String,
    prefix: String,
}

impl StorageLocation {
    /// Parses `s3://bucket[/prefix]`, normalizing the prefix to end with `/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheme is not `s3://` or the bucket is empty.
    pub fn parse(location: &str) -> Result<Self, StorageError> {
        let normalized = normalize_location(location.trim());
        let rest = normalized
            .strip_prefix(SCHEME)
            .ok_or_else(|| StorageError::invalid_location(location))?;

        let (bucket, prefix) = rest
            .split_once('/')
            .ok_or_else(|| StorageError::invalid_location(location))?;
        if bucket.is_empty() {
            return Err(StorageError::invalid_location(location));
        }

        Ok(Self {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
        })
    }

    /// Bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Key prefix; empty for the bucket root, otherwise ends with `/`.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full URI, always with a trailing `/`.
    #[must_use]
    pub fn uri(&self) -> String {
        format!("{SCHEME}{}/{}", self.bucket, self.prefix)
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}
