//! The storage capability the assembler depends on.

use std::future::Future;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::StorageError;
use super::location::StorageLocation;

/// Last `s3://` URI on a listing line and its final path segment.
static LISTING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*(s3://.*?([^/]+))$").expect("valid listing pattern"));

/// An object found under a report location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    /// Full object URI (`s3://bucket/key`).
    pub uri: String,
    /// Object key within its bucket.
    pub key: String,
    /// Final path segment, used as the local file name.
    pub file_name: String,
}

impl RemoteObject {
    /// Builds an object from its full URI.
    ///
    /// Returns `None` for URIs without a file-name segment (directories).
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("s3://")?;
        let (_, key) = rest.split_once('/')?;
        let file_name = key.rsplit('/').next().filter(|name| !name.is_empty())?;

        Some(Self {
            uri: uri.to_string(),
            key: key.to_string(),
            file_name: file_name.to_string(),
        })
    }
}

/// Parses one line of `s3cmd ls` output.
///
/// Lines without an object URI (headers, `DIR` entries) yield `None`.
#[must_use]
pub fn parse_listing_line(line: &str) -> Option<RemoteObject> {
    let line = line.trim_end_matches(['\r', '\n']);
    let caps = LISTING_LINE.captures(line)?;
    let uri = caps.get(1)?.as_str();
    let file_name = caps.get(2)?.as_str();

    let mut object = RemoteObject::from_uri(uri)?;
    object.file_name = file_name.to_string();
    Some(object)
}

/// List and fetch operations over a flat object layout.
pub trait StorageClient: Send + Sync {
    /// Lists the objects directly under `location`.
    fn list(
        &self,
        location: &StorageLocation,
    ) -> impl Future<Output = Result<Vec<RemoteObject>, StorageError>> + Send;

    /// Downloads `object` to the local file `dest`.
    fn fetch(
        &self,
        object: &RemoteObject,
        dest: &Path,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}
