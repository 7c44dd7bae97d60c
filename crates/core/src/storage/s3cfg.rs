//! `s3cmd` configuration file.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::{debug, info};

use super::error::StorageError;
use crate::credentials::Credentials;

/// Result of [`configure_s3cmd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigureOutcome {
    /// A new config file was written.
    Written,
    /// A file already existed and was left untouched.
    AlreadyPresent,
}

/// Renders the `s3cmd` config for `creds`.
#[must_use]
pub fn render_s3cmd_config(creds: &Credentials, bucket_location: &str) -> String {
    format!(
        "[default]\n\
         access_key = {}\n\
         acl_public = False\n\
         bucket_location = {bucket_location}\n\
         encrypt = False\n\
         secret_key = {}\n",
        creds.access_key, creds.secret_key
    )
}

/// Writes the `s3cmd` config at `path` unless a file is already there.
///
/// An existing file is never rewritten, even if it holds other credentials.
///
/// # Errors
///
/// Returns [`StorageError::Configuration`] if the file cannot be created or
/// written.
pub fn configure_s3cmd(
    path: &Path,
    creds: &Credentials,
    bucket_location: &str,
) -> Result<ConfigureOutcome, StorageError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "s3cmd config already present");
            return Ok(ConfigureOutcome::AlreadyPresent);
        }
        Err(e) => {
            return Err(StorageError::configuration(format!(
                "can't create {}: {e}",
                path.display()
            )));
        }
    };

    file.write_all(render_s3cmd_config(creds, bucket_location).as_bytes())
        .map_err(|e| {
            StorageError::configuration(format!("can't write {}: {e}", path.display()))
        })?;

    info!(path = %path.display(), "Wrote s3cmd config");
    Ok(ConfigureOutcome::Written)
}
