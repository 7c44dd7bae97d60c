//! Ordered scan of Hadoop site files for S3 credentials.

use std::fmt;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use reportmail_shared::config::CredentialsConfig;
use tracing::debug;

use super::error::CredentialError;

static SECRET_KEY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"<property><name>fs\.s3n\.awsSecretAccessKey</name><value>(.+)</value></property>",
    )
    .expect("valid secret key pattern")
});

static ACCESS_KEY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<property><name>fs\.s3n\.awsAccessKeyId</name><value>(.+)</value></property>")
        .expect("valid access key pattern")
});

/// An access key / secret key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Access key identifier.
    pub access_key: String,
    /// Secret access key.
    pub secret_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Partial scan result carried across lines and across files.
#[derive(Debug, Default)]
pub struct ScanState {
    access_key: Option<String>,
    secret_key: Option<String>,
}

impl ScanState {
    /// Feeds one line; returns the pair once both halves have been seen.
    ///
    /// A repeated pattern overwrites the earlier capture until the pair is
    /// complete.
    pub fn feed(&mut self, line: &str) -> Option<Credentials> {
        if let Some(caps) = SECRET_KEY_LINE.captures(line) {
            self.secret_key = Some(caps[1].to_string());
        }
        if let Some(caps) = ACCESS_KEY_LINE.captures(line) {
            self.access_key = Some(caps[1].to_string());
        }

        match (&self.access_key, &self.secret_key) {
            (Some(access_key), Some(secret_key)) => Some(Credentials {
                access_key: access_key.clone(),
                secret_key: secret_key.clone(),
            }),
            _ => None,
        }
    }

    /// Feeds lines until a pair is complete. Remaining lines are not consumed.
    pub fn scan_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) -> Option<Credentials> {
        lines.into_iter().find_map(|line| self.feed(line))
    }
}

/// Scans an ordered list of configuration files for credentials.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    candidates: Vec<PathBuf>,
}

impl CredentialResolver {
    /// Creates a resolver over `base_dir/<candidate>` for each candidate, in order.
    #[must_use]
    pub fn new<S: AsRef<str>>(base_dir: impl AsRef<Path>, candidates: &[S]) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            candidates: candidates
                .iter()
                .map(|name| base_dir.join(name.as_ref()))
                .collect(),
        }
    }

    /// Creates a resolver from the `credentials` configuration section.
    #[must_use]
    pub fn from_config(config: &CredentialsConfig) -> Self {
        Self::new(&config.base_dir, config.candidates.as_slice())
    }

    /// Resolver for a stock EMR node: `/home/hadoop/conf/{core,hadoop}-site.xml`.
    #[must_use]
    pub fn hadoop_default() -> Self {
        Self::from_config(&CredentialsConfig::default())
    }

    /// Candidate files in scan order.
    #[must_use]
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Returns the first complete credential pair.
    ///
    /// Missing files are skipped. Scanning stops at the line that completes
    /// the pair; later lines and later files are never read.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::NotFound`] if no pair could be assembled and
    /// [`CredentialError::Read`] if an existing file cannot be read.
    pub fn resolve(&self) -> Result<Credentials, CredentialError> {
        let mut state = ScanState::default();

        for path in &self.candidates {
            if !path.is_file() {
                debug!(path = %path.display(), "Credential candidate missing");
                continue;
            }

            let contents = std::fs::read_to_string(path).map_err(|e| CredentialError::Read {
                path: path.clone(),
                reason: e.to_string(),
            })?;

            if let Some(creds) = state.scan_lines(contents.lines()) {
                debug!(
                    path = %path.display(),
                    access_key = %creds.access_key,
                    "Resolved storage credentials"
                );
                return Ok(creds);
            }
        }

        Err(CredentialError::not_found(self.candidates.clone()))
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
