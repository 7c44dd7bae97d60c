//! Application configuration management.
//!
//! Secrets (the SMTP password in particular) are never compiled in. They are
//! read from `config/*` files or from `REPORTMAIL__*` environment variables.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Outgoing mail configuration.
    pub email: EmailConfig,
    /// Where object-storage credentials are looked up.
    #[serde(default)]
    pub credentials: CredentialsConfig,
    /// Object-storage client configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Scratch workspace configuration.
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

/// SMTP relay and sender identity.
#[derive(Clone, Deserialize)]
pub struct EmailConfig {
    /// Mail submission host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// Mail submission port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Login name; falls back to `from_email` when empty.
    #[serde(default)]
    pub smtp_username: String,
    /// Login secret.
    pub smtp_password: String,
    /// Sender address, also used as envelope-from.
    pub from_email: String,
    /// Display name of the sender.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Optional SMTP command timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_name() -> String {
    "Automated".to_string()
}

impl EmailConfig {
    /// Returns the name used to authenticate against the relay.
    #[must_use]
    pub fn smtp_user(&self) -> &str {
        if self.smtp_username.is_empty() {
            &self.from_email
        } else {
            &self.smtp_username
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: String::new(),
            from_name: default_from_name(),
            timeout_secs: None,
        }
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"<redacted>")
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Hadoop configuration files scanned for storage credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsConfig {
    /// Directory holding the candidate files.
    #[serde(default = "default_credentials_dir")]
    pub base_dir: PathBuf,
    /// Candidate file names, scanned in order.
    #[serde(default = "default_credential_candidates")]
    pub candidates: Vec<String>,
}

fn default_credentials_dir() -> PathBuf {
    PathBuf::from("/home/hadoop/conf")
}

fn default_credential_candidates() -> Vec<String> {
    // core-site.xml on hadoop 0.20, hadoop-site.xml on 0.18
    vec!["core-site.xml".to_string(), "hadoop-site.xml".to_string()]
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            base_dir: default_credentials_dir(),
            candidates: default_credential_candidates(),
        }
    }
}

/// Which storage client implementation fetches report parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Shell out to the `s3cmd` CLI.
    #[default]
    S3cmd,
    /// Talk to S3 directly through OpenDAL.
    Native,
}

/// Object-storage client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Client implementation.
    #[serde(default)]
    pub backend: StorageBackend,
    /// `s3cmd` executable.
    #[serde(default = "default_s3cmd_program")]
    pub s3cmd_program: String,
    /// Config file written for and read by `s3cmd`.
    #[serde(default = "default_s3cmd_config")]
    pub s3cmd_config: PathBuf,
    /// `bucket_location` written into the `s3cmd` config.
    #[serde(default = "default_bucket_location")]
    pub bucket_location: String,
    /// Region used by the native client.
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for the native client (MinIO, LocalStack).
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_s3cmd_program() -> String {
    "s3cmd".to_string()
}

fn default_s3cmd_config() -> PathBuf {
    PathBuf::from("/home/hadoop/.s3cfg")
}

fn default_bucket_location() -> String {
    "US".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            s3cmd_program: default_s3cmd_program(),
            s3cmd_config: default_s3cmd_config(),
            bucket_location: default_bucket_location(),
            region: default_region(),
            endpoint: None,
        }
    }
}

/// Scratch workspace configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceConfig {
    /// Parent directory in which per-run workspaces are created.
    #[serde(default = "default_workspace_parent")]
    pub parent_dir: PathBuf,
    /// Name prefix of each workspace directory.
    #[serde(default = "default_workspace_prefix")]
    pub prefix: String,
}

fn default_workspace_parent() -> PathBuf {
    PathBuf::from("/mnt")
}

fn default_workspace_prefix() -> String {
    "report".to_string()
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            parent_dir: default_workspace_parent(),
            prefix: default_workspace_prefix(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or a required key
    /// (`email.from_email`, `email.smtp_password`) is missing.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "production".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("REPORTMAIL").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
