//! Storage client that shells out to `s3cmd`.

use std::path::{Path, PathBuf};
use std::process::Output;

use tokio::process::Command;
use tracing::debug;

use super::client::{RemoteObject, StorageClient, parse_listing_line};
use super::error::StorageError;
use super::location::StorageLocation;

/// `s3cmd`-backed storage client.
#[derive(Debug, Clone)]
pub struct S3CmdClient {
    program: String,
    config_path: PathBuf,
}

impl S3CmdClient {
    /// Creates a client running `program` with `-c config_path`.
    #[must_use]
    pub fn new(program: impl Into<String>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            config_path: config_path.into(),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("-c").arg(&self.config_path);
        command
    }

    async fn run(&self, mut command: Command, command_line: String) -> Result<Output, StorageError> {
        debug!(command = %command_line, "Running s3cmd");
        let output = command
            .output()
            .await
            .map_err(|e| StorageError::Spawn {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            Ok(output)
        } else {
            Err(StorageError::CommandFailed {
                command: command_line,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl StorageClient for S3CmdClient {
    async fn list(&self, location: &StorageLocation) -> Result<Vec<RemoteObject>, StorageError> {
        let uri = location.uri();
        let mut command = self.command();
        command.arg("ls").arg(&uri);

        let output = self.run(command, format!("{} ls {uri}", self.program)).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        Ok(stdout.lines().filter_map(parse_listing_line).collect())
    }

    async fn fetch(&self, object: &RemoteObject, dest: &Path) -> Result<(), StorageError> {
        let mut command = self.command();
        command.arg("get").arg(&object.uri).arg(dest);

        self.run(
            command,
            format!("{} get {} {}", self.program, object.uri, dest.display()),
        )
        .await
        .map(|_| ())
        .map_err(|e| StorageError::download_failed(&object.uri, e.to_string()))
    }
}
