//! Report assembly service.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use reportmail_shared::config::WorkspaceConfig;
use tracing::info;

use super::archive::{Archiver, regular_files};
use super::error::AssemblyError;
use super::workspace::Workspace;
use crate::storage::{StorageClient, StorageLocation};

/// Outcome of a successful assembly.
#[derive(Debug, Clone)]
pub struct AssembledReport {
    /// Workspace the report was built in.
    pub workspace: Workspace,
    /// Number of parts downloaded.
    pub part_count: usize,
    /// Concatenated CSV.
    pub csv_path: PathBuf,
    /// Size of the CSV in bytes.
    pub csv_bytes: u64,
    /// Absolute path of the zip archive.
    pub archive_path: PathBuf,
}

/// Rejects names that cannot serve as a single file name.
///
/// # Errors
///
/// Returns [`AssemblyError::InvalidName`] for empty names, `.`/`..`, and names
/// containing path separators.
pub fn validate_report_name(name: &str) -> Result<(), AssemblyError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(AssemblyError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Concatenates every regular file of `parts_dir`, in file-name order, into `dest`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns an I/O error if a part cannot be read or `dest` cannot be written.
pub fn concatenate_parts(parts_dir: &Path, dest: &Path) -> io::Result<u64> {
    let mut out = File::create(dest)?;
    let mut total = 0;
    for part in regular_files(parts_dir)? {
        let mut input = File::open(&part)?;
        total += io::copy(&mut input, &mut out)?;
    }
    out.sync_all()?;
    Ok(total)
}

/// Downloads, concatenates, and archives report parts.
pub struct ReportAssembler<S, A> {
    storage: S,
    archiver: A,
    workspace_parent: PathBuf,
    workspace_prefix: String,
}

impl<S: StorageClient, A: Archiver> ReportAssembler<S, A> {
    /// Creates an assembler that builds workspaces per `config`.
    #[must_use]
    pub fn new(storage: S, archiver: A, config: &WorkspaceConfig) -> Self {
        Self {
            storage,
            archiver,
            workspace_parent: config.parent_dir.clone(),
            workspace_prefix: config.prefix.clone(),
        }
    }

    /// Builds `<name>.zip` from every object directly under `location`.
    ///
    /// The name and location are validated before anything touches the disk.
    /// The first failing step aborts the whole assembly.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name or location is invalid
    /// - The workspace cannot be created
    /// - Listing or any download fails
    /// - No objects were found
    /// - Concatenation or archiving fails
    pub async fn assemble(&self, name: &str, location: &str) -> Result<AssembledReport, AssemblyError> {
        validate_report_name(name)?;
        let location = StorageLocation::parse(location)?;
        info!(%location, "Assembling report");

        let workspace = Workspace::create(&self.workspace_parent, &self.workspace_prefix)?;
        let parts_dir = workspace.parts_dir();

        let objects = self.storage.list(&location).await?;
        for object in &objects {
            info!(object = %object.uri, file = %object.file_name, "Downloading");
            self.storage
                .fetch(object, &parts_dir.join(&object.file_name))
                .await
                .map_err(|e| AssemblyError::Download {
                    uri: object.uri.clone(),
                    reason: e.to_string(),
                })?;
        }

        if objects.is_empty() {
            return Err(AssemblyError::no_files_found(location.uri()));
        }

        let output_dir = workspace.output_dir(name);
        fs::create_dir(&output_dir).map_err(|e| AssemblyError::workspace(&output_dir, &e))?;

        let csv_path = workspace.csv_path(name);
        let csv_bytes =
            concatenate_parts(&parts_dir, &csv_path).map_err(|e| AssemblyError::Concatenate {
                path: csv_path.clone(),
                reason: e.to_string(),
            })?;
        info!(csv = %csv_path.display(), bytes = csv_bytes, parts = objects.len(), "Concatenated parts");

        let archive_path = workspace.archive_path(name);
        self.archiver.archive(&output_dir, &archive_path)?;

        let archive_len = fs::metadata(&archive_path).map_or(0, |m| m.len());
        if archive_len == 0 {
            return Err(AssemblyError::EmptyArchive(archive_path));
        }
        info!(archive = %archive_path.display(), bytes = archive_len, "Archived report");

        Ok(AssembledReport {
            workspace,
            part_count: objects.len(),
            csv_path,
            csv_bytes,
            archive_path,
        })
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
