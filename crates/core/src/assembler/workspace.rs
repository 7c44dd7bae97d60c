//! Per-run scratch workspace.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::error::AssemblyError;

/// A uniquely named scratch directory with a `parts/` subdirectory.
///
/// The directory is persisted: nothing removes it when the run ends.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Creates `<parent>/<prefix>XXXXXX/parts`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn create(parent: &Path, prefix: &str) -> Result<Self, AssemblyError> {
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(parent)
            .map_err(|e| AssemblyError::workspace(parent, &e))?;
        let root = dir.keep();
        let root = std::path::absolute(&root).map_err(|e| AssemblyError::workspace(&root, &e))?;

        let workspace = Self { root };
        fs::create_dir(workspace.parts_dir())
            .map_err(|e| AssemblyError::workspace(workspace.parts_dir(), &e))?;

        info!(workspace = %workspace.root.display(), "Created workspace");
        Ok(workspace)
    }

    /// Workspace root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the downloaded parts.
    #[must_use]
    pub fn parts_dir(&self) -> PathBuf {
        self.root.join("parts")
    }

    /// Directory holding the concatenated CSV.
    #[must_use]
    pub fn output_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// `<root>/<name>/<name>.csv`
    #[must_use]
    pub fn csv_path(&self, name: &str) -> PathBuf {
        self.output_dir(name).join(format!("{name}.csv"))
    }

    /// `<root>/<name>.zip`
    #[must_use]
    pub fn archive_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.zip"))
    }
}
