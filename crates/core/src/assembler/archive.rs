//! Archiving of the report directory.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::write::FileOptions;

use super::error::AssemblyError;

/// Compresses the files of a directory into a single archive.
pub trait Archiver: Send + Sync {
    /// Archives every regular file directly inside `source_dir` into `dest`.
    fn archive(&self, source_dir: &Path, dest: &Path) -> Result<(), AssemblyError>;
}

/// Deflate zip archiver. Entries are stored under their bare file names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

impl Archiver for ZipArchiver {
    fn archive(&self, source_dir: &Path, dest: &Path) -> Result<(), AssemblyError> {
        let fail = |reason: String| AssemblyError::Archive {
            path: dest.to_path_buf(),
            reason,
        };

        let files = regular_files(source_dir).map_err(|e| fail(e.to_string()))?;
        let out = File::create(dest).map_err(|e| fail(e.to_string()))?;
        let mut zip = zip::ZipWriter::new(out);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for path in files {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                return Err(fail(format!("non UTF-8 file name {}", path.display())));
            };
            zip.start_file(name, options)
                .map_err(|e| fail(e.to_string()))?;
            let mut input = File::open(&path).map_err(|e| fail(e.to_string()))?;
            io::copy(&mut input, &mut zip).map_err(|e| fail(e.to_string()))?;
        }

        zip.finish().map_err(|e| fail(e.to_string()))?;
        Ok(())
    }
}

/// Regular files directly inside `dir`, sorted by file name.
pub(crate) fn regular_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
