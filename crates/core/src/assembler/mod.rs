//! Report assembly.
//!
//! Downloads every part under a report location into a fresh scratch
//! workspace, concatenates the parts into `<name>.csv` and zips the result
//! into `<name>.zip`:
//!
//! ```text
//! <workspace>/parts/part-0000, part-0001, ...
//! <workspace>/<name>/<name>.csv
//! <workspace>/<name>.zip
//! ```
//!
//! Workspaces are left on disk after the run.

mod archive;
mod error;
mod service;
mod workspace;

pub use archive::{Archiver, ZipArchiver};
pub use error::AssemblyError;
pub use service::{AssembledReport, ReportAssembler, concatenate_parts, validate_report_name};
pub use workspace::Workspace;
