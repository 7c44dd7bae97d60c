//! Report assembly for reportmail.
//!
//! Everything between "the job finished" and "the zip is ready to mail":
//!
//! # Modules
//!
//! - `credentials` - S3 credentials scraped from the Hadoop site configuration
//! - `storage` - `s3cmd` configuration and the list/fetch storage clients
//! - `assembler` - scratch workspace, concatenation, and zip archiving

pub mod assembler;
pub mod credentials;
pub mod storage;

pub use assembler::{AssembledReport, AssemblyError, ReportAssembler, ZipArchiver};
pub use credentials::{CredentialError, CredentialResolver, Credentials};
pub use storage::{OpendalClient, S3CmdClient, StorageClient, StorageError, StorageProvider};
