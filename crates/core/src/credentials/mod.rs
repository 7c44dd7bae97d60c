//! Object-storage credential resolution.
//!
//! Credentials are scraped from the Hadoop site configuration of the cluster
//! the report job ran on. Candidate files are scanned in order and the first
//! complete key/secret pair wins.

mod error;
mod resolver;

pub use error::CredentialError;
pub use resolver::{CredentialResolver, Credentials, ScanState};
