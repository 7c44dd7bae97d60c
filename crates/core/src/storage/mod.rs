//! Object-storage access for report parts.
//!
//! The assembler only sees the [`StorageClient`] capability (list + fetch).
//! Two implementations exist:
//! - [`S3CmdClient`] shells out to the `s3cmd` CLI, configured by [`configure_s3cmd`]
//! - [`OpendalClient`] talks to S3 (or a local directory) through Apache OpenDAL
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 StorageClient (list / fetch)                 │
//! ├──────────────────────────────┬───────────────────────────────┤
//! │ S3CmdClient                  │ OpendalClient                 │
//! │ `s3cmd ls s3://b/prefix/`    │ op.list("prefix/")            │
//! │ `s3cmd get s3://b/k dest`    │ op.read("k") -> dest          │
//! └──────────────────────────────┴───────────────────────────────┘
//! ```

mod client;
mod config;
mod error;
mod location;
mod native;
mod s3cfg;
mod s3cmd;

pub use client::{RemoteObject, StorageClient, parse_listing_line};
pub use config::StorageProvider;
pub use error::StorageError;
pub use location::{StorageLocation, normalize_location};
pub use native::OpendalClient;
pub use s3cfg::{ConfigureOutcome, configure_s3cmd, render_s3cmd_config};
pub use s3cmd::S3CmdClient;
