//! Shared configuration, errors, and mail delivery for reportmail.
//!
//! This crate provides the pieces every other crate leans on:
//! - Layered configuration (files + `REPORTMAIL__*` environment)
//! - The run-level error taxonomy
//! - Report delivery over SMTP

pub mod config;
pub mod email;
pub mod error;

pub use config::{AppConfig, EmailConfig, StorageBackend};
pub use email::{EmailError, EmailService, ReportEmail, sender_domain};
pub use error::{AppError, AppResult};
