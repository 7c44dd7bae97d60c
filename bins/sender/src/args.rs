//! CLI argument definitions for send-report.

use clap::{Parser, ValueEnum};

/// Mail a report produced by a data-processing job.
///
/// Downloads the part files under an S3 location, concatenates them into
/// `<name>.csv`, zips the result and mails `<name>.zip` to one address.
///
/// ## Example
///
///   send-report -n report_2024_03 -r s3://bucket/reports/2024_03/ \
///       -e reports@company.com -s "Monthly report 2024-03"
#[derive(Parser, Debug, Clone)]
#[command(name = "send-report")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Report file name
    #[arg(short, long)]
    pub name: String,

    /// S3 URL of the report part files
    #[arg(short, long, value_name = "S3_URL")]
    pub report: String,

    /// Recipient email address
    #[arg(short, long, value_name = "ADDRESS")]
    pub email: String,

    /// Email subject
    #[arg(short, long)]
    pub subject: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}
