//! send-report CLI
//!
//! Terminal step of a report job: fetch the report parts from S3, build
//! `<name>.zip`, and mail it.

use std::process::ExitCode;

use clap::Parser;
use reportmail_shared::{AppConfig, AppError};
use tracing::error;

mod args;
mod run;

use args::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    run::init_logging(cli.log_format)?;

    let result = match AppConfig::load() {
        Ok(config) => run::execute(&cli, &config).await,
        Err(e) => Err(AppError::from(e)),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            error!(code = err.error_code(), "{err}");
            eprintln!("error: {err}");
            Ok(ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1)))
        }
    }
}
