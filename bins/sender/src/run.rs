//! The send-report flow: credentials, storage client, assembly, mail.

use anyhow::Result;
use reportmail_core::assembler::{AssembledReport, ReportAssembler, ZipArchiver};
use reportmail_core::credentials::{CredentialResolver, Credentials};
use reportmail_core::storage::{
    ConfigureOutcome, OpendalClient, S3CmdClient, StorageClient, StorageLocation, StorageProvider,
    configure_s3cmd,
};
use reportmail_shared::{
    AppConfig, AppResult, EmailService, ReportEmail, StorageBackend, sender_domain,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::{Cli, LogFormat};

/// Initialize logging to stderr.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_logging(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "reportmail=info,send_report=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}

/// Runs every stage in order. The first failure ends the run.
pub async fn execute(cli: &Cli, config: &AppConfig) -> AppResult<()> {
    let email = match config.storage.backend {
        StorageBackend::S3cmd => {
            prepare(cli, config, |_| {
                Ok(S3CmdClient::new(
                    config.storage.s3cmd_program.clone(),
                    config.storage.s3cmd_config.clone(),
                ))
            })
            .await?
        }
        StorageBackend::Native => {
            prepare(cli, config, |creds| {
                let location = StorageLocation::parse(&cli.report)?;
                let provider = StorageProvider::s3(location.bucket(), creds, &config.storage);
                Ok(OpendalClient::from_provider(&provider)?)
            })
            .await?
        }
    };

    EmailService::new(config.email.clone())
        .send_report(&email)
        .await?;

    Ok(())
}

/// Stages up to the mail submission.
///
/// `storage_client` builds the client once credentials are known.
async fn prepare<S, F>(cli: &Cli, config: &AppConfig, storage_client: F) -> AppResult<ReportEmail>
where
    S: StorageClient,
    F: FnOnce(&Credentials) -> AppResult<S>,
{
    sender_domain(&config.email.from_email)?;

    let creds = resolve_credentials(config)?;
    configure_storage_client(config, &creds)?;

    let report = assemble(storage_client(&creds)?, cli, config).await?;
    info!(report = %report.archive_path.display(), "have report");

    compose(cli, &report).await
}

/// Stage 1: storage credentials from the Hadoop configuration.
fn resolve_credentials(config: &AppConfig) -> AppResult<Credentials> {
    let creds = CredentialResolver::from_config(&config.credentials).resolve()?;
    info!(access_key = %creds.access_key, "Resolved storage credentials");
    Ok(creds)
}

/// Stage 2: the `s3cmd` config file, written once.
fn configure_storage_client(config: &AppConfig, creds: &Credentials) -> AppResult<()> {
    let outcome = configure_s3cmd(
        &config.storage.s3cmd_config,
        creds,
        &config.storage.bucket_location,
    )?;
    if outcome == ConfigureOutcome::AlreadyPresent {
        info!(
            path = %config.storage.s3cmd_config.display(),
            "Keeping existing s3cmd config"
        );
    }
    Ok(())
}

/// Stage 3: download, concatenate, and zip the report parts.
async fn assemble<S: StorageClient>(
    storage: S,
    cli: &Cli,
    config: &AppConfig,
) -> AppResult<AssembledReport> {
    let assembler = ReportAssembler::new(storage, ZipArchiver, &config.workspace);
    Ok(assembler.assemble(&cli.name, &cli.report).await?)
}

/// Stage 4 input: the archive wrapped up for mailing.
async fn compose(cli: &Cli, report: &AssembledReport) -> AppResult<ReportEmail> {
    let archive = EmailService::read_archive(&report.archive_path).await?;
    Ok(ReportEmail {
        recipient: cli.email.clone(),
        subject: cli.subject.clone(),
        report_name: cli.name.clone(),
        archive,
    })
}
