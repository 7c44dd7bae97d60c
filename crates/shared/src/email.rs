//! Report delivery over an authenticated SMTP relay.
//!
//! Uses `lettre` both for the MIME multipart message and for the STARTTLS
//! transport. Exactly one submission is attempted per report.

use std::path::Path;
use std::time::Duration;

use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{
        Attachment, Body, Mailbox, MultiPart, SinglePart,
        header::{ContentTransferEncoding, ContentType},
    },
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        extension::ClientId,
    },
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::EmailConfig;

/// MIME type of the report attachment.
const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Email service errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Failed to build email message.
    #[error("Failed to build email: {0}")]
    BuildError(String),
    /// Failed to send email.
    #[error("Failed to send email: {0}")]
    SendError(String),
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
    /// The sender address has no usable domain part.
    #[error("Can't figure out domain from {0}. Is it a valid address?")]
    InvalidSenderDomain(String),
    /// The report archive could not be read.
    #[error("Failed to read attachment {path}: {reason}")]
    AttachmentRead {
        /// Archive path.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },
    /// The report archive is empty.
    #[error("Attachment {0} is empty")]
    EmptyAttachment(String),
}

/// Extracts the domain of a sender address (`local@domain`).
///
/// The address must contain exactly one `@` with something on both sides.
///
/// # Errors
///
/// Returns [`EmailError::InvalidSenderDomain`] for anything else.
pub fn sender_domain(address: &str) -> Result<&str, EmailError> {
    match address.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(domain)
        }
        _ => Err(EmailError::InvalidSenderDomain(address.to_string())),
    }
}

/// A report ready to be mailed.
#[derive(Debug, Clone)]
pub struct ReportEmail {
    /// Sole recipient address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Report name; the attachment is named `<report_name>.zip`.
    pub report_name: String,
    /// Raw archive bytes.
    pub archive: Vec<u8>,
}

impl ReportEmail {
    /// File name of the attachment.
    #[must_use]
    pub fn attachment_name(&self) -> String {
        format!("{}.zip", self.report_name)
    }
}

/// Email service for delivering reports.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new email service.
    #[must_use]
    pub const fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Reads the archive produced by the assembler.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is empty.
    pub async fn read_archive(path: &Path) -> Result<Vec<u8>, EmailError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| EmailError::AttachmentRead {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        if bytes.is_empty() {
            return Err(EmailError::EmptyAttachment(path.display().to_string()));
        }
        Ok(bytes)
    }

    /// Creates the STARTTLS SMTP transport.
    fn create_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let domain = sender_domain(&self.config.from_email)?;
        let creds = Credentials::new(
            self.config.smtp_user().to_string(),
            self.config.smtp_password.clone(),
        );

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)
            .map_err(|e| EmailError::SendError(e.to_string()))?
            .port(self.config.smtp_port)
            .hello_name(ClientId::Domain(domain.to_string()))
            .credentials(creds)
            .authentication(vec![Mechanism::Login, Mechanism::Plain]);

        if let Some(secs) = self.config.timeout_secs {
            builder = builder.timeout(Some(Duration::from_secs(secs)));
        }

        Ok(builder.build())
    }

    /// Builds the multipart message: a short text part and the zip attachment.
    ///
    /// # Errors
    ///
    /// Returns an error if an address is invalid or the message cannot be built.
    pub fn build_report_message(&self, report: &ReportEmail) -> Result<Message, EmailError> {
        let from_address: Address = self
            .config
            .from_email
            .parse()
            .map_err(|e| EmailError::InvalidAddress(format!("{}: {e}", self.config.from_email)))?;
        let from = Mailbox::new(Some(self.config.from_name.clone()), from_address);
        let to: Mailbox = report
            .recipient
            .parse()
            .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?;

        let content_type = ContentType::parse(ZIP_CONTENT_TYPE)
            .map_err(|e| EmailError::BuildError(e.to_string()))?;
        let body = Body::new_with_encoding(report.archive.clone(), ContentTransferEncoding::Base64)
            .map_err(|_| EmailError::BuildError("attachment is not encodable".to_string()))?;

        let text = SinglePart::plain(format!("{} attached.", report.report_name));
        let attachment = Attachment::new(report.attachment_name()).body(body, content_type);

        Message::builder()
            .from(from)
            .to(to)
            .subject(report.subject.as_str())
            .multipart(MultiPart::mixed().singlepart(text).singlepart(attachment))
            .map_err(|e| EmailError::BuildError(e.to_string()))
    }

    /// Sends the report to its recipient with a single submission attempt.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be built or the relay rejects
    /// the connection, the login, or the message.
    pub async fn send_report(&self, report: &ReportEmail) -> Result<(), EmailError> {
        let message = self.build_report_message(report)?;
        let transport = self.create_transport()?;

        debug!(
            smtp_host = %self.config.smtp_host,
            smtp_port = self.config.smtp_port,
            "Submitting report"
        );
        transport
            .send(message)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        info!(
            recipient = %report.recipient,
            attachment = %report.attachment_name(),
            bytes = report.archive.len(),
            "Report sent"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "email_tests.rs"]
mod tests;
