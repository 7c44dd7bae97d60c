use base64::{Engine as _, engine::general_purpose::STANDARD};
use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::config::EmailConfig;

fn test_config() -> EmailConfig {
    EmailConfig {
        smtp_host: "localhost".to_string(),
        smtp_port: 1025,
        smtp_username: String::new(),
        smtp_password: "password".to_string(),
        from_email: "reports@example.com".to_string(),
        from_name: "Automated".to_string(),
        timeout_secs: None,
    }
}

fn sales_report(archive: Vec<u8>) -> ReportEmail {
    ReportEmail {
        recipient: "ops@example.com".to_string(),
        subject: "Sales Report".to_string(),
        report_name: "sales".to_string(),
        archive,
    }
}

/// Pulls the base64 payload of the attachment part out of a rendered message.
fn attachment_payload(rendered: &str) -> String {
    let disposition = rendered
        .find("Content-Disposition: attachment")
        .expect("attachment part present");
    let rest = &rendered[disposition..];
    let body_start = rest.find("\r\n\r\n").expect("end of part headers") + 4;
    let body = &rest[body_start..];
    let body_end = body.find("\r\n--").expect("closing boundary");
    body[..body_end].replace("\r\n", "")
}

#[test]
fn test_new_email_service() {
    let config = test_config();
    let service = EmailService::new(config.clone());
    assert_eq!(service.config.smtp_host, config.smtp_host);
}

#[rstest]
#[case("reports@example.com", "example.com")]
#[case("a@b", "b")]
#[case("first.last@mail.corp.example", "mail.corp.example")]
fn test_sender_domain_valid(#[case] address: &str, #[case] expected: &str) {
    assert_eq!(sender_domain(address).expect("valid address"), expected);
}

#[rstest]
#[case("FROM GMAIL ADDRESS HERE")]
#[case("")]
#[case("@example.com")]
#[case("reports@")]
#[case("a@b@c")]
fn test_sender_domain_invalid(#[case] address: &str) {
    let err = sender_domain(address).unwrap_err();
    assert!(matches!(err, EmailError::InvalidSenderDomain(ref a) if a == address));
}

#[tokio::test]
async fn test_create_transport() {
    let service = EmailService::new(test_config());
    assert!(service.create_transport().is_ok());
}

#[test]
fn test_create_transport_rejects_sender_without_domain() {
    let config = EmailConfig {
        from_email: "not-an-address".to_string(),
        ..test_config()
    };
    let service = EmailService::new(config);
    let err = service.create_transport().unwrap_err();
    assert!(matches!(err, EmailError::InvalidSenderDomain(_)));
}

#[test]
fn test_build_report_message_headers_and_parts() {
    let service = EmailService::new(test_config());
    let message = service
        .build_report_message(&sales_report(b"PK\x03\x04 zip bytes".to_vec()))
        .expect("message builds");

    let rendered = String::from_utf8(message.formatted()).expect("ascii message");
    assert!(rendered.contains("From: Automated <reports@example.com>"));
    assert!(rendered.contains("To: ops@example.com"));
    assert!(rendered.contains("Subject: Sales Report"));
    assert!(rendered.contains("MIME-Version: 1.0"));
    assert!(rendered.contains("multipart/mixed"));
    assert!(rendered.contains("sales attached."));
    assert!(rendered.contains("Content-Type: application/zip"));
    assert!(rendered.contains("Content-Transfer-Encoding: base64"));
    assert!(rendered.contains("sales.zip"));

    let envelope = message.envelope();
    assert_eq!(
        envelope.from().map(ToString::to_string).as_deref(),
        Some("reports@example.com")
    );
    assert_eq!(envelope.to().len(), 1);
    assert_eq!(envelope.to()[0].to_string(), "ops@example.com");
}

#[test]
fn test_build_report_message_invalid_recipient() {
    let service = EmailService::new(test_config());
    let mut report = sales_report(vec![1, 2, 3]);
    report.recipient = "not an address".to_string();

    let err = service.build_report_message(&report).unwrap_err();
    assert!(matches!(err, EmailError::InvalidAddress(_)));
}

#[rstest]
#[case("Automated")]
#[case("Reports, Inc")]
#[case("Ops (EMR)")]
#[case("Data \"Team\"")]
fn test_build_report_message_sender_display_name(#[case] from_name: &str) {
    let config = EmailConfig {
        from_name: from_name.to_string(),
        ..test_config()
    };
    let message = EmailService::new(config)
        .build_report_message(&sales_report(vec![1, 2, 3]))
        .expect("message builds");

    let from = message
        .headers()
        .get::<lettre::message::header::From>()
        .expect("From header");
    let sender = lettre::message::Mailboxes::from(from)
        .into_single()
        .expect("single sender");
    assert_eq!(sender.name.as_deref(), Some(from_name));
    assert_eq!(sender.email.to_string(), "reports@example.com");
}

#[test]
fn test_build_report_message_invalid_sender() {
    let config = EmailConfig {
        from_email: "not an address".to_string(),
        ..test_config()
    };
    let err = EmailService::new(config)
        .build_report_message(&sales_report(vec![1, 2, 3]))
        .unwrap_err();
    assert!(matches!(err, EmailError::InvalidAddress(ref msg) if msg.contains("not an address")));
}

#[test]
fn test_attachment_round_trip() {
    let archive: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    let service = EmailService::new(test_config());
    let message = service
        .build_report_message(&sales_report(archive.clone()))
        .expect("message builds");

    let rendered = String::from_utf8(message.formatted()).expect("ascii message");
    let payload = attachment_payload(&rendered);
    assert_eq!(STANDARD.decode(payload).expect("valid base64"), archive);

    let disposition = rendered.find("Content-Disposition: attachment").unwrap();
    let part = &rendered[disposition..];
    let body = &part[part.find("\r\n\r\n").unwrap() + 4..];
    let body = &body[..body.find("\r\n--").unwrap()];
    assert!(body.lines().count() > 1, "payload is line-wrapped");
    assert!(body.lines().all(|line| line.trim_end().len() <= 76));
}

#[tokio::test]
async fn test_read_archive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sales.zip");
    tokio::fs::write(&path, b"zip").await.expect("write");

    let bytes = EmailService::read_archive(&path).await.expect("readable");
    assert_eq!(bytes, b"zip");
}

#[tokio::test]
async fn test_read_archive_empty_or_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let empty = dir.path().join("empty.zip");
    tokio::fs::write(&empty, b"").await.expect("write");

    let err = EmailService::read_archive(&empty).await.unwrap_err();
    assert!(matches!(err, EmailError::EmptyAttachment(_)));

    let err = EmailService::read_archive(&dir.path().join("missing.zip"))
        .await
        .unwrap_err();
    assert!(matches!(err, EmailError::AttachmentRead { .. }));
}

#[test]
fn test_email_error_display() {
    assert_eq!(
        format!("{}", EmailError::BuildError("msg".into())),
        "Failed to build email: msg"
    );
    assert_eq!(
        format!("{}", EmailError::SendError("msg".into())),
        "Failed to send email: msg"
    );
    assert_eq!(
        format!("{}", EmailError::InvalidAddress("msg".into())),
        "Invalid email address: msg"
    );
    assert_eq!(
        format!("{}", EmailError::InvalidSenderDomain("nobody".into())),
        "Can't figure out domain from nobody. Is it a valid address?"
    );
}

proptest! {
    // Decoding the attachment part reproduces the archive bytes exactly.
    #[test]
    fn prop_attachment_base64_round_trip(archive in proptest::collection::vec(any::<u8>(), 1..4096)) {
        let service = EmailService::new(test_config());
        let message = service
            .build_report_message(&sales_report(archive.clone()))
            .expect("message builds");

        let rendered = String::from_utf8(message.formatted()).expect("ascii message");
        let decoded = STANDARD.decode(attachment_payload(&rendered)).expect("valid base64");
        prop_assert_eq!(decoded, archive);
    }
}
