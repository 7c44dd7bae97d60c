use std::fs;

use proptest::prelude::*;
use tempfile::TempDir;

use super::*;

fn key_line(value: &str) -> String {
    format!("<property><name>fs.s3n.awsAccessKeyId</name><value>{value}</value></property>")
}

fn secret_line(value: &str) -> String {
    format!("<property><name>fs.s3n.awsSecretAccessKey</name><value>{value}</value></property>")
}

fn site_file(lines: &[String]) -> String {
    let mut contents = String::from("<?xml version=\"1.0\"?>\n<configuration>\n");
    for line in lines {
        contents.push_str("  ");
        contents.push_str(line);
        contents.push('\n');
    }
    contents.push_str("</configuration>\n");
    contents
}

fn resolver_in(dir: &TempDir) -> CredentialResolver {
    CredentialResolver::new(dir.path(), &["core-site.xml", "hadoop-site.xml"])
}

#[test]
fn test_resolves_from_first_candidate() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("core-site.xml"),
        site_file(&[key_line("AKIA1"), secret_line("s3cr3t")]),
    )
    .expect("write");

    let creds = resolver_in(&dir).resolve().expect("credentials");
    assert_eq!(creds.access_key, "AKIA1");
    assert_eq!(creds.secret_key, "s3cr3t");
}

#[test]
fn test_falls_back_to_second_candidate() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("hadoop-site.xml"),
        site_file(&[secret_line("older-secret"), key_line("AKIAOLD")]),
    )
    .expect("write");

    let creds = resolver_in(&dir).resolve().expect("credentials");
    assert_eq!(creds.access_key, "AKIAOLD");
    assert_eq!(creds.secret_key, "older-secret");
}

#[test]
fn test_first_complete_pair_wins_within_file() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("core-site.xml"),
        site_file(&[
            key_line("AKIA1"),
            secret_line("first"),
            key_line("AKIA2"),
            secret_line("second"),
        ]),
    )
    .expect("write");

    let creds = resolver_in(&dir).resolve().expect("credentials");
    assert_eq!(creds.access_key, "AKIA1");
    assert_eq!(creds.secret_key, "first");
}

#[test]
fn test_first_file_wins_over_second() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("core-site.xml"),
        site_file(&[key_line("CORE"), secret_line("core-secret")]),
    )
    .expect("write");
    fs::write(
        dir.path().join("hadoop-site.xml"),
        site_file(&[key_line("HADOOP"), secret_line("hadoop-secret")]),
    )
    .expect("write");

    let creds = resolver_in(&dir).resolve().expect("credentials");
    assert_eq!(creds.access_key, "CORE");
}

#[test]
fn test_repeated_pattern_overwrites_until_pair_complete() {
    let mut state = ScanState::default();
    let lines = [key_line("A"), key_line("B"), secret_line("S"), key_line("C")];

    let creds = state
        .scan_lines(lines.iter().map(String::as_str))
        .expect("pair");
    assert_eq!(creds.access_key, "B");
    assert_eq!(creds.secret_key, "S");
}

#[test]
fn test_partial_pair_carries_across_files() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("core-site.xml"), site_file(&[key_line("AKIA1")])).expect("write");
    fs::write(
        dir.path().join("hadoop-site.xml"),
        site_file(&[secret_line("from-second")]),
    )
    .expect("write");

    let creds = resolver_in(&dir).resolve().expect("credentials");
    assert_eq!(creds.access_key, "AKIA1");
    assert_eq!(creds.secret_key, "from-second");
}

#[test]
fn test_not_found_when_no_files() {
    let dir = TempDir::new().expect("tempdir");
    let err = resolver_in(&dir).resolve().unwrap_err();

    match err {
        CredentialError::NotFound { searched } => {
            assert_eq!(searched.len(), 2);
            assert!(searched[0].ends_with("core-site.xml"));
            assert!(searched[1].ends_with("hadoop-site.xml"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_not_found_with_only_one_half() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("core-site.xml"), site_file(&[key_line("AKIA1")])).expect("write");

    let err = resolver_in(&dir).resolve().unwrap_err();
    assert!(matches!(err, CredentialError::NotFound { .. }));
}

#[test]
fn test_multiline_property_is_not_matched() {
    let mut state = ScanState::default();
    let lines = [
        "<property>",
        "  <name>fs.s3n.awsAccessKeyId</name>",
        "  <value>AKIA1</value>",
        "</property>",
    ];
    assert!(state.scan_lines(lines).is_none());
}

#[test]
fn test_credentials_debug_redacts_secret() {
    let creds = Credentials {
        access_key: "AKIA1".to_string(),
        secret_key: "s3cr3t".to_string(),
    };
    let rendered = format!("{creds:?}");
    assert!(rendered.contains("AKIA1"));
    assert!(!rendered.contains("s3cr3t"));
}

#[test]
fn test_hadoop_default_candidates() {
    let resolver = CredentialResolver::hadoop_default();
    assert_eq!(
        resolver.candidates(),
        &[
            PathBuf::from("/home/hadoop/conf/core-site.xml"),
            PathBuf::from("/home/hadoop/conf/hadoop-site.xml"),
        ]
    );
}

proptest! {
    // The two patterns may appear in either order within one file.
    #[test]
    fn prop_pattern_order_independent(
        key in "[A-Z0-9]{16,20}",
        secret in "[A-Za-z0-9/+]{20,40}",
        filler in proptest::collection::vec("[a-z ]{0,30}", 0..5),
    ) {
        let mut forward: Vec<String> = filler.clone();
        forward.push(key_line(&key));
        forward.extend(filler.iter().cloned());
        forward.push(secret_line(&secret));

        let mut backward: Vec<String> = filler.clone();
        backward.push(secret_line(&secret));
        backward.extend(filler.iter().cloned());
        backward.push(key_line(&key));

        let a = ScanState::default().scan_lines(forward.iter().map(String::as_str));
        let b = ScanState::default().scan_lines(backward.iter().map(String::as_str));

        prop_assert_eq!(a.clone(), b);
        let creds = a.expect("pair found");
        prop_assert_eq!(creds.access_key, key);
        prop_assert_eq!(creds.secret_key, secret);
    }
}
