//! Tests for backend resolution in `LoggerFactory`.

use crate::config::Properties;
use crate::error::LoggerError;
use crate::logger::factory::{LoggerFactory, backend_from};
use crate::logger::level::Severity;
use crate::sinks::BackendKind;
use std::io::Write;
use tempfile::TempDir;

struct Checkout;

fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_defaults_build_system_log_at_error() {
    let factory = LoggerFactory::new();
    let logger = factory.for_class("Foo", None).unwrap();

    assert_eq!(logger.sink().kind(), BackendKind::SystemLog);
    assert_eq!(logger.threshold(), Severity::Error);
    assert_eq!(logger.origin(), "Foo");
}

#[test]
fn test_custom_defaults_apply_without_source() {
    let factory = LoggerFactory::with_defaults(
        Properties::new()
            .with("log_type", "4")
            .with("log_level", "7"),
    );
    let logger = factory.for_class("Foo", None).unwrap();

    assert_eq!(logger.sink().kind(), BackendKind::Console);
    assert_eq!(logger.threshold(), Severity::Debug);
}

#[test]
fn test_unknown_backend_identifier() {
    let factory = LoggerFactory::new();
    for value in ["99", "2", "-1", "console"] {
        let props = Properties::new().with("log_type", value).with("log_level", "3");
        match factory.for_properties("Foo", props) {
            Err(LoggerError::InvalidBackend { value: found }) => assert_eq!(found, value),
            other => panic!("expected InvalidBackend for '{}', got {:?}", value, other),
        }
    }
}

#[test]
fn test_missing_backend_identifier() {
    let props = Properties::new().with("log_level", "3");
    assert!(matches!(
        LoggerFactory::new().for_properties("Foo", props),
        Err(LoggerError::ConfigurationMissing { .. })
    ));
}

#[test]
fn test_invalid_threshold_in_configuration() {
    let props = Properties::new().with("log_type", "4").with("log_level", "12");
    assert!(matches!(
        LoggerFactory::new().for_properties("Foo", props),
        Err(LoggerError::InvalidSeverity { .. })
    ));
}

#[test]
fn test_for_class_loads_properties_file() {
    let dir = TempDir::new().unwrap();
    let log_file = dir.path().join("custom_logger_file.log");
    let config = write_config(
        &dir,
        "customfile.properties",
        &format!("log_type=3\nlog_level=7\nlog_file={}\n", log_file.display()),
    );

    let logger = LoggerFactory::new().for_class("Foo", Some(&config)).unwrap();
    assert_eq!(logger.sink().kind(), BackendKind::CustomFile);
    assert_eq!(logger.threshold(), Severity::Debug);
    assert!(log_file.exists());
}

#[test]
fn test_for_class_loads_json_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "logger.json", r#"{"log_type": 4, "log_level": "notice"}"#);

    let logger = LoggerFactory::new().for_class("Foo", Some(&config)).unwrap();
    assert_eq!(logger.sink().kind(), BackendKind::Console);
    assert_eq!(logger.threshold(), Severity::Notice);
}

#[test]
fn test_for_class_with_unreadable_source() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.properties");
    assert!(matches!(
        LoggerFactory::new().for_class("Foo", Some(&missing)),
        Err(LoggerError::ConfigurationUnreadable { .. })
    ));
}

#[test]
fn test_for_instance_uses_type_name() {
    let factory = LoggerFactory::with_defaults(
        Properties::new()
            .with("log_type", "4")
            .with("log_level", "3"),
    );
    let logger = factory.for_instance(&Checkout, None).unwrap();

    assert!(logger.origin().ends_with("::Checkout"), "origin was {}", logger.origin());
}

#[test]
fn test_backend_specific_keys_are_required() {
    let factory = LoggerFactory::new();
    let cases = [
        ("3", "log_file"),
        ("1", "log_mail_to"),
        ("5", "db.connect.path"),
    ];

    for (log_type, key) in cases {
        let props = Properties::new().with("log_type", log_type).with("log_level", "3");
        match factory.for_properties("Foo", props) {
            Err(LoggerError::ConfigurationMissing { key: missing }) => assert_eq!(missing, key),
            other => panic!("expected {} to be required, got {:?}", key, other),
        }
    }
}

#[test]
fn test_each_identifier_resolves_its_backend() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("logger.db");
    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute_batch("CREATE TABLE logger (val TEXT)")
        .unwrap();

    let base = Properties::new()
        .with("log_level", "3")
        .with("log_file", dir.path().join("app.log").display().to_string())
        .with("log_mail_to", "ops@example.com")
        .with("log_mail_from", "app@example.com")
        .with("log_mail_host", "10.0.0.1")
        .with("db.connect.path", db_path.display().to_string())
        .with("db.sql.table", "logger")
        .with("db.sql.val.column", "val");

    let factory = LoggerFactory::new();
    for kind in [
        BackendKind::SystemLog,
        BackendKind::Mail,
        BackendKind::CustomFile,
        BackendKind::Console,
        BackendKind::Database,
        BackendKind::DebugChannel,
    ] {
        let props = base.clone().with("log_type", kind.id().to_string());
        assert_eq!(backend_from(&props).unwrap(), kind);

        let logger = factory.for_properties("Foo", props).unwrap();
        assert_eq!(logger.sink().kind(), kind);
    }
}

#[test]
fn test_backend_kind_identifiers() {
    for id in -1..=7 {
        match BackendKind::from_id(id) {
            Some(kind) => assert_eq!(kind.id(), id),
            None => assert!(matches!(id, -1 | 2 | 7)),
        }
    }
    assert_eq!(BackendKind::Database.to_string(), "database");
}
