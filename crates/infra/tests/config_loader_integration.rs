//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use careerdeck_domain::CareerDeckError;
use careerdeck_infra::config;
use tempfile::TempDir;

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "api": {
            "base_url": "https://careers.example/api",
            "timeout_seconds": 5,
            "bearer_token": "json-token"
        },
        "calendar": {
            "days_past": 10,
            "days_future": 45,
            "include_past_interviews": false
        },
        "storage": {
            "path": "/tmp/careerdeck-it.json"
        }
    }"#;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("careerdeck.json");
    std::fs::write(&path, json_content).expect("Failed to write config");

    let config = config::load_from_file(Some(path)).expect("Failed to load config from JSON file");

    assert_eq!(config.api.base_url, "https://careers.example/api");
    assert_eq!(config.api.timeout_seconds, 5);
    assert_eq!(config.api.bearer_token.as_deref(), Some("json-token"));
    assert_eq!(config.calendar.days_past, 10);
    assert_eq!(config.calendar.days_future, 45);
    assert!(!config.calendar.include_past_interviews);
    assert_eq!(config.storage.path, "/tmp/careerdeck-it.json");
    assert_eq!(config.storage.notes_key, "careerdeck.calendar.notes");
}

#[test]
fn test_load_config_from_toml_file() {
    let toml_content = r#"
[api]
base_url = "http://127.0.0.1:9000/api"
max_attempts = 1

[calendar]
provider = "google"
dedupe_external = true

[logging]
filter = "debug"
json = true
"#;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, toml_content).expect("Failed to write config");

    let config = config::load_from_file(Some(path)).expect("Failed to load config from TOML file");

    assert_eq!(config.api.base_url, "http://127.0.0.1:9000/api");
    assert_eq!(config.api.max_attempts, 1);
    assert!(config.calendar.dedupe_external);
    assert_eq!(config.logging.filter, "debug");
    assert!(config.logging.json);
}

#[test]
fn test_invalid_toml_is_a_config_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[calendar\ndays_past = ").expect("Failed to write config");

    let err = config::load_from_file(Some(path)).unwrap_err();
    assert!(matches!(err, CareerDeckError::Config(msg) if msg.contains("TOML")));
}

#[test]
fn test_wrong_value_type_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("careerdeck.json");
    std::fs::write(&path, r#"{ "calendar": { "days_past": "a week" } }"#)
        .expect("Failed to write config");

    assert!(matches!(config::load_from_file(Some(path)), Err(CareerDeckError::Config(_))));
}
