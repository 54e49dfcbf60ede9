//! Integration tests for configuration loading and validation
//!
//! Tests that touch `CLOUD_DUMP_*` variables hold `ENV_MUTEX` so they don't
//! observe each other's overrides.

use cloud_dump::config::load_config;
use cloud_dump::domain::DumpError;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

const OVERRIDDEN: [&str; 7] = [
    "CLOUD_DUMP_APPLICATION_LOG_LEVEL",
    "CLOUD_DUMP_API_TOKEN",
    "CLOUD_DUMP_API_TIMEOUT_SECONDS",
    "CLOUD_DUMP_DUMP_DATABASE_ID",
    "CLOUD_DUMP_DUMP_TABLES",
    "CLOUD_DUMP_DUMP_OUTPUT_PATH",
    "CLOUD_DUMP_DUMP_POLL_INTERVAL_MS",
];

fn cleanup_env_vars() {
    for name in OVERRIDDEN {
        std::env::remove_var(name);
    }
    std::env::remove_var("CD_IT_TOKEN");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const COMPLETE: &str = r#"
[application]
log_level = "debug"

[api]
base_url = "https://api.example.com/v1"
account_id = "acct_it"
api_token = "${CD_IT_TOKEN}"
timeout_seconds = 30

[dump]
database_id = "db_it"
tables = ["users", "orders"]
no_schema = true
output_path = "it.sql"

[logging]
local_enabled = false
local_rotation = "hourly"
"#;

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("CD_IT_TOKEN", "tok_from_env");

    let file = write_config(COMPLETE);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(
        config.api.api_token.as_ref().unwrap().expose_secret(),
        "tok_from_env"
    );
    assert_eq!(config.logging.local_rotation, "hourly");

    let request = config.job_request().unwrap();
    assert_eq!(request.account_id.as_str(), "acct_it");
    assert_eq!(request.database_id.as_str(), "db_it");
    assert_eq!(request.tables, vec!["users".to_string(), "orders".to_string()]);
    assert!(request.no_schema);
    assert!(!request.no_data);

    cleanup_env_vars();
}

#[test]
fn test_env_overrides_win_over_file() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("CD_IT_TOKEN", "tok_from_file");
    std::env::set_var("CLOUD_DUMP_API_TOKEN", "tok_override");
    std::env::set_var("CLOUD_DUMP_DUMP_DATABASE_ID", "db_override");
    std::env::set_var("CLOUD_DUMP_DUMP_TABLES", "a, b");
    std::env::set_var("CLOUD_DUMP_DUMP_POLL_INTERVAL_MS", "250");
    std::env::set_var("CLOUD_DUMP_API_TIMEOUT_SECONDS", "not-a-number");

    let file = write_config(COMPLETE);
    let config = load_config(file.path()).unwrap();

    assert_eq!(
        config.api.api_token.as_ref().unwrap().expose_secret(),
        "tok_override"
    );
    assert_eq!(config.dump.database_id.as_deref(), Some("db_override"));
    assert_eq!(config.dump.tables, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(config.dump.poll_interval_ms, 250);
    // unparseable overrides are ignored
    assert_eq!(config.api.timeout_seconds, 30);

    cleanup_env_vars();
}

#[test]
fn test_invalid_override_fails_validation() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("CD_IT_TOKEN", "tok");
    std::env::set_var("CLOUD_DUMP_APPLICATION_LOG_LEVEL", "verbose");

    let file = write_config(COMPLETE);
    let err = load_config(file.path()).unwrap_err();

    assert!(matches!(err, DumpError::Configuration(_)));
    assert!(err.to_string().contains("log_level"));

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(COMPLETE);
    let err = load_config(file.path()).unwrap_err();

    assert!(err.to_string().contains("CD_IT_TOKEN"));
}

#[test]
fn test_conflicting_toggles_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[api]
base_url = "https://api.example.com/v1"
account_id = "acct_it"

[dump]
database_id = "db_it"
no_schema = true
no_data = true
"#,
    );
    let err = load_config(file.path()).unwrap_err();

    assert!(err.to_string().contains("no_schema"));
}

#[test]
fn test_minimal_config_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[api]
base_url = "https://api.example.com/v1"
account_id = "acct_it"
"#,
    );
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.api.timeout_seconds, 60);
    assert!(config.api.tls_verify);
    assert!(config.api.api_token.is_none());
    assert_eq!(config.dump.poll_interval_ms, 0);
    assert!(config.dump.tables.is_empty());
    assert!(!config.logging.local_enabled);
    assert!(config.job_request().is_err());
}
