// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the FlowForge configuration system.

use flowforge_config::diagnostic::ConfigError;
use flowforge_config::model::FlowforgeConfig;
use flowforge_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[app]
name = "forge"
log_level = "debug"

[anthropic]
api_key = "sk-ant-123"
default_model = "claude-sonnet-4-20250514"
max_retries = 2
request_timeout_secs = 30

[generation]
concept_max_tokens = 512
workflow_max_tokens = 1500
schema_max_tokens = 3000
model = "claude-haiku-4-5"

[storage]
database_path = "/tmp/flowforge.db"
wal_mode = false

[gateway]
host = "0.0.0.0"
port = 8080
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "forge");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-ant-123"));
    assert_eq!(config.anthropic.max_retries, 2);
    assert_eq!(config.anthropic.request_timeout_secs, 30);
    assert_eq!(config.generation.concept_max_tokens, 512);
    assert_eq!(config.generation.workflow_max_tokens, 1500);
    assert_eq!(config.generation.schema_max_tokens, 3000);
    assert_eq!(config.generation.model.as_deref(), Some("claude-haiku-4-5"));
    assert_eq!(config.storage.database_path, "/tmp/flowforge.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.gateway.host, "0.0.0.0");
    assert_eq!(config.gateway.port, 8080);
}

#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML is valid");
    assert_eq!(config.app.name, "flowforge");
    assert_eq!(config.app.log_level, "info");
    assert_eq!(config.anthropic.default_model, "claude-sonnet-4-20250514");
    assert_eq!(config.anthropic.api_version, "2023-06-01");
    assert_eq!(config.anthropic.max_retries, 1);
    assert_eq!(config.anthropic.request_timeout_secs, 120);
    assert_eq!(config.generation.concept_max_tokens, 1024);
    assert_eq!(config.generation.workflow_max_tokens, 2048);
    assert_eq!(config.generation.schema_max_tokens, 2048);
    assert!(config.storage.wal_mode);
    assert!(config.storage.database_path.ends_with("flowforge.db"));
    assert_eq!(config.gateway.port, 3000);
}

#[test]
fn unknown_field_in_section_is_rejected() {
    let toml = r#"
[gateway]
prot = 8080
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = err.to_string();
    assert!(
        err_str.contains("unknown field") || err_str.contains("prot"),
        "error should mention the bad key, got: {err_str}"
    );
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let toml = r#"
[telemetry]
enabled = true
"#;
    assert!(load_config_from_str(toml).is_err());
}

#[test]
fn diagnostic_suggests_correction_with_span() {
    let toml = r#"
[generation]
schema_max_tokns = 10
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let error = errors
        .iter()
        .find(|e| matches!(e, ConfigError::UnknownKey { .. }))
        .expect("unknown key diagnostic");

    match error {
        ConfigError::UnknownKey {
            key,
            suggestion,
            valid_keys,
            span,
            ..
        } => {
            assert_eq!(key, "schema_max_tokns");
            assert_eq!(suggestion.as_deref(), Some("schema_max_tokens"));
            assert!(valid_keys.contains("concept_max_tokens"));
            let span = span.expect("inline source should resolve a span");
            let start = span.offset();
            assert_eq!(&toml[start..start + key.len()], "schema_max_tokns");
        }
        other => panic!("unexpected diagnostic {other:?}"),
    }
}

#[test]
fn diagnostic_invalid_type_names_key() {
    let toml = r#"
[gateway]
port = "eighty"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("port"))),
        "got: {errors:?}"
    );
}

#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "hots".to_string(),
        suggestion: Some("host".to_string()),
        valid_keys: "host, port".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().expect("help text").to_string();
    assert!(help.contains("did you mean `host`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("hots"));
}

#[test]
fn validation_errors_surface_through_loader() {
    let toml = r#"
[anthropic]
request_timeout_secs = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero timeout should fail");
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("request_timeout_secs"))
    }));
}

#[test]
fn load_from_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[gateway]\nport = 4100\n").unwrap();

    let config = load_and_validate_path(&path).expect("file config should load");
    assert_eq!(config.gateway.port, 4100);

    std::fs::write(&path, "[gateway]\nhots = \"x\"\n").unwrap();
    let errors = load_and_validate_path(&path).expect_err("typo should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::UnknownKey { suggestion, .. } if suggestion.as_deref() == Some("host")))
    );
}

#[test]
fn defaults_serialize_to_valid_toml() {
    let rendered = toml::to_string(&FlowforgeConfig::default()).expect("serialize defaults");
    let reparsed = load_and_validate_str(&rendered).expect("defaults should validate");
    assert_eq!(reparsed.gateway.port, 3000);
}
