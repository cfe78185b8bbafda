// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::FlowforgeConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first.
pub fn validate_config(config: &FlowforgeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let level = config.app.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "app.log_level `{}` must be one of {}",
            config.app.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.anthropic.default_model.trim().is_empty() {
        fail("anthropic.default_model must not be empty".to_string());
    }

    if config.anthropic.request_timeout_secs == 0 {
        fail("anthropic.request_timeout_secs must be greater than 0".to_string());
    }

    for (key, value) in [
        ("concept_max_tokens", config.generation.concept_max_tokens),
        ("workflow_max_tokens", config.generation.workflow_max_tokens),
        ("schema_max_tokens", config.generation.schema_max_tokens),
    ] {
        if value == 0 {
            fail(format!("generation.{key} must be greater than 0"));
        }
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        fail("gateway.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "gateway.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &FlowforgeConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        let config = FlowforgeConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = FlowforgeConfig::default();
        config.storage.database_path = "  ".to_string();
        assert!(messages(&config).iter().any(|m| m.contains("database_path")));
    }

    #[test]
    fn zero_token_budget_fails_validation() {
        let mut config = FlowforgeConfig::default();
        config.generation.workflow_max_tokens = 0;
        assert!(
            messages(&config)
                .iter()
                .any(|m| m.contains("generation.workflow_max_tokens"))
        );
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = FlowforgeConfig::default();
        config.app.log_level = "verbose".to_string();
        assert!(messages(&config).iter().any(|m| m.contains("app.log_level")));
    }

    #[test]
    fn bad_host_fails_validation() {
        let mut config = FlowforgeConfig::default();
        config.gateway.host = "local host!".to_string();
        assert!(messages(&config).iter().any(|m| m.contains("gateway.host")));
    }

    #[test]
    fn all_failures_are_collected() {
        let mut config = FlowforgeConfig::default();
        config.storage.database_path = String::new();
        config.anthropic.request_timeout_secs = 0;
        config.generation.concept_max_tokens = 0;
        assert_eq!(validate_config(&config).unwrap_err().len(), 3);
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = FlowforgeConfig::default();
        config.gateway.host = "0.0.0.0".to_string();
        config.app.log_level = "DEBUG".to_string();
        config.storage.database_path = "/tmp/flowforge-test.db".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
