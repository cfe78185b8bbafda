// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order, later wins: compiled defaults, `/etc/flowforge/flowforge.toml`,
//! `~/.config/flowforge/flowforge.toml`, `./flowforge.toml`, then `FLOWFORGE_*`
//! environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::FlowforgeConfig;

/// Config file name searched in every layer.
pub const CONFIG_FILE: &str = "flowforge.toml";

const SYSTEM_CONFIG: &str = "/etc/flowforge/flowforge.toml";

/// Sections whose env vars are folded into dotted keys.
const ENV_SECTIONS: &[&str] = &["app", "anthropic", "generation", "storage", "gateway"];

/// Candidate config files, lowest precedence first.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("flowforge").join(CONFIG_FILE));
    }
    paths.push(PathBuf::from(CONFIG_FILE));
    paths
}

/// Build the full layered Figment without extracting it.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(FlowforgeConfig::default()));
    for path in config_paths() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<FlowforgeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<FlowforgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FlowforgeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file plus env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FlowforgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FlowforgeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// `FLOWFORGE_ANTHROPIC_API_KEY` maps to `anthropic.api_key`, not
/// `anthropic.api.key`, so only the first underscore after a known section
/// name becomes a dot.
fn env_provider() -> Env {
    Env::prefixed("FLOWFORGE_").map(|key| {
        let key_str = key.as_str();
        let mapped = ENV_SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key_str.to_string());
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_vars_map_to_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("FLOWFORGE_ANTHROPIC_API_KEY", "sk-test");
            jail.set_env("FLOWFORGE_GATEWAY_PORT", "8088");
            jail.set_env("FLOWFORGE_GENERATION_SCHEMA_MAX_TOKENS", "4000");
            let config: FlowforgeConfig = build_figment().extract()?;
            assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-test"));
            assert_eq!(config.gateway.port, 8088);
            assert_eq!(config.generation.schema_max_tokens, 4000);
            Ok(())
        });
    }

    #[test]
    fn local_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "[storage]\nwal_mode = false\n")?;
            let config = load_config()?;
            assert!(!config.storage.wal_mode);
            assert_eq!(config.gateway.port, 3000);
            Ok(())
        });
    }

    #[test]
    fn env_beats_local_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "[app]\nlog_level = \"warn\"\n")?;
            jail.set_env("FLOWFORGE_APP_LOG_LEVEL", "debug");
            let config = load_config()?;
            assert_eq!(config.app.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn config_paths_end_with_local_file() {
        let paths = config_paths();
        assert_eq!(paths.first().unwrap(), &PathBuf::from(SYSTEM_CONFIG));
        assert_eq!(paths.last().unwrap(), &PathBuf::from(CONFIG_FILE));
    }
}
