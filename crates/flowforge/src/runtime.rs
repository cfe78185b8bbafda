// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter construction shared by the subcommands.

use std::sync::Arc;

use flowforge_anthropic::AnthropicProvider;
use flowforge_config::FlowforgeConfig;
use flowforge_core::FlowforgeError;
use flowforge_generation::{GenerationSettings, Generator};
use flowforge_storage::SqliteProjectStore;
use tracing::debug;

/// Opens the project database named in `[storage]`, creating and migrating
/// it if needed.
pub async fn open_store(config: &FlowforgeConfig) -> Result<Arc<SqliteProjectStore>, FlowforgeError> {
    let store = SqliteProjectStore::open(config.storage.clone()).await?;
    debug!(path = %config.storage.database_path, "project store opened");
    Ok(Arc::new(store))
}

/// Builds a generator backed by the Anthropic provider.
pub fn build_generator(config: &FlowforgeConfig) -> Result<Generator, FlowforgeError> {
    let provider = AnthropicProvider::new(&config.anthropic).inspect_err(|_| {
        eprintln!(
            "error: Anthropic API key required. Set anthropic.api_key in config or the ANTHROPIC_API_KEY env var."
        );
    })?;
    Ok(Generator::new(
        Arc::new(provider),
        GenerationSettings::from(&config.generation),
    ))
}
