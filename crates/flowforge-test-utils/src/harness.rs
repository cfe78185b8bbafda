// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness pairing a [`MockProvider`] with a throwaway project store.
//!
//! The store lives in a temp directory that is removed when the harness is
//! dropped.

use std::sync::Arc;

use flowforge_config::FlowforgeConfig;
use flowforge_config::model::StorageConfig;
use flowforge_core::FlowforgeError;
use flowforge_storage::SqliteProjectStore;

use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
#[derive(Default)]
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    wal_mode: bool,
}

impl TestHarnessBuilder {
    /// Set mock provider responses.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    pub fn with_wal(mut self, enabled: bool) -> Self {
        self.wal_mode = enabled;
        self
    }

    /// Creates the temp directory, opens the store, and loads the script.
    pub async fn build(self) -> Result<TestHarness, FlowforgeError> {
        let temp_dir = tempfile::TempDir::new().map_err(FlowforgeError::storage)?;
        let db_path = temp_dir.path().join("test.db");

        let storage = StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: self.wal_mode,
        };
        let store = Arc::new(SqliteProjectStore::open(storage.clone()).await?);

        let config = FlowforgeConfig {
            storage,
            ..FlowforgeConfig::default()
        };

        Ok(TestHarness {
            provider: Arc::new(MockProvider::with_responses(self.responses)),
            store,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a mock provider and temp storage.
pub struct TestHarness {
    pub provider: Arc<MockProvider>,
    /// SQLite project store (temp DB, cleaned up on drop).
    pub store: Arc<SqliteProjectStore>,
    /// Defaults, with `storage` pointing at the temp database.
    pub config: FlowforgeConfig,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder {
            wal_mode: true,
            ..TestHarnessBuilder::default()
        }
    }

    /// A harness with no scripted responses.
    pub async fn new() -> Result<Self, FlowforgeError> {
        Self::builder().build().await
    }

    /// Add a response to the mock provider's queue.
    pub async fn add_provider_response(&self, text: impl Into<String>) {
        self.provider.add_response(text).await;
    }
}

#[cfg(test)]
mod tests {
    use flowforge_core::{NewProject, ProjectStore};

    use super::*;

    #[tokio::test]
    async fn harness_store_is_usable() {
        let harness = TestHarness::new().await.unwrap();
        harness
            .store
            .create(NewProject::new("p1", "Habits", "idea"))
            .await
            .unwrap();
        assert_eq!(harness.store.list().await.unwrap().len(), 1);
        assert!(std::path::Path::new(&harness.config.storage.database_path).exists());
    }

    #[tokio::test]
    async fn builder_loads_responses() {
        let harness = TestHarness::builder()
            .with_mock_responses(crate::fixtures::habit_tracker_responses())
            .build()
            .await
            .unwrap();
        assert_eq!(harness.provider.remaining().await, 3);
    }
}
