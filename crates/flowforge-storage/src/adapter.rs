// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`ProjectStore`] trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use flowforge_config::model::StorageConfig;
use flowforge_core::{
    AdapterType, FlowforgeError, HealthStatus, NewProject, PluginAdapter, ProjectPatch,
    ProjectRecord, ProjectStore,
};

use crate::database::Database;
use crate::models::{ProjectRow, RowPatch};
use crate::queries;

/// SQLite-backed project store.
///
/// The database is opened lazily by [`SqliteProjectStore::initialize`];
/// every other call fails until then.
pub struct SqliteProjectStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteProjectStore {
    /// The connection is not opened until [`initialize`](Self::initialize).
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Opens the configured database and returns a ready store.
    pub async fn open(config: StorageConfig) -> Result<Self, FlowforgeError> {
        let store = Self::new(config);
        store.initialize().await?;
        Ok(store)
    }

    /// Wraps an already-open database.
    pub fn from_database(config: StorageConfig, db: Database) -> Self {
        Self {
            config,
            db: OnceCell::new_with(Some(db)),
        }
    }

    pub async fn initialize(&self) -> Result<(), FlowforgeError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| FlowforgeError::Storage {
            source: "project store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite project store initialized");
        Ok(())
    }

    fn db(&self) -> Result<&Database, FlowforgeError> {
        self.db.get().ok_or_else(|| FlowforgeError::Storage {
            source: "project store not initialized -- call initialize() first".into(),
        })
    }

    async fn fetch(&self, id: &str) -> Result<ProjectRecord, FlowforgeError> {
        queries::projects::get_project(self.db()?, id)
            .await?
            .ok_or_else(|| FlowforgeError::not_found("project", id))?
            .into_record()
    }
}

#[async_trait]
impl PluginAdapter for SqliteProjectStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, FlowforgeError> {
        let db = match self.db.get() {
            Some(db) => db,
            None => return Ok(HealthStatus::Unhealthy("not initialized".into())),
        };
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FlowforgeError> {
        if let Some(db) = self.db.get() {
            db.connection()
                .call(|conn| -> Result<(), rusqlite::Error> {
                    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                    Ok(())
                })
                .await
                .map_err(crate::database::map_tr_err)?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for SqliteProjectStore {
    async fn list(&self) -> Result<Vec<ProjectRecord>, FlowforgeError> {
        queries::projects::list_projects(self.db()?)
            .await?
            .into_iter()
            .map(ProjectRow::into_record)
            .collect()
    }

    async fn get(&self, id: &str) -> Result<Option<ProjectRecord>, FlowforgeError> {
        queries::projects::get_project(self.db()?, id)
            .await?
            .map(ProjectRow::into_record)
            .transpose()
    }

    async fn create(&self, project: NewProject) -> Result<ProjectRecord, FlowforgeError> {
        let row = ProjectRow::from_new(&project)?;
        if !queries::projects::insert_project(self.db()?, row).await? {
            return Err(FlowforgeError::Conflict(format!(
                "project with id `{}` already exists",
                project.id
            )));
        }
        info!(id = %project.id, name = %project.name, "project created");
        self.fetch(&project.id).await
    }

    async fn update(&self, id: &str, patch: ProjectPatch) -> Result<ProjectRecord, FlowforgeError> {
        let patch = RowPatch::from_patch(&patch)?;
        if !queries::projects::update_project(self.db()?, id, patch).await? {
            return Err(FlowforgeError::not_found("project", id));
        }
        debug!(id, "project updated");
        self.fetch(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), FlowforgeError> {
        if !queries::projects::delete_project(self.db()?, id).await? {
            return Err(FlowforgeError::not_found("project", id));
        }
        info!(id, "project deleted");
        Ok(())
    }
}
