// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;
use std::time::Duration;

use flowforge_core::FlowforgeError;
use tracing::{debug, info};

/// Handle to the project database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` in WAL mode.
    pub async fn open(path: &str) -> Result<Self, FlowforgeError> {
        Self::open_with(path, true).await
    }

    /// Opens the database, creating parent directories, applying PRAGMAs, and
    /// running pending migrations.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, FlowforgeError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(FlowforgeError::storage)?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(FlowforgeError::storage)?;
        let db = Self { conn };
        db.configure(wal_mode).await?;
        db.migrate().await?;

        info!(path, wal_mode, "project database opened");
        Ok(db)
    }

    /// Opens a private in-memory database with migrations applied.
    pub async fn open_in_memory() -> Result<Self, FlowforgeError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(FlowforgeError::storage)?;
        let db = Self { conn };
        db.configure(false).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// The shared single-writer connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoints the WAL and closes the connection.
    pub async fn close(self) -> Result<(), FlowforgeError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(FlowforgeError::storage)?;
        debug!("project database closed");
        Ok(())
    }

    async fn configure(&self, wal_mode: bool) -> Result<(), FlowforgeError> {
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                if wal_mode {
                    let mode: String = conn.pragma_update_and_check(
                        None,
                        "journal_mode",
                        "WAL",
                        |row| row.get(0),
                    )?;
                    debug!(journal_mode = %mode, "journal mode set");
                }
                conn.pragma_update(None, "foreign_keys", "ON")?;
                conn.pragma_update(None, "synchronous", "NORMAL")?;
                conn.busy_timeout(Duration::from_secs(5))?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn migrate(&self) -> Result<(), FlowforgeError> {
        let applied = self
            .conn
            .call(|conn| crate::migrations::run_migrations(conn))
            .await
            .map_err(|e| FlowforgeError::Storage {
                source: format!("migration failed: {e}").into(),
            })?;
        if applied > 0 {
            info!(applied, "database migrations applied");
        }
        Ok(())
    }
}

/// Converts a tokio-rusqlite error into [`FlowforgeError::Storage`].
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> FlowforgeError {
    FlowforgeError::Storage {
        source: Box::new(e),
    }
}
