// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite project store for the FlowForge wizard.
//!
//! Provides a WAL-mode SQLite database with embedded migrations, a
//! single-writer connection via `tokio-rusqlite`, and the
//! [`ProjectStore`](flowforge_core::ProjectStore) implementation used by the
//! wizard and the HTTP gateway.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use adapter::SqliteProjectStore;
pub use database::Database;
pub use models::ProjectRow;
