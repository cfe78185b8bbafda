// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema model editing and SQL DDL generation.
//!
//! - [`editor`]: positional add/remove/set/toggle operations on tables and columns
//! - [`sql`]: deterministic `CREATE TABLE` output per dialect
//! - [`dialect`]: primitive type vocabularies and type token rewriting
//! - [`catalog`]: the editor's type palette and constraint vocabulary

pub mod catalog;
pub mod dialect;
pub mod editor;
pub mod sql;

pub use catalog::{Constraint, SQL_TYPES, SqlTypeInfo};
pub use dialect::{Primitive, rewrite_type, type_token, vocabulary};
pub use editor::{ColumnField, SchemaEditor, Toggle};
pub use sql::generate_sql;
