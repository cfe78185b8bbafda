// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `CREATE TABLE` generation.
//!
//! Output is deterministic and identifiers are emitted verbatim. Names are
//! assumed to already be valid SQL identifiers.

use flowforge_core::{Column, DatabaseType, Table};

use crate::dialect::rewrite_type;

/// Renders every table as a `CREATE TABLE` statement, separated by a blank
/// line.
pub fn generate_sql(tables: &[Table], dialect: DatabaseType) -> String {
    tables
        .iter()
        .map(|table| render_table(table, dialect))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `CREATE TABLE name (\n  col,\n  col\n);`
pub fn render_table(table: &Table, dialect: DatabaseType) -> String {
    let columns = table
        .columns
        .iter()
        .map(|column| format!("  {}", render_column(column, dialect)))
        .collect::<Vec<_>>()
        .join(",\n");

    format!("CREATE TABLE {} (\n{}\n);", table.name, columns)
}

/// `name type[ constraint constraint ...]` with the type rewritten for the
/// dialect.
pub fn render_column(column: &Column, dialect: DatabaseType) -> String {
    let mut out = format!(
        "{} {}",
        column.name,
        rewrite_type(dialect, &column.data_type)
    );
    let constraints = column.constraints.join(" ");
    if !constraints.is_empty() {
        out.push(' ');
        out.push_str(&constraints);
    }
    out
}
