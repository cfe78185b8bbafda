// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-dialect primitive type vocabularies and type token rewriting.

use std::borrow::Cow;

use flowforge_core::DatabaseType;
use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Abstract column kinds the schema prompt maps onto dialect tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Id,
    Text,
    Datetime,
    Boolean,
    Json,
}

/// The dialect-specific type token for a primitive.
pub fn type_token(dialect: DatabaseType, primitive: Primitive) -> &'static str {
    use DatabaseType::*;
    use Primitive::*;

    match (dialect, primitive) {
        (Sqlite, Id) => "INTEGER",
        (Sqlite, Text) => "TEXT",
        (Sqlite, Datetime) => "TEXT",
        (Sqlite, Boolean) => "INTEGER",
        (Sqlite, Json) => "TEXT",
        (Postgresql, Id) => "SERIAL",
        (Postgresql, Text) => "VARCHAR(255)",
        (Postgresql, Datetime) => "TIMESTAMP",
        (Postgresql, Boolean) => "BOOLEAN",
        (Postgresql, Json) => "JSONB",
        (Mysql, Id) => "INT AUTO_INCREMENT",
        (Mysql, Text) => "VARCHAR(255)",
        (Mysql, Datetime) => "DATETIME",
        (Mysql, Boolean) => "TINYINT(1)",
        (Mysql, Json) => "JSON",
    }
}

/// Every primitive with its token, in declaration order.
pub fn vocabulary(dialect: DatabaseType) -> Vec<(Primitive, &'static str)> {
    Primitive::iter()
        .map(|p| (p, type_token(dialect, p)))
        .collect()
}

/// Rewrites a column type token for the target dialect.
///
/// Only exact tokens are rewritten: `SERIAL` on mysql and sqlite,
/// `VARCHAR(255)` on sqlite. Anything else, including other spellings and
/// the postgresql dialect, passes through untouched.
pub fn rewrite_type(dialect: DatabaseType, token: &str) -> Cow<'_, str> {
    let replacement = match (dialect, token) {
        (DatabaseType::Mysql, "SERIAL") => "INT AUTO_INCREMENT",
        (DatabaseType::Sqlite, "SERIAL") => "INTEGER",
        (DatabaseType::Sqlite, "VARCHAR(255)") => "TEXT",
        _ => return Cow::Borrowed(token),
    };
    Cow::Borrowed(replacement)
}

/// Base type names (parameters stripped) each dialect accepts beyond its
/// vocabulary and the editor palette.
fn native_base_types(dialect: DatabaseType) -> &'static [&'static str] {
    match dialect {
        DatabaseType::Sqlite => &["INT", "REAL", "NUMERIC", "DATETIME", "CHAR"],
        DatabaseType::Postgresql => &[
            "INT",
            "BIGINT",
            "SMALLINT",
            "BIGSERIAL",
            "SERIAL",
            "TEXT",
            "JSONB",
            "TIMESTAMPTZ",
            "NUMERIC",
            "REAL",
            "CHAR",
            "BYTEA",
            "DOUBLE PRECISION",
        ],
        DatabaseType::Mysql => &[
            "INT",
            "INT AUTO_INCREMENT",
            "BIGINT",
            "TINYINT",
            "SMALLINT",
            "DATETIME",
            "CHAR",
            "MEDIUMTEXT",
            "LONGTEXT",
            "DOUBLE",
            "ENUM",
        ],
    }
}

/// Uppercased type name with any `(...)` parameter list removed.
pub fn base_type(token: &str) -> String {
    let upper = token.trim().to_ascii_uppercase();
    match upper.find('(') {
        Some(open) => {
            let close = upper.rfind(')').map(|c| c + 1).unwrap_or(upper.len());
            let mut base = upper[..open].trim_end().to_string();
            let tail = upper[close..].trim();
            if !tail.is_empty() {
                base.push(' ');
                base.push_str(tail);
            }
            base
        }
        None => upper,
    }
}

/// Whether the type token is something the dialect (after rewriting) is
/// expected to understand. Used for non-fatal warnings only.
pub fn is_recognized_type(dialect: DatabaseType, token: &str) -> bool {
    let rewritten = rewrite_type(dialect, token);
    let base = base_type(&rewritten);
    if base.is_empty() {
        return false;
    }

    vocabulary(dialect)
        .iter()
        .any(|(_, t)| base_type(t) == base)
        || crate::catalog::SQL_TYPES
            .iter()
            .any(|t| base_type(t.name) == base)
        || native_base_types(dialect).iter().any(|t| *t == base)
}
