// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Column type palette and constraint vocabulary offered by the editor.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// Category for grouping types in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    Integer,
    Float,
    Decimal,
    Text,
    Binary,
    DateTime,
    Boolean,
    Json,
    Identifier,
}

/// A selectable column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SqlTypeInfo {
    /// Type token as written into the schema.
    pub name: &'static str,
    pub description: &'static str,
    pub category: TypeCategory,
}

/// The editor's column type palette.
pub const SQL_TYPES: &[SqlTypeInfo] = &[
    SqlTypeInfo {
        name: "INTEGER",
        description: "Whole numbers",
        category: TypeCategory::Integer,
    },
    SqlTypeInfo {
        name: "TEXT",
        description: "Variable-length text",
        category: TypeCategory::Text,
    },
    SqlTypeInfo {
        name: "VARCHAR(255)",
        description: "Text up to 255 characters",
        category: TypeCategory::Text,
    },
    SqlTypeInfo {
        name: "BOOLEAN",
        description: "True or false",
        category: TypeCategory::Boolean,
    },
    SqlTypeInfo {
        name: "TIMESTAMP",
        description: "Date and time",
        category: TypeCategory::DateTime,
    },
    SqlTypeInfo {
        name: "DATE",
        description: "Date only",
        category: TypeCategory::DateTime,
    },
    SqlTypeInfo {
        name: "DECIMAL(10,2)",
        description: "Exact decimal, e.g. money",
        category: TypeCategory::Decimal,
    },
    SqlTypeInfo {
        name: "FLOAT",
        description: "Approximate decimal",
        category: TypeCategory::Float,
    },
    SqlTypeInfo {
        name: "UUID",
        description: "Universally unique identifier",
        category: TypeCategory::Identifier,
    },
    SqlTypeInfo {
        name: "JSON",
        description: "Structured JSON document",
        category: TypeCategory::Json,
    },
    SqlTypeInfo {
        name: "BLOB",
        description: "Binary data",
        category: TypeCategory::Binary,
    },
];

/// Looks up a palette entry by exact (case-insensitive) name.
pub fn sql_type(name: &str) -> Option<&'static SqlTypeInfo> {
    SQL_TYPES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

/// Column constraints the editor can toggle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Constraint {
    #[strum(to_string = "PRIMARY KEY", serialize = "pk")]
    PrimaryKey,
    #[strum(to_string = "NOT NULL", serialize = "notnull")]
    NotNull,
    #[strum(to_string = "UNIQUE")]
    Unique,
    #[strum(to_string = "DEFAULT")]
    Default,
    #[strum(to_string = "REFERENCES", serialize = "fk")]
    References,
}

impl Constraint {
    /// Canonical SQL token appended to a column's constraint list.
    pub fn token(self) -> &'static str {
        match self {
            Constraint::PrimaryKey => "PRIMARY KEY",
            Constraint::NotNull => "NOT NULL",
            Constraint::Unique => "UNIQUE",
            Constraint::Default => "DEFAULT",
            Constraint::References => "REFERENCES",
        }
    }

    /// Short label for toggle buttons.
    pub fn label(self) -> &'static str {
        match self {
            Constraint::PrimaryKey => "Primary Key",
            Constraint::NotNull => "Not Null",
            Constraint::Unique => "Unique",
            Constraint::Default => "Default",
            Constraint::References => "Foreign Key",
        }
    }

    /// True if `constraint` mentions this token anywhere, ignoring case.
    pub fn matches(self, constraint: &str) -> bool {
        constraint
            .to_ascii_uppercase()
            .contains(self.token())
    }
}
