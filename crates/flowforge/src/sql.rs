// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `flowforge sql` command implementation.

use flowforge_config::FlowforgeConfig;
use flowforge_core::{DatabaseType, FlowforgeError, ProjectRecord, ProjectStore};
use flowforge_schema::generate_sql;

use crate::runtime;

pub async fn run_sql(
    config: FlowforgeConfig,
    id: &str,
    dialect: Option<DatabaseType>,
) -> Result<(), FlowforgeError> {
    let store = runtime::open_store(&config).await?;
    let project = store
        .get(id)
        .await?
        .ok_or_else(|| FlowforgeError::not_found("project", id))?;
    println!("{}", project_sql(&project, dialect)?);
    Ok(())
}

/// DDL for a saved project. An explicit dialect wins over the saved one.
pub fn project_sql(
    project: &ProjectRecord,
    dialect: Option<DatabaseType>,
) -> Result<String, FlowforgeError> {
    let schema = project.schema_data.as_ref().ok_or_else(|| {
        FlowforgeError::Validation(format!("project {} has no schema yet", project.id))
    })?;
    let dialect = dialect.or(project.database_type).ok_or_else(|| {
        FlowforgeError::Validation(format!(
            "project {} has no database type; pass --dialect",
            project.id
        ))
    })?;
    Ok(generate_sql(&schema.tables, dialect))
}
