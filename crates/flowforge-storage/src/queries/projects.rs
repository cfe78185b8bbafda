// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project CRUD operations.

use flowforge_core::FlowforgeError;
use rusqlite::{ErrorCode, params};

use crate::database::Database;
use crate::models::{ProjectRow, RowPatch};

/// Most rows returned by [`list_projects`].
pub const LIST_LIMIT: i64 = 20;

const COLUMNS: &str = "id, name, project_type, status, original_idea, optimized_data, \
     workflow_data, schema_data, dev_environment, database_type, created_at, updated_at";

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProjectRow> {
    Ok(ProjectRow {
        id: row.get(0)?,
        name: row.get(1)?,
        project_type: row.get(2)?,
        status: row.get(3)?,
        original_idea: row.get(4)?,
        optimized_data: row.get(5)?,
        workflow_data: row.get(6)?,
        schema_data: row.get(7)?,
        dev_environment: row.get(8)?,
        database_type: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

/// Lists the most recently updated projects, newest first.
pub async fn list_projects(db: &Database) -> Result<Vec<ProjectRow>, FlowforgeError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM projects
                 ORDER BY updated_at DESC, rowid DESC LIMIT ?1"
            ))?;
            let rows = stmt.query_map(params![LIST_LIMIT], map_row)?;
            let mut projects = Vec::new();
            for row in rows {
                projects.push(row?);
            }
            Ok(projects)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a project by ID.
pub async fn get_project(db: &Database, id: &str) -> Result<Option<ProjectRow>, FlowforgeError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {COLUMNS} FROM projects WHERE id = ?1"))?;
            match stmt.query_row(params![id], map_row) {
                Ok(row) => Ok(Some(row)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Inserts a project. Returns `false` when the id is already taken.
///
/// `created_at` and `updated_at` are assigned by the database.
pub async fn insert_project(db: &Database, row: ProjectRow) -> Result<bool, FlowforgeError> {
    db.connection()
        .call(move |conn| {
            let result = conn.execute(
                "INSERT INTO projects (id, name, project_type, status, original_idea,
                     optimized_data, workflow_data, schema_data, dev_environment, database_type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    row.id,
                    row.name,
                    row.project_type,
                    row.status,
                    row.original_idea,
                    row.optimized_data,
                    row.workflow_data,
                    row.schema_data,
                    row.dev_environment,
                    row.database_type,
                ],
            );
            match result {
                Ok(_) => Ok(true),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == ErrorCode::ConstraintViolation =>
                {
                    Ok(false)
                }
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Applies the provided columns and refreshes `updated_at`. Returns `false`
/// when no project has the id.
///
/// Payload columns take a flag/value pair so a patch can write NULL.
pub async fn update_project(
    db: &Database,
    id: &str,
    patch: RowPatch,
) -> Result<bool, FlowforgeError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let (set_concept, concept) = split(patch.optimized_data);
            let (set_workflow, workflow) = split(patch.workflow_data);
            let (set_schema, schema) = split(patch.schema_data);
            let changed = conn.execute(
                "UPDATE projects SET
                     name = COALESCE(?1, name),
                     project_type = COALESCE(?2, project_type),
                     status = COALESCE(?3, status),
                     original_idea = COALESCE(?4, original_idea),
                     optimized_data = CASE WHEN ?5 THEN ?6 ELSE optimized_data END,
                     workflow_data = CASE WHEN ?7 THEN ?8 ELSE workflow_data END,
                     schema_data = CASE WHEN ?9 THEN ?10 ELSE schema_data END,
                     dev_environment = COALESCE(?11, dev_environment),
                     database_type = COALESCE(?12, database_type),
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?13",
                params![
                    patch.name,
                    patch.project_type,
                    patch.status,
                    patch.original_idea,
                    set_concept,
                    concept,
                    set_workflow,
                    workflow,
                    set_schema,
                    schema,
                    patch.dev_environment,
                    patch.database_type,
                    id,
                ],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn split(change: Option<Option<String>>) -> (bool, Option<String>) {
    match change {
        Some(value) => (true, value),
        None => (false, None),
    }
}

/// Deletes a project. Returns `false` when no project has the id.
pub async fn delete_project(db: &Database, id: &str) -> Result<bool, FlowforgeError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let deleted = conn.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
