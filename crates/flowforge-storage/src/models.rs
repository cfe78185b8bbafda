// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row model for the `projects` table and its mapping to domain records.

use flowforge_core::{FlowforgeError, NewProject, ProjectPatch, ProjectRecord};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A `projects` row exactly as stored: enums as their wire tags and payloads
/// as JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectRow {
    pub id: String,
    pub name: String,
    pub project_type: String,
    pub status: String,
    pub original_idea: String,
    pub optimized_data: Option<String>,
    pub workflow_data: Option<String>,
    pub schema_data: Option<String>,
    pub dev_environment: Option<String>,
    pub database_type: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Column values for a partial update. `None` keeps the stored value; for
/// the payload columns `Some(None)` writes NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowPatch {
    pub name: Option<String>,
    pub project_type: Option<String>,
    pub status: Option<String>,
    pub original_idea: Option<String>,
    pub optimized_data: Option<Option<String>>,
    pub workflow_data: Option<Option<String>>,
    pub schema_data: Option<Option<String>>,
    pub dev_environment: Option<String>,
    pub database_type: Option<String>,
}

impl ProjectRow {
    /// Builds the row to insert. Timestamps are left empty for the database
    /// to assign.
    pub fn from_new(project: &NewProject) -> Result<Self, FlowforgeError> {
        Ok(Self {
            id: project.id.clone(),
            name: project.name.clone(),
            project_type: project.project_type.unwrap_or_default().to_string(),
            status: project.status.unwrap_or_default().to_string(),
            original_idea: project.original_idea.clone(),
            optimized_data: encode(project.optimized_data.as_ref())?,
            workflow_data: encode(project.workflow_data.as_ref())?,
            schema_data: encode(project.schema_data.as_ref())?,
            dev_environment: project.dev_environment.map(|e| e.to_string()),
            database_type: project.database_type.map(|d| d.to_string()),
            created_at: String::new(),
            updated_at: String::new(),
        })
    }

    /// Decodes the stored text back into a [`ProjectRecord`].
    pub fn into_record(self) -> Result<ProjectRecord, FlowforgeError> {
        Ok(ProjectRecord {
            project_type: parse_tag("projectType", &self.project_type)?,
            status: parse_tag("status", &self.status)?,
            optimized_data: decode("optimizedData", self.optimized_data.as_deref())?,
            workflow_data: decode("workflowData", self.workflow_data.as_deref())?,
            schema_data: decode("schemaData", self.schema_data.as_deref())?,
            dev_environment: self
                .dev_environment
                .as_deref()
                .map(|v| parse_tag("devEnvironment", v))
                .transpose()?,
            database_type: self
                .database_type
                .as_deref()
                .map(|v| parse_tag("databaseType", v))
                .transpose()?,
            id: self.id,
            name: self.name,
            original_idea: self.original_idea,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl RowPatch {
    pub fn from_patch(patch: &ProjectPatch) -> Result<Self, FlowforgeError> {
        Ok(Self {
            name: patch.name.clone(),
            project_type: patch.project_type.map(|t| t.to_string()),
            status: patch.status.map(|s| s.to_string()),
            original_idea: patch.original_idea.clone(),
            optimized_data: encode_change(patch.optimized_data.as_ref())?,
            workflow_data: encode_change(patch.workflow_data.as_ref())?,
            schema_data: encode_change(patch.schema_data.as_ref())?,
            dev_environment: patch.dev_environment.map(|e| e.to_string()),
            database_type: patch.database_type.map(|d| d.to_string()),
        })
    }
}

fn encode<T: Serialize>(value: Option<&T>) -> Result<Option<String>, FlowforgeError> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(FlowforgeError::storage)
}

fn encode_change<T: Serialize>(
    change: Option<&Option<T>>,
) -> Result<Option<Option<String>>, FlowforgeError> {
    change.map(|value| encode(value.as_ref())).transpose()
}

fn decode<T: DeserializeOwned>(
    column: &str,
    text: Option<&str>,
) -> Result<Option<T>, FlowforgeError> {
    text.map(|t| {
        serde_json::from_str(t).map_err(|e| FlowforgeError::Storage {
            source: format!("stored {column} is not valid JSON: {e}").into(),
        })
    })
    .transpose()
}

fn parse_tag<T: std::str::FromStr>(column: &str, value: &str) -> Result<T, FlowforgeError> {
    value.parse().map_err(|_| FlowforgeError::Storage {
        source: format!("stored {column} has unknown value `{value}`").into(),
    })
}
