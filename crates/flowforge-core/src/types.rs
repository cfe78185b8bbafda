// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the wizard, the generation contracts, and storage.
//!
//! Every struct serializes with camelCase field names and every enum with the
//! lowercase (or kebab-case) tags the browser client sends, so JSON produced
//! here round-trips through the HTTP surface and the stored blobs unchanged.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
}

/// Who the planned app is for. Selects the prompt profile of every
/// generation contract.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProjectType {
    /// A tool for the user alone: no auth, file-based storage.
    #[default]
    Personal,
    /// A product for other people: auth, scalable storage.
    Public,
}

/// Target SQL dialect.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DatabaseType {
    Sqlite,
    #[default]
    Postgresql,
    Mysql,
}

/// External coding tool the user picks to continue the project in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DevEnvironment {
    Opencode,
    ClaudeTerminal,
    ClaudeVscode,
    ClaudeDesktop,
    GeminiAntigraphity,
}

/// Lifecycle of a saved project.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Completed,
}

/// Output of the concept generation contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedData {
    pub app_name: String,
    pub tagline: String,
    pub description: String,
    pub features: Vec<String>,
}

/// Output of the workflow generation contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowData {
    pub pipelines: Vec<Pipeline>,
}

/// A named workflow graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub name: String,
    pub steps: Vec<WorkflowStep>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Pipeline {
    /// Looks up a step by id within this pipeline.
    pub fn step(&self, id: &str) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
    #[serde(default)]
    pub description: String,
}

/// Closed set of workflow step kinds. Anything else in generated output is a
/// shape error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StepKind {
    Start,
    Process,
    Decision,
    End,
    Database,
    Api,
    User,
}

/// A directed edge between two steps of the same pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Output of the schema generation contract and the schema editor's model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaData {
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

/// A column definition. `data_type` and `constraints` are opaque SQL text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }
}

/// A persisted project as seen by the wizard and the HTTP surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub original_idea: String,
    pub optimized_data: Option<OptimizedData>,
    pub workflow_data: Option<WorkflowData>,
    pub schema_data: Option<SchemaData>,
    pub dev_environment: Option<DevEnvironment>,
    pub database_type: Option<DatabaseType>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating a project. Omitted type and status take their defaults
/// (`personal`, `draft`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub id: String,
    pub name: String,
    pub original_idea: String,
    #[serde(default)]
    pub project_type: Option<ProjectType>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub optimized_data: Option<OptimizedData>,
    #[serde(default)]
    pub workflow_data: Option<WorkflowData>,
    #[serde(default)]
    pub schema_data: Option<SchemaData>,
    #[serde(default)]
    pub dev_environment: Option<DevEnvironment>,
    #[serde(default)]
    pub database_type: Option<DatabaseType>,
}

impl NewProject {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        original_idea: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            original_idea: original_idea.into(),
            ..Default::default()
        }
    }
}

/// Partial update. `None` leaves the stored value untouched.
///
/// The generated payloads can also be cleared: `Some(None)`, or an explicit
/// JSON `null`, erases the stored blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub project_type: Option<ProjectType>,
    pub status: Option<ProjectStatus>,
    pub original_idea: Option<String>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub optimized_data: Option<Option<OptimizedData>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub workflow_data: Option<Option<WorkflowData>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub schema_data: Option<Option<SchemaData>>,
    pub dev_environment: Option<DevEnvironment>,
    pub database_type: Option<DatabaseType>,
}

/// A field that appears in the body is `Some`, even when its value is `null`.
/// Absent fields fall back to the container default.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ProjectPatch {
    /// True when the patch would change nothing but `updatedAt`.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A single-turn request to an LLM provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    /// Model identifier; empty selects the provider's configured default.
    pub model: String,
    pub system_prompt: Option<String>,
    /// The single user turn.
    pub prompt: String,
    pub max_tokens: u32,
}

/// A completed response from an LLM provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub id: String,
    /// Concatenated text content.
    pub content: String,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}
