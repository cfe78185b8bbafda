// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Bodies and query strings are extracted as `Result`s so a malformed
//! request becomes a JSON `400` instead of axum's plain-text rejection.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use flowforge_core::{
    DatabaseType, DevEnvironment, FlowforgeError, HealthStatus, NewProject, OptimizedData,
    PluginAdapter, ProjectPatch, ProjectRecord, ProjectStatus, ProjectStore, ProjectType,
    SchemaData, Table, WorkflowData,
};
use flowforge_generation::{ConceptRequest, SchemaRequest, WorkflowRequest};
use flowforge_schema::generate_sql;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiResult;
use crate::server::GatewayState;

/// Body for POST /api/projects. Required fields are optional here so their
/// absence is reported as a validation error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProjectBody {
    pub id: Option<String>,
    pub name: Option<String>,
    pub original_idea: Option<String>,
    pub project_type: Option<ProjectType>,
    pub status: Option<ProjectStatus>,
    pub optimized_data: Option<OptimizedData>,
    pub workflow_data: Option<WorkflowData>,
    pub schema_data: Option<SchemaData>,
    pub dev_environment: Option<DevEnvironment>,
    pub database_type: Option<DatabaseType>,
}

impl CreateProjectBody {
    fn into_new_project(self) -> Result<NewProject, FlowforgeError> {
        let required = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        match (
            required(self.id),
            required(self.name),
            required(self.original_idea),
        ) {
            (Some(id), Some(name), Some(original_idea)) => Ok(NewProject {
                id,
                name,
                original_idea,
                project_type: self.project_type,
                status: self.status,
                optimized_data: self.optimized_data,
                workflow_data: self.workflow_data,
                schema_data: self.schema_data,
                dev_environment: self.dev_environment,
                database_type: self.database_type,
            }),
            _ => Err(FlowforgeError::Validation(
                "Missing required fields: id, name, originalIdea".into(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SqlRequest {
    pub tables: Option<Vec<Table>>,
    pub database_type: Option<DatabaseType>,
}

#[derive(Debug, Serialize)]
pub struct SqlResponse {
    pub sql: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Store detail when it is not healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// POST /api/ai/optimize
pub async fn optimize(
    State(state): State<GatewayState>,
    payload: Result<Json<ConceptRequest>, JsonRejection>,
) -> ApiResult<Json<OptimizedData>> {
    let Json(request) = payload?;
    let generated = state.generator.generate_concept(&request).await?;
    Ok(Json(generated.data))
}

/// POST /api/ai/workflow
pub async fn workflow(
    State(state): State<GatewayState>,
    payload: Result<Json<WorkflowRequest>, JsonRejection>,
) -> ApiResult<Json<WorkflowData>> {
    let Json(request) = payload?;
    let generated = state.generator.generate_workflow(&request).await?;
    Ok(Json(generated.data))
}

/// POST /api/ai/schema
pub async fn schema(
    State(state): State<GatewayState>,
    payload: Result<Json<SchemaRequest>, JsonRejection>,
) -> ApiResult<Json<SchemaData>> {
    let Json(request) = payload?;
    let generated = state.generator.generate_schema(&request).await?;
    Ok(Json(generated.data))
}

/// GET /api/projects
pub async fn list_projects(
    State(state): State<GatewayState>,
) -> ApiResult<Json<Vec<ProjectRecord>>> {
    Ok(Json(state.store.list().await?))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<GatewayState>,
    payload: Result<Json<CreateProjectBody>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let Json(body) = payload?;
    let record = state.store.create(body.into_new_project()?).await?;
    info!(id = %record.id, "project created via API");
    Ok(Json(SuccessResponse {
        success: true,
        id: Some(record.id),
    }))
}

/// DELETE /api/projects?id=
pub async fn delete_project(
    State(state): State<GatewayState>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let Query(params) = params?;
    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| FlowforgeError::Validation("Project ID is required".into()))?;
    state.store.delete(&id).await?;
    Ok(Json(SuccessResponse {
        success: true,
        id: None,
    }))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectRecord>> {
    let record = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| FlowforgeError::not_found("project", &id))?;
    Ok(Json(record))
}

/// PATCH /api/projects/{id}
pub async fn update_project(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    payload: Result<Json<ProjectPatch>, JsonRejection>,
) -> ApiResult<Json<ProjectRecord>> {
    let Json(patch) = payload?;
    Ok(Json(state.store.update(&id, patch).await?))
}

/// POST /api/sql
pub async fn render_sql(
    payload: Result<Json<SqlRequest>, JsonRejection>,
) -> ApiResult<Json<SqlResponse>> {
    let Json(request) = payload?;
    match (request.tables, request.database_type) {
        (Some(tables), Some(dialect)) => Ok(Json(SqlResponse {
            sql: generate_sql(&tables, dialect),
        })),
        _ => Err(FlowforgeError::Validation("Missing required data".into()).into()),
    }
}

/// GET /health
pub async fn health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let store = state
        .store
        .health_check()
        .await
        .unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string()));
    let (status, detail) = match store {
        HealthStatus::Healthy => ("ok", None),
        HealthStatus::Degraded(detail) | HealthStatus::Unhealthy(detail) => {
            ("degraded", Some(detail))
        }
    };
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        detail,
    })
}
