// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use flowforge_core::ProjectStore;
use flowforge_gateway::{GatewayState, router};
use flowforge_generation::{GenerationSettings, Generator};
use flowforge_test_utils::{TestHarness, fixtures};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app(responses: Vec<String>) -> (Router, TestHarness) {
    let harness = TestHarness::builder()
        .with_mock_responses(responses)
        .build()
        .await
        .unwrap();
    let generator = Generator::new(harness.provider.clone(), GenerationSettings::default());
    let store: Arc<dyn ProjectStore> = harness.store.clone();
    (router(GatewayState::new(generator, store)), harness)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn optimize_returns_concept() {
    let (app, harness) = app(vec![fixtures::concept_json()]).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ai/optimize",
        Some(json!({"idea": fixtures::HABIT_IDEA, "projectType": "personal"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appName"], "StreakKeeper");
    assert_eq!(body["features"].as_array().unwrap().len(), 5);

    let requests = harness.provider.requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].prompt.contains(fixtures::HABIT_IDEA));
}

#[tokio::test]
async fn optimize_without_idea_is_bad_request() {
    let (app, harness) = app(vec![]).await;
    let (status, body) = send(&app, Method::POST, "/api/ai/optimize", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Idea is required");
    assert!(harness.provider.requests().await.is_empty());
}

#[tokio::test]
async fn malformed_json_body_is_bad_request() {
    let (app, _harness) = app(vec![]).await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/ai/optimize")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unparseable_model_output_is_server_error() {
    let (app, _harness) = app(vec!["Here is your concept: {".into()]).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ai/optimize",
        Some(json!({"idea": "x"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("concept"));
}

#[tokio::test]
async fn provider_failure_is_server_error() {
    let (app, harness) = app(vec![fixtures::concept_json()]).await;
    harness.provider.fail_next("upstream unavailable").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ai/optimize",
        Some(json!({"idea": "x"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn workflow_and_schema_endpoints() {
    let (app, _harness) = app(vec![fixtures::workflow_json(), fixtures::schema_json()]).await;
    let concept = serde_json::to_value(fixtures::concept()).unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ai/workflow",
        Some(json!({"optimizedData": concept, "projectType": "personal"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pipelines"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ai/schema",
        Some(json!({
            "optimizedData": concept,
            "workflowData": body,
            "projectType": "personal",
            "databaseType": "sqlite"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tables"][0]["name"], "habits");
}

#[tokio::test]
async fn workflow_and_schema_validate_inputs() {
    let (app, _harness) = app(vec![]).await;
    let (status, body) = send(&app, Method::POST, "/api/ai/workflow", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Optimized data is required");

    let concept = serde_json::to_value(fixtures::concept()).unwrap();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ai/schema",
        Some(json!({"optimizedData": concept})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required data");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/ai/schema",
        Some(json!({"optimizedData": concept, "databaseType": "oracle"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn project_lifecycle() {
    let (app, _harness) = app(vec![]).await;

    let (status, body) = send(&app, Method::GET, "/api/projects", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(json!({
            "id": "p1",
            "name": "StreakKeeper",
            "originalIdea": fixtures::HABIT_IDEA,
            "optimizedData": fixtures::concept(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "id": "p1"}));

    let (status, body) = send(&app, Method::GET, "/api/projects/p1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projectType"], "personal");
    assert_eq!(body["status"], "draft");
    assert_eq!(body["optimizedData"]["appName"], "StreakKeeper");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/projects/p1",
        Some(json!({"status": "completed", "databaseType": "sqlite"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
    assert_eq!(body["name"], "StreakKeeper");

    let (status, body) = send(&app, Method::GET, "/api/projects", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::DELETE, "/api/projects?id=p1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, _) = send(&app, Method::GET, "/api/projects/p1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_project_errors() {
    let (app, _harness) = app(vec![]).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(json!({"id": "p1", "name": "No idea"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Missing required fields"));

    let project = json!({"id": "p1", "name": "A", "originalIdea": "idea"});
    let (status, _) = send(&app, Method::POST, "/api/projects", Some(project.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::POST, "/api/projects", Some(project)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_project_errors() {
    let (app, _harness) = app(vec![]).await;

    let (status, body) = send(&app, Method::DELETE, "/api/projects", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Project ID is required");

    let (status, _) = send(&app, Method::DELETE, "/api/projects?id=ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_unknown_project_is_not_found() {
    let (app, _harness) = app(vec![]).await;
    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/projects/ghost",
        Some(json!({"name": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_with_null_payload_clears_it() {
    let (app, _harness) = app(vec![]).await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(json!({
            "id": "p1",
            "name": "StreakKeeper",
            "originalIdea": fixtures::HABIT_IDEA,
            "optimizedData": fixtures::concept(),
            "schemaData": fixtures::schema(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/projects/p1",
        Some(json!({"schemaData": null, "databaseType": "mysql"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["schemaData"].is_null(), "got: {body}");
    assert_eq!(body["optimizedData"]["appName"], "StreakKeeper");
    assert_eq!(body["databaseType"], "mysql");
}

#[tokio::test]
async fn sql_endpoint_renders_ddl() {
    let (app, _harness) = app(vec![]).await;
    let schema = fixtures::schema();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sql",
        Some(json!({"tables": schema.tables, "databaseType": "sqlite"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let sql = body["sql"].as_str().unwrap();
    assert!(sql.contains("CREATE TABLE habits ("));
    assert!(sql.contains("CREATE TABLE check_ins ("));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/sql",
        Some(json!({"tables": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _harness) = app(vec![]).await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
    assert!(body.get("detail").is_none());
}
