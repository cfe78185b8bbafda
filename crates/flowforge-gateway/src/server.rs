// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    routing::{get, post},
};
use flowforge_config::model::GatewayConfig;
use flowforge_core::{FlowforgeError, ProjectStore};
use flowforge_generation::Generator;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub generator: Generator,
    pub store: Arc<dyn ProjectStore>,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(generator: Generator, store: Arc<dyn ProjectStore>) -> Self {
        Self {
            generator,
            store,
            start_time: Instant::now(),
        }
    }
}

/// Address the gateway binds to.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl From<&GatewayConfig> for ServerConfig {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builds the application router.
///
/// - POST /api/ai/optimize, /api/ai/workflow, /api/ai/schema
/// - GET, POST, DELETE /api/projects
/// - GET, PATCH /api/projects/{id}
/// - POST /api/sql
/// - GET /health
pub fn router(state: GatewayState) -> Router {
    let ai_routes = Router::new()
        .route("/api/ai/optimize", post(handlers::optimize))
        .route("/api/ai/workflow", post(handlers::workflow))
        .route("/api/ai/schema", post(handlers::schema));

    let project_routes = Router::new()
        .route(
            "/api/projects",
            get(handlers::list_projects)
                .post(handlers::create_project)
                .delete(handlers::delete_project),
        )
        .route(
            "/api/projects/{id}",
            get(handlers::get_project).patch(handlers::update_project),
        );

    Router::new()
        .merge(ai_routes)
        .merge(project_routes)
        .route("/api/sql", post(handlers::render_sql))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds and serves until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), FlowforgeError> {
    let app = router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FlowforgeError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| FlowforgeError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}
