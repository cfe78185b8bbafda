// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP mapping for [`FlowforgeError`].
//!
//! Every failure is answered with a JSON body of the form `{"error": "..."}`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use flowforge_core::FlowforgeError;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler error: a domain error or an unreadable request.
#[derive(Debug)]
pub enum ApiError {
    Domain(FlowforgeError),
    /// Malformed body or query string.
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<FlowforgeError> for ApiError {
    fn from(err: FlowforgeError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err {
                FlowforgeError::Validation(_) => StatusCode::BAD_REQUEST,
                FlowforgeError::NotFound { .. } => StatusCode::NOT_FOUND,
                FlowforgeError::Conflict(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            // Validation messages are already user-facing.
            ApiError::Domain(FlowforgeError::Validation(msg)) => msg.clone(),
            ApiError::Domain(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.message();
        if status.is_server_error() {
            tracing::error!(%status, %error, "request failed");
        } else {
            tracing::debug!(%status, %error, "request rejected");
        }
        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (FlowforgeError::Validation("Idea is required".into()), 400),
            (FlowforgeError::not_found("project", "x"), 404),
            (FlowforgeError::Conflict("dup".into()), 409),
            (FlowforgeError::generation("concept", "bad json"), 500),
            (
                FlowforgeError::Timeout {
                    duration: Duration::from_secs(120),
                },
                500,
            ),
            (FlowforgeError::Internal("x".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status().as_u16(), status);
        }
    }

    #[test]
    fn validation_message_is_unprefixed() {
        let err = ApiError::from(FlowforgeError::Validation("Idea is required".into()));
        assert_eq!(err.message(), "Idea is required");
    }
}
