// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! [`AnthropicClient`] owns the authenticated `reqwest::Client`, applies the
//! request timeout, and retries transient statuses.

use std::time::Duration;

use flowforge_core::FlowforgeError;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, MessageRequest, MessageResponse};

/// Base URL for the Anthropic Messages API.
const API_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

const RETRY_DELAY: Duration = Duration::from_secs(1);

/// HTTP client for Anthropic API communication.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    default_model: String,
    max_retries: u32,
    timeout: Duration,
    base_url: String,
}

/// Outcome of a single HTTP attempt.
enum Attempt {
    Done(MessageResponse),
    Retry(FlowforgeError),
}

impl AnthropicClient {
    /// Creates a client with authentication headers and a per-request timeout.
    pub fn new(
        api_key: &str,
        api_version: &str,
        model: String,
        timeout: Duration,
    ) -> Result<Self, FlowforgeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                FlowforgeError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(api_version).map_err(|e| {
                FlowforgeError::Config(format!("invalid API version header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FlowforgeError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            default_model: model,
            max_retries: 1,
            timeout,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Sets how many times a transient failure is retried.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a request and returns the full response.
    ///
    /// Statuses 429, 500, 503, and 529 are retried after a one second delay
    /// up to `max_retries` times. A request that exceeds the timeout fails
    /// with [`FlowforgeError::Timeout`] and is not retried.
    pub async fn complete_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, FlowforgeError> {
        let mut attempt = 0;
        loop {
            match self.attempt(request, attempt).await? {
                Attempt::Done(response) => return Ok(response),
                Attempt::Retry(err) if attempt < self.max_retries => {
                    attempt += 1;
                    warn!(attempt, error = %err, "retrying completion request after transient error");
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Attempt::Retry(err) => return Err(err),
            }
        }
    }

    async fn attempt(
        &self,
        request: &MessageRequest,
        attempt: u32,
    ) -> Result<Attempt, FlowforgeError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(status = %status, attempt, model = %request.model, "completion response received");

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if status.is_success() {
            let parsed = serde_json::from_str::<MessageResponse>(&body).map_err(|e| {
                FlowforgeError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;
            return Ok(Attempt::Done(parsed));
        }

        let err = FlowforgeError::Provider {
            message: describe_error(status, &body),
            source: None,
        };
        if is_transient_error(status) {
            Ok(Attempt::Retry(err))
        } else {
            Err(err)
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> FlowforgeError {
        if e.is_timeout() {
            FlowforgeError::Timeout {
                duration: self.timeout,
            }
        } else {
            FlowforgeError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }
}

/// Prefers the structured API error body, falling back to the raw text.
fn describe_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!(
            "Anthropic API error ({}): {}",
            api_err.error.type_, api_err.error.message
        ),
        Err(_) => format!("API returned {status}: {body}"),
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}
