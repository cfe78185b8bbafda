// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude provider adapter for FlowForge.
//!
//! Implements [`ProviderAdapter`] on top of the non-streaming Messages API.
//! Each generation contract is a single user turn with a system prompt.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use flowforge_config::model::AnthropicConfig;
use flowforge_core::error::FlowforgeError;
use flowforge_core::traits::{PluginAdapter, ProviderAdapter};
use flowforge_core::types::{
    AdapterType, HealthStatus, ProviderRequest, ProviderResponse, TokenUsage,
};
use tracing::{debug, info};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Environment variable consulted when the config carries no key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Anthropic Claude provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config, then `ANTHROPIC_API_KEY`, else error.
pub struct AnthropicProvider {
    client: AnthropicClient,
}

impl AnthropicProvider {
    /// Creates a provider from the `[anthropic]` config section.
    pub fn new(config: &AnthropicConfig) -> Result<Self, FlowforgeError> {
        let api_key = resolve_api_key(config.api_key.as_deref(), std::env::var(API_KEY_ENV).ok())?;

        let client = AnthropicClient::new(
            &api_key,
            &config.api_version,
            config.default_model.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?
        .with_max_retries(config.max_retries);

        info!(
            model = config.default_model,
            timeout_secs = config.request_timeout_secs,
            "Anthropic provider initialized"
        );

        Ok(Self { client })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: AnthropicClient) -> Self {
        Self { client }
    }

    fn to_message_request(&self, request: &ProviderRequest) -> MessageRequest {
        let model = if request.model.is_empty() {
            self.client.default_model().to_string()
        } else {
            request.model.clone()
        };

        MessageRequest {
            model,
            messages: vec![ApiMessage::user(request.prompt.clone())],
            system: request.system_prompt.clone(),
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl PluginAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, FlowforgeError> {
        // No API call: health checks must not spend tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FlowforgeError> {
        debug!("Anthropic provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> Result<ProviderResponse, FlowforgeError> {
        let api_request = self.to_message_request(&request);
        let response = self.client.complete_message(&api_request).await?;

        debug!(
            id = %response.id,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = ?response.stop_reason,
            "completion finished"
        );

        Ok(ProviderResponse {
            content: response.text(),
            id: response.id,
            model: response.model,
            stop_reason: response.stop_reason,
            usage: TokenUsage {
                input_tokens: response.usage.input_tokens,
                output_tokens: response.usage.output_tokens,
            },
        })
    }
}

/// Picks the configured key unless it is blank, then the environment value.
fn resolve_api_key(
    config_key: Option<&str>,
    env_key: Option<String>,
) -> Result<String, FlowforgeError> {
    config_key
        .filter(|k| !k.trim().is_empty())
        .map(str::to_string)
        .or_else(|| env_key.filter(|k| !k.trim().is_empty()))
        .ok_or_else(|| {
            FlowforgeError::Config(format!(
                "Anthropic API key not found. Set anthropic.api_key in config or the {API_KEY_ENV} environment variable."
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str) -> AnthropicProvider {
        let client = AnthropicClient::new(
            "test-key",
            "2023-06-01",
            "claude-sonnet-4-20250514".into(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(base_url.to_string());
        AnthropicProvider::with_client(client)
    }

    fn request(model: &str) -> ProviderRequest {
        ProviderRequest {
            model: model.into(),
            system_prompt: Some("You are a product strategist.".into()),
            prompt: "A habit tracker with streaks".into(),
            max_tokens: 1024,
        }
    }

    #[test]
    fn resolve_api_key_prefers_config() {
        let key = resolve_api_key(Some("sk-config"), Some("sk-env".into())).unwrap();
        assert_eq!(key, "sk-config");
    }

    #[test]
    fn resolve_api_key_blank_config_falls_back_to_env() {
        let key = resolve_api_key(Some("  "), Some("sk-env".into())).unwrap();
        assert_eq!(key, "sk-env");
    }

    #[test]
    fn resolve_api_key_missing_everywhere_is_config_error() {
        let err = resolve_api_key(None, None).unwrap_err();
        assert!(matches!(err, FlowforgeError::Config(ref m) if m.contains("API key not found")));
    }

    #[test]
    fn empty_model_uses_client_default() {
        let provider = provider("http://localhost:1");
        let msg = provider.to_message_request(&request(""));
        assert_eq!(msg.model, "claude-sonnet-4-20250514");
        assert_eq!(msg.messages, vec![ApiMessage::user("A habit tracker with streaks")]);
        assert_eq!(msg.system.as_deref(), Some("You are a product strategist."));

        let msg = provider.to_message_request(&request("claude-haiku-4-5"));
        assert_eq!(msg.model, "claude-haiku-4-5");
    }

    #[tokio::test]
    async fn complete_maps_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-sonnet-4-20250514",
                "messages": [{"role": "user", "content": "A habit tracker with streaks"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_7",
                "type": "message",
                "role": "assistant",
                "content": [{"type": "text", "text": "{\"appName\":\"Streaky\"}"}],
                "model": "claude-sonnet-4-20250514",
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 12, "output_tokens": 8}
            })))
            .mount(&server)
            .await;

        let response = provider(&server.uri()).complete(request("")).await.unwrap();
        assert_eq!(response.id, "msg_7");
        assert_eq!(response.content, "{\"appName\":\"Streaky\"}");
        assert_eq!(response.usage.output_tokens, 8);
        assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
    }

    #[tokio::test]
    async fn plugin_adapter_metadata() {
        let provider = provider("http://localhost:1");

        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.version(), semver::Version::new(0, 1, 0));
        assert_eq!(provider.adapter_type(), AdapterType::Provider);
        assert_eq!(provider.health_check().await.unwrap(), HealthStatus::Healthy);
    }
}
