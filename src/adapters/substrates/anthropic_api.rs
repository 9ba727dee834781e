//! Anthropic API text generator.
//!
//! Makes direct, non-streaming HTTP calls to the Anthropic Messages API.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::errors::{CapabilityError, DomainError, DomainResult};
use crate::domain::models::GenerationConfig;
use crate::domain::ports::TextGenerator;

/// Configuration for the Anthropic API generator.
#[derive(Debug, Clone)]
pub struct AnthropicApiConfig {
    /// API key (will be read from ANTHROPIC_API_KEY env if not set).
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Model to use.
    pub model: String,
    /// API version header.
    pub api_version: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Max tokens to generate.
    pub max_tokens: u32,
}

impl Default for AnthropicApiConfig {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for AnthropicApiConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.clone(),
            model: config.model.clone(),
            api_version: "2023-06-01".to_string(),
            timeout_secs: config.timeout_secs,
            max_tokens: config.max_tokens,
        }
    }
}

impl AnthropicApiConfig {
    /// Get API key from config or environment.
    pub fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Create config with explicit API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Create config with custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Create config with custom model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum MessageRole {
    User,
}

#[derive(Debug, Clone, Serialize)]
struct Message {
    role: MessageRole,
    content: String,
}

/// Request to the Anthropic Messages API.
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

/// Content block in a response.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Unsupported,
}

/// Response from the Anthropic Messages API.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Anthropic Messages API text generator.
pub struct AnthropicTextGenerator {
    config: AnthropicApiConfig,
    client: Client,
}

impl AnthropicTextGenerator {
    /// Create a new Anthropic API generator.
    pub fn new(config: AnthropicApiConfig) -> DomainResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::Validation(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn build_request(&self, prompt: &str) -> MessagesRequest {
        MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: MessageRole::User,
                content: prompt.to_string(),
            }],
        }
    }

    fn map_transport_error(&self, err: &reqwest::Error) -> CapabilityError {
        if err.is_timeout() {
            CapabilityError::Timeout(self.config.timeout_secs)
        } else {
            CapabilityError::Network(err.to_string())
        }
    }

    fn map_status(status: StatusCode, body: &str) -> CapabilityError {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| body.to_string());

        if status == StatusCode::TOO_MANY_REQUESTS {
            CapabilityError::Quota(message)
        } else if status.is_server_error() {
            CapabilityError::Network(format!("{status}: {message}"))
        } else {
            CapabilityError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }
}

#[async_trait]
impl TextGenerator for AnthropicTextGenerator {
    fn name(&self) -> &'static str {
        "anthropic_api"
    }

    async fn is_available(&self) -> bool {
        self.config.get_api_key().is_some()
    }

    async fn complete(&self, prompt: &str) -> Result<String, CapabilityError> {
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| CapabilityError::NotConfigured("ANTHROPIC_API_KEY not set".to_string()))?;

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url.trim_end_matches('/')))
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-api-key", &api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        if !status.is_success() {
            return Err(Self::map_status(status, &body));
        }

        let result: MessagesResponse = serde_json::from_str(&body)
            .map_err(|e| CapabilityError::Malformed(format!("Failed to parse response: {e}")))?;

        let text = result
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Unsupported => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        if text.trim().is_empty() {
            return Err(CapabilityError::Malformed(format!(
                "response contained no text (stop_reason: {})",
                result.stop_reason.as_deref().unwrap_or("unknown")
            )));
        }

        tracing::debug!(chars = text.len(), "text generation completed");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(server: &mockito::Server) -> AnthropicTextGenerator {
        let config = AnthropicApiConfig::default()
            .with_api_key("test-key")
            .with_base_url(server.url());
        AnthropicTextGenerator::new(config).unwrap()
    }

    #[test]
    fn test_config_from_generation_config() {
        let config = AnthropicApiConfig::default();
        assert_eq!(config.base_url, "https://api.anthropic.com");
        assert_eq!(config.max_tokens, 8192);
        assert_eq!(config.api_version, "2023-06-01");
    }

    #[test]
    fn test_config_with_model() {
        let config = AnthropicApiConfig::default().with_model("claude-haiku-4-5");
        assert_eq!(config.model, "claude-haiku-4-5");
    }

    #[test]
    fn test_build_request() {
        let generator = AnthropicTextGenerator::new(AnthropicApiConfig::default()).unwrap();
        let request = generator.build_request("Hello!");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].content, "Hello!");
    }

    #[tokio::test]
    async fn test_complete_joins_text_blocks() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"content":[{"type":"text","text":"first"},{"type":"tool_use","id":"x","name":"y","input":{}},{"type":"text","text":"second"}],"stop_reason":"end_turn"}"#,
            )
            .create_async()
            .await;

        let text = generator(&server).complete("prompt").await.unwrap();
        assert_eq!(text, "first\nsecond");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_quota() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(429)
            .with_body(r#"{"type":"error","error":{"type":"rate_limit_error","message":"slow down"}}"#)
            .create_async()
            .await;

        let err = generator(&server).complete("prompt").await.unwrap_err();
        assert_eq!(err, CapabilityError::Quota("slow down".to_string()));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_network() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let err = generator(&server).complete("prompt").await.unwrap_err();
        assert!(matches!(err, CapabilityError::Network(_)));
    }

    #[tokio::test]
    async fn test_garbage_body_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = generator(&server).complete("prompt").await.unwrap_err();
        assert!(matches!(err, CapabilityError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let config = AnthropicApiConfig::default()
            .with_api_key("")
            .with_base_url("http://127.0.0.1:9");
        let generator = AnthropicTextGenerator::new(config).unwrap();
        assert!(!generator.is_available().await);
        let result = generator.complete("prompt").await;
        assert!(matches!(result, Err(CapabilityError::NotConfigured(_))));
    }
}
