//! OpenAI Provider - Implementation of AIProvider for OpenAI's chat API.
//!
//! Sends the whole session history to `/chat/completions` and returns the
//! first choice, flattened for speech.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_models("gpt-4o-mini", "gpt-4o")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::conversation::ModelTier;
use crate::domain::skill::speech::{collapse_whitespace, NO_ANSWER};
use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model used for ordinary questions.
    pub basic_model: String,
    /// Model used when the user asks for the advanced mode.
    pub advanced_model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            basic_model: "gpt-4o-mini".to_string(),
            advanced_model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: None,
        }
    }

    /// Sets the basic and advanced models.
    pub fn with_models(mut self, basic: impl Into<String>, advanced: impl Into<String>) -> Self {
        self.basic_model = basic.into();
        self.advanced_model = advanced.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Model for the requested tier.
    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Basic => &self.basic_model,
            ModelTier::Advanced => &self.advanced_model,
        }
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new OpenAI provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to OpenAI's format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let messages = request
            .messages
            .iter()
            .map(|turn| OpenAIMessage {
                role: turn.role().as_str().to_string(),
                content: Some(turn.content().to_string()),
            })
            .collect();

        OpenAIRequest {
            model: self.config.model_for(request.tier).to_string(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Sends a request.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let openai_request = self.to_openai_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.map(|t| t.as_secs() as u32).unwrap_or(0),
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(Self::parse_retry_after(&error_body))),
            400 | 404 | 422 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses retry-after from error response.
    fn parse_retry_after(error_body: &str) -> u32 {
        // OpenAI sometimes says "try again in Xs"; default to 30 seconds
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
            if let Some(s) = parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                if let Some(idx) = s.find("try again in ") {
                    let rest = &s[idx + 13..];
                    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                    if let Ok(secs) = digits.parse::<u32>() {
                        return secs;
                    }
                }
            }
        }
        30
    }

    /// Parses a successful response into speakable text.
    async fn parse_response(response: Response) -> Result<CompletionResponse, AIError> {
        let response = Self::handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("No choices in response"))?;

        Ok(CompletionResponse {
            content: speakable(choice.message.content.as_deref().unwrap_or_default()),
            model: openai_response.model,
        })
    }
}

/// Flattens model output for speech, substituting the "no answer" phrase
/// when nothing remains.
fn speakable(raw: &str) -> String {
    let text = collapse_whitespace(raw);
    if text.is_empty() {
        NO_ANSWER.to_string()
    } else {
        text
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(&request).await?;
        Self::parse_response(response).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", &self.config.basic_model)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    model: String,
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::test_server::{spawn_recording_stub, spawn_stub, StubReply};
    use crate::domain::conversation::Turn;
    use axum::http::StatusCode;

    fn provider_for(base_url: String) -> OpenAIProvider {
        OpenAIProvider::new(OpenAIConfig::new("sk-test").with_base_url(base_url)).unwrap()
    }

    fn chat_reply(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}]
        })
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_models("small", "large")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.model_for(ModelTier::Basic), "small");
        assert_eq!(config.model_for(ModelTier::Advanced), "large");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn default_models_match_tiers() {
        let config = OpenAIConfig::new("k");
        assert_eq!(config.model_for(ModelTier::Basic), "gpt-4o-mini");
        assert_eq!(config.model_for(ModelTier::Advanced), "gpt-4o");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn request_carries_history_and_tier_model() {
        let provider = provider_for("http://localhost".to_string());
        let request = CompletionRequest::new(vec![Turn::user("hola"), Turn::assistant("hola!"), Turn::user("adiós")])
            .with_tier(ModelTier::Advanced)
            .with_max_tokens(1500)
            .with_temperature(0.7);

        let body = serde_json::to_value(provider.to_openai_request(&request)).unwrap();
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 1500);
        assert_eq!(body["messages"].as_array().unwrap().len(), 3);
        assert_eq!(body["messages"][1]["role"], "assistant");
        assert_eq!(body["messages"][2]["content"], "adiós");
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let provider = provider_for("http://localhost/v1/".to_string());
        assert_eq!(provider.completions_url(), "http://localhost/v1/chat/completions");
    }

    #[test]
    fn speakable_collapses_and_substitutes() {
        assert_eq!(speakable("a\n\n  b   c"), "a b c");
        assert_eq!(speakable(" \n "), NO_ANSWER);
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 20s."}}"#;
        assert_eq!(OpenAIProvider::parse_retry_after(error), 20);
    }

    #[test]
    fn parse_retry_after_default() {
        assert_eq!(OpenAIProvider::parse_retry_after("not json"), 30);
    }

    #[tokio::test]
    async fn posts_bearer_auth_and_generation_settings() {
        let (base, received) =
            spawn_recording_stub(StubReply::json(StatusCode::OK, chat_reply("sí"))).await;
        let provider = provider_for(base);

        let request = CompletionRequest::new(vec![Turn::user("¿llueve?")])
            .with_max_tokens(1500)
            .with_temperature(0.7);
        provider.complete(request).await.unwrap();

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let call = &received[0];
        assert_eq!(call.path, "/chat/completions");
        assert_eq!(call.authorization.as_deref(), Some("Bearer sk-test"));
        assert!(call.content_type.starts_with("application/json"));

        let body: serde_json::Value = serde_json::from_str(&call.body).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 1500);
        let temperature = body["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
        assert_eq!(body["messages"][0]["content"], "¿llueve?");
    }

    #[tokio::test]
    async fn complete_returns_cleaned_text() {
        let base = spawn_stub(StubReply::json(StatusCode::OK, chat_reply("Marte es\n\nrojo.  "))).await;
        let provider = provider_for(base);

        let response = provider
            .complete(CompletionRequest::new(vec![Turn::user("¿Marte?")]))
            .await
            .unwrap();

        assert_eq!(response.content, "Marte es rojo.");
        assert_eq!(response.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn complete_substitutes_no_answer_for_blank_content() {
        let base = spawn_stub(StubReply::json(StatusCode::OK, chat_reply("   "))).await;
        let response = provider_for(base)
            .complete(CompletionRequest::new(vec![Turn::user("x")]))
            .await
            .unwrap();
        assert_eq!(response.content, NO_ANSWER);
    }

    #[tokio::test]
    async fn complete_maps_unauthorized() {
        let base = spawn_stub(StubReply::json(
            StatusCode::UNAUTHORIZED,
            serde_json::json!({"error": {"message": "bad key"}}),
        ))
        .await;
        let err = provider_for(base)
            .complete(CompletionRequest::new(vec![Turn::user("x")]))
            .await
            .unwrap_err();
        assert_eq!(err, AIError::AuthenticationFailed);
    }

    #[tokio::test]
    async fn complete_maps_server_error_to_unavailable() {
        let base = spawn_stub(StubReply::json(
            StatusCode::BAD_GATEWAY,
            serde_json::json!({"error": "upstream"}),
        ))
        .await;
        let err = provider_for(base)
            .complete(CompletionRequest::new(vec![Turn::user("x")]))
            .await
            .unwrap_err();
        assert!(matches!(err, AIError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn complete_rejects_empty_choices() {
        let base = spawn_stub(StubReply::json(
            StatusCode::OK,
            serde_json::json!({"model": "gpt-4o-mini", "choices": []}),
        ))
        .await;
        let err = provider_for(base)
            .complete(CompletionRequest::new(vec![Turn::user("x")]))
            .await
            .unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[tokio::test]
    async fn complete_rejects_malformed_body() {
        let base = spawn_stub(StubReply::text(StatusCode::OK, "<html>oops</html>")).await;
        let err = provider_for(base)
            .complete(CompletionRequest::new(vec![Turn::user("x")]))
            .await
            .unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[tokio::test]
    async fn complete_reports_connection_failure_as_network() {
        // Port 9 (discard) on localhost is not expected to accept connections.
        let err = provider_for("http://127.0.0.1:9".to_string())
            .complete(CompletionRequest::new(vec![Turn::user("x")]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "network");
    }
}
