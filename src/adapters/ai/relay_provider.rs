//! Relay Provider - Implementation of AIProvider through a relay API.
//!
//! The relay keeps its own conversation context, so only the latest user
//! message is forwarded, together with the shared access key and an origin
//! tag. The relay's `message` field is returned verbatim.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// Origin tag the relay uses to tell voice traffic apart.
pub const RELAY_ORIGIN: &str = "alexa";

/// Configuration for the relay provider.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Fixed relay endpoint.
    pub url: String,
    /// Shared access key forwarded with each message.
    access_key: Secret<String>,
    /// Origin tag sent with each message.
    pub origin: String,
    /// Request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl RelayConfig {
    pub fn new(url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_key: Secret::new(access_key.into()),
            origin: RELAY_ORIGIN.to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn access_key(&self) -> &str {
        self.access_key.expose_secret()
    }
}

/// Relay API provider implementation.
pub struct RelayProvider {
    config: RelayConfig,
    client: Client,
}

impl RelayProvider {
    pub fn new(config: RelayConfig) -> Result<Self, AIError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn post_message(&self, message: &str) -> Result<Response, AIError> {
        let form = [
            ("message", message),
            ("key", self.config.access_key()),
            ("origin", self.config.origin.as_str()),
        ];

        self.client
            .post(&self.config.url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.map(|t| t.as_secs() as u32).unwrap_or(0),
                    }
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    async fn parse_reply(response: Response) -> Result<String, AIError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => AIError::AuthenticationFailed,
                429 => AIError::rate_limited(30),
                500..=599 => AIError::unavailable(format!("Relay error {}: {}", status, body)),
                _ => AIError::InvalidRequest(format!("Relay rejected request {}: {}", status, body)),
            });
        }

        let reply: RelayReply = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse relay reply: {}", e)))?;

        Ok(reply.message)
    }
}

#[async_trait]
impl AIProvider for RelayProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let message = request
            .latest_user_message()
            .ok_or_else(|| AIError::InvalidRequest("No user message to relay".to_string()))?;

        let response = self.post_message(message).await?;
        let content = Self::parse_reply(response).await?;

        Ok(CompletionResponse::new(content, "relay"))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("relay", "relay")
    }
}

#[derive(Debug, Deserialize)]
struct RelayReply {
    message: String,
}
