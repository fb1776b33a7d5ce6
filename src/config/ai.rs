//! AI backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{OpenAIConfig, RelayConfig};

/// AI backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which backend answers questions
    #[serde(default)]
    pub backend: AiBackend,

    /// OpenAI API key (direct backend)
    pub openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Model for ordinary questions
    #[serde(default = "default_basic_model")]
    pub basic_model: String,

    /// Model for questions that ask for the advanced mode
    #[serde(default = "default_advanced_model")]
    pub advanced_model: String,

    /// Maximum tokens per answer
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Outbound request timeout in seconds; unset keeps the transport default
    pub timeout_secs: Option<u64>,

    /// Relay endpoint (relay backend)
    pub relay_url: Option<String>,

    /// Shared key forwarded to the relay
    pub relay_access_key: Option<String>,
}

/// AI backend type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiBackend {
    /// Chat completions API called directly
    #[default]
    Direct,
    /// Form post to a relay that fronts the model
    Relay,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Check if the direct backend has a key
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Check if the relay backend has both URL and key
    pub fn has_relay(&self) -> bool {
        self.relay_url.as_ref().is_some_and(|u| !u.is_empty())
            && self.relay_access_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Provider settings for the direct backend, if a key is configured.
    pub fn openai_config(&self) -> Option<OpenAIConfig> {
        let key = self.openai_api_key.as_ref().filter(|k| !k.is_empty())?;
        let config = OpenAIConfig::new(key.as_str())
            .with_models(&self.basic_model, &self.advanced_model)
            .with_base_url(&self.openai_base_url);

        Some(match self.timeout() {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        })
    }

    /// Provider settings for the relay backend, if URL and key are configured.
    pub fn relay_config(&self) -> Option<RelayConfig> {
        if !self.has_relay() {
            return None;
        }
        let config = RelayConfig::new(
            self.relay_url.as_deref().unwrap_or_default(),
            self.relay_access_key.as_deref().unwrap_or_default(),
        );

        Some(match self.timeout() {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        })
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.backend {
            AiBackend::Direct => {
                if !self.has_openai() {
                    return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
                }
                check_url("openai_base_url", &self.openai_base_url)?;
            }
            AiBackend::Relay => {
                let url = self
                    .relay_url
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .ok_or(ValidationError::MissingRequired("RELAY_URL"))?;
                check_url("relay_url", url)?;
                if !self.has_relay() {
                    return Err(ValidationError::MissingRequired("RELAY_ACCESS_KEY"));
                }
            }
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature(self.temperature));
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if self.timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

fn check_url(field: &'static str, url: &str) -> Result<(), ValidationError> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(ValidationError::InvalidUrl {
            field,
            url: url.to_string(),
        })
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: AiBackend::default(),
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            basic_model: default_basic_model(),
            advanced_model: default_advanced_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: None,
            relay_url: None,
            relay_access_key: None,
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_basic_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_advanced_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_temperature() -> f32 {
    0.7
}
