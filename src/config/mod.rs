//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `VOICE_SKILL` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use voice_skill::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod server;
mod skill;

pub use ai::{AiBackend, AiConfig};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, LogFormat, ServerConfig};
pub use skill::SkillConfig;

use serde::Deserialize;

use crate::application::AskQuestionConfig;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, logging, skill path)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI backend configuration (direct API or relay)
    #[serde(default)]
    pub ai: AiConfig,

    /// Interaction model names
    #[serde(default)]
    pub skill: SkillConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `VOICE_SKILL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `VOICE_SKILL__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `VOICE_SKILL__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VOICE_SKILL")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.skill.validate()?;
        Ok(())
    }

    /// Settings for the question handler, drawn from the skill and AI sections.
    pub fn ask_question_config(&self) -> AskQuestionConfig {
        AskQuestionConfig {
            intent_name: self.skill.question_intent.clone(),
            slot_name: self.skill.question_slot.clone(),
            advanced_keyword: self.skill.advanced_keyword.clone(),
            max_tokens: self.ai.max_tokens,
            temperature: self.ai.temperature,
        }
    }
}
