//! Skill interaction model configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Names from the voice platform's interaction model
#[derive(Debug, Clone, Deserialize)]
pub struct SkillConfig {
    /// Intent that carries a free-text question
    #[serde(default = "default_question_intent")]
    pub question_intent: String,

    /// Slot of the question intent that holds the question
    #[serde(default = "default_question_slot")]
    pub question_slot: String,

    /// Leading word that switches a question to the advanced model
    #[serde(default = "default_advanced_keyword")]
    pub advanced_keyword: String,
}

impl SkillConfig {
    /// Validate skill configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.question_intent.trim().is_empty() {
            return Err(ValidationError::EmptySkillSetting("question_intent"));
        }
        if self.question_slot.trim().is_empty() {
            return Err(ValidationError::EmptySkillSetting("question_slot"));
        }
        Ok(())
    }
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            question_intent: default_question_intent(),
            question_slot: default_question_slot(),
            advanced_keyword: default_advanced_keyword(),
        }
    }
}

fn default_question_intent() -> String {
    "OpenAIIntent".to_string()
}

fn default_question_slot() -> String {
    "pregunta".to_string()
}

fn default_advanced_keyword() -> String {
    "avanzado".to_string()
}
