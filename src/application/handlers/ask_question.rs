//! AskQuestionHandler - Answers a spoken question through the AI provider.
//!
//! Flow for one question:
//! 1. Read the question slot; missing or blank means "ask again"
//! 2. Strip the advanced-mode keyword and pick the model tier
//! 3. Append the user turn and send the whole history to the provider
//! 4. Append the answer as an assistant turn and speak it
//!
//! When the provider fails, the unanswered user turn is dropped so the
//! history stays a clean user/assistant alternation, and the fixed apology
//! is spoken with the session left open.

use std::sync::Arc;

use async_trait::async_trait;

use super::{HandlerError, RequestHandler};
use crate::domain::conversation::{ParsedQuestion, SessionState};
use crate::domain::skill::{speech, SkillRequest, SkillResponse};
use crate::ports::{AIProvider, CompletionRequest};

/// Settings for question answering.
#[derive(Debug, Clone, PartialEq)]
pub struct AskQuestionConfig {
    /// Intent that carries a question.
    pub intent_name: String,
    /// Slot holding the free-text question.
    pub slot_name: String,
    /// Leading word that selects the advanced model.
    pub advanced_keyword: String,
    /// Maximum tokens to generate per answer.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for AskQuestionConfig {
    fn default() -> Self {
        Self {
            intent_name: "OpenAIIntent".to_string(),
            slot_name: "pregunta".to_string(),
            advanced_keyword: "avanzado".to_string(),
            max_tokens: 1500,
            temperature: 0.7,
        }
    }
}

/// Handler for the question intent.
pub struct AskQuestionHandler {
    provider: Arc<dyn AIProvider>,
    config: AskQuestionConfig,
}

impl AskQuestionHandler {
    pub fn new(provider: Arc<dyn AIProvider>, config: AskQuestionConfig) -> Self {
        Self { provider, config }
    }

    fn clarification() -> SkillResponse {
        SkillResponse::speak(speech::MISSING_QUESTION).ask(speech::MISSING_QUESTION_REPROMPT)
    }

    fn question_error() -> SkillResponse {
        SkillResponse::speak(speech::QUESTION_ERROR).ask(speech::QUESTION_ERROR_REPROMPT)
    }

    async fn answer(
        &self,
        request: &SkillRequest,
        session: &mut SessionState,
    ) -> Result<SkillResponse, HandlerError> {
        let intent = request
            .as_intent()
            .ok_or_else(|| HandlerError::UnexpectedRequest {
                handler: self.name(),
                request_type: request.request_type().to_string(),
            })?;

        let question = intent
            .slot_value(&self.config.slot_name)
            .and_then(|raw| ParsedQuestion::parse(raw, &self.config.advanced_keyword));

        let Some(question) = question else {
            tracing::info!(slot = %self.config.slot_name, "Question slot missing or empty");
            return Ok(Self::clarification());
        };

        tracing::info!(tier = ?question.tier, question = %question.text, "User asked a question");

        session.append_user(question.text);

        let completion = CompletionRequest::new(session.turns().to_vec())
            .with_tier(question.tier)
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);

        match self.provider.complete(completion).await {
            Ok(response) => {
                tracing::debug!(model = %response.model, "Completion received");
                session.append_assistant(response.content.clone());
                Ok(SkillResponse::speak(response.content).ask(speech::ANSWER_REPROMPT))
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    kind = err.kind(),
                    provider = %self.provider.provider_info().name,
                    "Completion failed"
                );
                session.drop_orphaned_user_turn();
                Ok(SkillResponse::speak(speech::BACKEND_APOLOGY).ask(speech::ANSWER_REPROMPT))
            }
        }
    }
}

#[async_trait]
impl RequestHandler for AskQuestionHandler {
    fn name(&self) -> &'static str {
        "ask_question"
    }

    fn can_handle(&self, request: &SkillRequest) -> bool {
        request.is_intent(&self.config.intent_name)
    }

    /// Internal failures are spoken as this handler's own apology. Session
    /// state is left as the failure found it.
    async fn handle(
        &self,
        request: &SkillRequest,
        session: &mut SessionState,
    ) -> Result<SkillResponse, HandlerError> {
        match self.answer(request, session).await {
            Ok(response) => Ok(response),
            Err(err) => {
                tracing::error!(error = %err, "Question handling failed");
                Ok(Self::question_error())
            }
        }
    }
}
