//! FallbackHandler - Asks the user to rephrase an utterance nothing matched.

use async_trait::async_trait;

use super::{HandlerError, RequestHandler};
use crate::domain::conversation::SessionState;
use crate::domain::skill::{speech, SkillRequest, SkillResponse, FALLBACK_INTENT};

/// Handler for `AMAZON.FallbackIntent`.
#[derive(Debug, Default)]
pub struct FallbackHandler;

#[async_trait]
impl RequestHandler for FallbackHandler {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn can_handle(&self, request: &SkillRequest) -> bool {
        request.is_intent(FALLBACK_INTENT)
    }

    async fn handle(
        &self,
        _request: &SkillRequest,
        _session: &mut SessionState,
    ) -> Result<SkillResponse, HandlerError> {
        Ok(SkillResponse::speak(speech::FALLBACK).ask(speech::FALLBACK_REPROMPT))
    }
}
