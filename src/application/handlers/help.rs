//! HelpHandler - Explains what the skill can do.

use async_trait::async_trait;

use super::{HandlerError, RequestHandler};
use crate::domain::conversation::SessionState;
use crate::domain::skill::{speech, SkillRequest, SkillResponse, HELP_INTENT};

/// Handler for `AMAZON.HelpIntent`.
#[derive(Debug, Default)]
pub struct HelpHandler;

#[async_trait]
impl RequestHandler for HelpHandler {
    fn name(&self) -> &'static str {
        "help"
    }

    fn can_handle(&self, request: &SkillRequest) -> bool {
        request.is_intent(HELP_INTENT)
    }

    async fn handle(
        &self,
        _request: &SkillRequest,
        _session: &mut SessionState,
    ) -> Result<SkillResponse, HandlerError> {
        Ok(SkillResponse::speak(speech::HELP).ask(speech::HELP_REPROMPT))
    }
}
