//! LaunchHandler - Greets the user when the skill is opened.

use async_trait::async_trait;

use super::{HandlerError, RequestHandler};
use crate::domain::conversation::SessionState;
use crate::domain::skill::{speech, SkillRequest, SkillResponse, LAUNCH_REQUEST};

/// Handler for `LaunchRequest`.
#[derive(Debug, Default)]
pub struct LaunchHandler;

#[async_trait]
impl RequestHandler for LaunchHandler {
    fn name(&self) -> &'static str {
        "launch"
    }

    fn can_handle(&self, request: &SkillRequest) -> bool {
        request.is_request_type(LAUNCH_REQUEST)
    }

    async fn handle(
        &self,
        _request: &SkillRequest,
        _session: &mut SessionState,
    ) -> Result<SkillResponse, HandlerError> {
        // History starts empty when the platform opens a new session; an
        // existing history is kept as is.
        Ok(SkillResponse::speak(speech::LAUNCH).ask(speech::LAUNCH_REPROMPT))
    }
}
