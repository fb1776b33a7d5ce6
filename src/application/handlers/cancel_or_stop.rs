//! CancelOrStopHandler - Says goodbye and ends the session.

use async_trait::async_trait;

use super::{HandlerError, RequestHandler};
use crate::domain::conversation::SessionState;
use crate::domain::skill::{speech, SkillRequest, SkillResponse, CANCEL_INTENT, STOP_INTENT};

/// Handler for `AMAZON.CancelIntent` and `AMAZON.StopIntent`.
///
/// The only handler that answers without a reprompt.
#[derive(Debug, Default)]
pub struct CancelOrStopHandler;

#[async_trait]
impl RequestHandler for CancelOrStopHandler {
    fn name(&self) -> &'static str {
        "cancel_or_stop"
    }

    fn can_handle(&self, request: &SkillRequest) -> bool {
        request.is_intent(CANCEL_INTENT) || request.is_intent(STOP_INTENT)
    }

    async fn handle(
        &self,
        _request: &SkillRequest,
        _session: &mut SessionState,
    ) -> Result<SkillResponse, HandlerError> {
        Ok(SkillResponse::speak(speech::GOODBYE))
    }
}
