//! SessionEndedHandler - Acknowledges that the platform closed the session.

use async_trait::async_trait;

use super::{HandlerError, RequestHandler};
use crate::domain::conversation::SessionState;
use crate::domain::skill::{SkillRequest, SkillResponse, SESSION_ENDED_REQUEST};

/// Handler for `SessionEndedRequest`.
///
/// The platform does not accept speech here, so the response is empty. The
/// session history is discarded.
#[derive(Debug, Default)]
pub struct SessionEndedHandler;

#[async_trait]
impl RequestHandler for SessionEndedHandler {
    fn name(&self) -> &'static str {
        "session_ended"
    }

    fn can_handle(&self, request: &SkillRequest) -> bool {
        request.is_request_type(SESSION_ENDED_REQUEST)
    }

    async fn handle(
        &self,
        request: &SkillRequest,
        session: &mut SessionState,
    ) -> Result<SkillResponse, HandlerError> {
        if let SkillRequest::SessionEnded { reason } = request {
            tracing::info!(
                reason = reason.as_deref().unwrap_or("unknown"),
                turns = session.len(),
                "Session ended"
            );
        }
        session.clear();
        Ok(SkillResponse::empty())
    }
}
