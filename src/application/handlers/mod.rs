//! Request handlers.
//!
//! One handler per request kind the skill understands. The dispatcher asks
//! each handler, in registration order, whether it can handle a request and
//! runs the first one that says yes.

mod ask_question;
mod cancel_or_stop;
mod fallback;
mod help;
mod launch;
mod session_ended;

pub use ask_question::{AskQuestionConfig, AskQuestionHandler};
pub use cancel_or_stop::CancelOrStopHandler;
pub use fallback::FallbackHandler;
pub use help::HelpHandler;
pub use launch::LaunchHandler;
pub use session_ended::SessionEndedHandler;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversation::SessionState;
use crate::domain::skill::{SkillRequest, SkillResponse};

/// A handler for one kind of platform request.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Whether this handler takes the request.
    fn can_handle(&self, request: &SkillRequest) -> bool;

    /// Produces the response, reading and appending to the session history.
    async fn handle(
        &self,
        request: &SkillRequest,
        session: &mut SessionState,
    ) -> Result<SkillResponse, HandlerError>;
}

/// Failures a handler does not turn into speech itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The handler was given a request it does not accept.
    #[error("handler {handler} cannot handle {request_type}")]
    UnexpectedRequest {
        handler: &'static str,
        request_type: String,
    },

    /// Anything else that went wrong inside a handler.
    #[error("internal error: {0}")]
    Internal(String),
}
