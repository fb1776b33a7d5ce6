//! RequestDispatcher - Routes each request to exactly one handler.
//!
//! Handlers are consulted in registration order and the first whose
//! `can_handle` returns true runs. The dispatcher is also the fault boundary:
//! a request nobody claims, or a handler error, becomes the generic apology
//! with the session kept open. Callers always get a response.

use std::sync::Arc;

use thiserror::Error;

use super::handlers::{
    AskQuestionConfig, AskQuestionHandler, CancelOrStopHandler, FallbackHandler, HandlerError,
    HelpHandler, LaunchHandler, RequestHandler, SessionEndedHandler,
};
use crate::domain::conversation::SessionState;
use crate::domain::skill::{speech, SkillRequest, SkillResponse};
use crate::ports::AIProvider;

/// Why a request could not be answered by a handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("no handler for {request_type} (intent: {intent})")]
    NoHandler {
        request_type: String,
        intent: String,
    },

    #[error("handler {handler} failed: {source}")]
    Handler {
        handler: &'static str,
        #[source]
        source: HandlerError,
    },
}

/// Ordered list of request handlers with first-match-wins routing.
pub struct RequestDispatcher {
    handlers: Vec<Box<dyn RequestHandler>>,
}

impl Default for RequestDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestDispatcher {
    /// Creates a dispatcher with no handlers.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// The skill's handler set, in its fixed priority order.
    pub fn standard(provider: Arc<dyn AIProvider>, config: AskQuestionConfig) -> Self {
        Self::new()
            .with_handler(LaunchHandler)
            .with_handler(AskQuestionHandler::new(provider, config))
            .with_handler(HelpHandler)
            .with_handler(FallbackHandler)
            .with_handler(CancelOrStopHandler)
            .with_handler(SessionEndedHandler)
    }

    /// Registers a handler after the existing ones.
    pub fn with_handler(mut self, handler: impl RequestHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Names of registered handlers, in evaluation order.
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Runs the first matching handler, surfacing failures.
    pub async fn try_dispatch(
        &self,
        request: &SkillRequest,
        session: &mut SessionState,
    ) -> Result<SkillResponse, DispatchError> {
        let handler = self
            .handlers
            .iter()
            .find(|h| h.can_handle(request))
            .ok_or_else(|| DispatchError::NoHandler {
                request_type: request.request_type().to_string(),
                intent: request.intent_name().unwrap_or("-").to_string(),
            })?;

        tracing::debug!(handler = handler.name(), "Dispatching request");

        handler
            .handle(request, session)
            .await
            .map_err(|source| DispatchError::Handler {
                handler: handler.name(),
                source,
            })
    }

    /// Runs the first matching handler; any failure becomes the generic apology.
    pub async fn dispatch(&self, request: &SkillRequest, session: &mut SessionState) -> SkillResponse {
        match self.try_dispatch(request, session).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, "Unhandled failure while dispatching request");
                fault_response()
            }
        }
    }
}

/// The generic apology spoken on any unexpected failure. Keeps the session open.
pub fn fault_response() -> SkillResponse {
    SkillResponse::speak(speech::INTERNAL_ERROR).ask(speech::INTERNAL_ERROR_REPROMPT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::conversation::Turn;
    use crate::domain::skill::{
        IntentRequest, CANCEL_INTENT, FALLBACK_INTENT, HELP_INTENT, STOP_INTENT,
    };
    use async_trait::async_trait;

    fn dispatcher(provider: MockAIProvider) -> RequestDispatcher {
        RequestDispatcher::standard(Arc::new(provider), AskQuestionConfig::default())
    }

    fn intent(name: &str) -> SkillRequest {
        SkillRequest::Intent(IntentRequest::new(name))
    }

    struct FailingHandler;

    #[async_trait]
    impl RequestHandler for FailingHandler {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn can_handle(&self, request: &SkillRequest) -> bool {
            request.is_intent("BrokenIntent")
        }

        async fn handle(
            &self,
            _request: &SkillRequest,
            session: &mut SessionState,
        ) -> Result<SkillResponse, HandlerError> {
            session.append_user("half-done");
            Err(HandlerError::Internal("boom".to_string()))
        }
    }

    struct ClaimsEverything(&'static str);

    #[async_trait]
    impl RequestHandler for ClaimsEverything {
        fn name(&self) -> &'static str {
            self.0
        }

        fn can_handle(&self, _request: &SkillRequest) -> bool {
            true
        }

        async fn handle(
            &self,
            _request: &SkillRequest,
            _session: &mut SessionState,
        ) -> Result<SkillResponse, HandlerError> {
            Ok(SkillResponse::speak(self.0).ask("?"))
        }
    }

    #[test]
    fn standard_order_is_fixed() {
        let names = dispatcher(MockAIProvider::new()).handler_names();
        assert_eq!(
            names,
            vec![
                "launch",
                "ask_question",
                "help",
                "fallback",
                "cancel_or_stop",
                "session_ended"
            ]
        );
    }

    #[tokio::test]
    async fn first_matching_handler_wins() {
        let dispatcher = RequestDispatcher::new()
            .with_handler(ClaimsEverything("first"))
            .with_handler(ClaimsEverything("second"));

        let response = dispatcher
            .dispatch(&SkillRequest::Launch, &mut SessionState::new())
            .await;
        assert_eq!(response.speech(), Some("first"));
    }

    #[tokio::test]
    async fn launch_opens_session() {
        let response = dispatcher(MockAIProvider::new())
            .dispatch(&SkillRequest::Launch, &mut SessionState::new())
            .await;
        assert_eq!(response.speech(), Some(speech::LAUNCH));
        assert!(response.session_open());
    }

    #[tokio::test]
    async fn routes_builtin_intents() {
        let dispatcher = dispatcher(MockAIProvider::new());
        let mut session = SessionState::new();

        let help = dispatcher.dispatch(&intent(HELP_INTENT), &mut session).await;
        assert_eq!(help.speech(), Some(speech::HELP));

        let fallback = dispatcher.dispatch(&intent(FALLBACK_INTENT), &mut session).await;
        assert_eq!(fallback.speech(), Some(speech::FALLBACK));

        for name in [CANCEL_INTENT, STOP_INTENT] {
            let bye = dispatcher.dispatch(&intent(name), &mut session).await;
            assert_eq!(bye.speech(), Some(speech::GOODBYE));
            assert!(!bye.session_open());
        }
    }

    #[tokio::test]
    async fn question_reaches_provider() {
        let provider = MockAIProvider::new().with_response("Respuesta");
        let dispatcher = dispatcher(provider.clone());
        let mut session = SessionState::new();

        let request = SkillRequest::Intent(
            IntentRequest::new("OpenAIIntent").with_slot("pregunta", "hello"),
        );
        let response = dispatcher.dispatch(&request, &mut session).await;

        assert_eq!(response.speech(), Some("Respuesta"));
        assert_eq!(session.turns(), &[Turn::user("hello"), Turn::assistant("Respuesta")]);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn backend_error_is_apology_not_fault() {
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let request = SkillRequest::Intent(
            IntentRequest::new("OpenAIIntent").with_slot("pregunta", "hola"),
        );
        let response = dispatcher(provider)
            .dispatch(&request, &mut SessionState::new())
            .await;

        assert_eq!(response.speech(), Some(speech::BACKEND_APOLOGY));
        assert!(response.session_open());
    }

    #[tokio::test]
    async fn unknown_intent_gets_generic_apology() {
        let dispatcher = dispatcher(MockAIProvider::new());
        let mut session = SessionState::new();

        let err = dispatcher
            .try_dispatch(&intent("WeatherIntent"), &mut session)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::NoHandler {
                request_type: "IntentRequest".to_string(),
                intent: "WeatherIntent".to_string(),
            }
        );

        let response = dispatcher.dispatch(&intent("WeatherIntent"), &mut session).await;
        assert_eq!(response, fault_response());
        assert!(response.session_open());
    }

    #[tokio::test]
    async fn unknown_request_type_gets_generic_apology() {
        let request = SkillRequest::Unknown {
            request_type: "AudioPlayer.PlaybackStarted".to_string(),
        };
        let response = dispatcher(MockAIProvider::new())
            .dispatch(&request, &mut SessionState::new())
            .await;
        assert_eq!(response.speech(), Some(speech::INTERNAL_ERROR));
        assert_eq!(response.reprompt(), Some(speech::INTERNAL_ERROR_REPROMPT));
    }

    #[tokio::test]
    async fn handler_error_is_caught_and_state_left_as_is() {
        let dispatcher = RequestDispatcher::new().with_handler(FailingHandler);
        let mut session = SessionState::new();

        let response = dispatcher.dispatch(&intent("BrokenIntent"), &mut session).await;

        assert_eq!(response, fault_response());
        assert!(response.session_open());
        assert_eq!(session.len(), 1);
    }

    #[tokio::test]
    async fn session_ended_clears_history() {
        let mut session = SessionState::from_turns(vec![Turn::user("a"), Turn::assistant("b")]);
        let response = dispatcher(MockAIProvider::new())
            .dispatch(&SkillRequest::SessionEnded { reason: None }, &mut session)
            .await;

        assert!(response.speech().is_none());
        assert!(session.is_empty());
    }
}
