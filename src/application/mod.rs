//! Application layer - Request handlers and dispatch.
//!
//! This layer turns a platform request plus session history into a speech
//! response, coordinating the domain with the AI provider port.

pub mod dispatcher;
pub mod handlers;

pub use dispatcher::{fault_response, DispatchError, RequestDispatcher};
pub use handlers::{
    AskQuestionConfig, AskQuestionHandler, CancelOrStopHandler, FallbackHandler, HandlerError,
    HelpHandler, LaunchHandler, RequestHandler, SessionEndedHandler,
};
