//! Conversation domain module.
//!
//! Session-scoped chat history and the model tier requested for a question.

mod model_tier;
mod session_state;
mod turn;

pub use model_tier::{ModelTier, ParsedQuestion};
pub use session_state::SessionState;
pub use turn::{Turn, TurnRole};
