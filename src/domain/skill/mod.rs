//! Skill domain module.
//!
//! The platform-independent shape of what the skill receives and answers:
//! request kinds, the speech response, and the fixed phrases the skill speaks.

mod request;
mod response;
pub mod speech;

pub use request::{
    IntentRequest, SkillRequest, CANCEL_INTENT, FALLBACK_INTENT, HELP_INTENT,
    INTENT_REQUEST, LAUNCH_REQUEST, SESSION_ENDED_REQUEST, STOP_INTENT,
};
pub use response::SkillResponse;
