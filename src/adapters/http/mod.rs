//! HTTP adapters - the skill's inbound surface.

pub mod alexa;

pub use alexa::{skill_router, SkillAppState};
