//! HTTP adapter for the voice platform.
//!
//! - `POST /alexa` - Answer a platform request envelope (path is configurable)
//! - `GET /health` - Liveness probe

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{RequestEnvelope, ResponseEnvelope, HISTORY_ATTRIBUTE};
pub use handlers::SkillAppState;
pub use routes::{skill_router, with_fault_layers, DEFAULT_SKILL_PATH};
