//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Completion backends (OpenAI-compatible API, relay, mock)
//! - `http` - The inbound voice platform endpoint

pub mod ai;
pub mod http;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider, RelayConfig, RelayProvider};
pub use http::{skill_router, SkillAppState};
