//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the skill and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Text-generation backend that answers questions

mod ai_provider;

pub use ai_provider::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};
