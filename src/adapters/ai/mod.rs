//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - Direct calls to an OpenAI-compatible chat API
//! - `RelayProvider` - Form posts to a relay that fronts the model
//! - `MockAIProvider` - Configurable mock for testing

mod mock_provider;
mod openai_provider;
mod relay_provider;

#[cfg(test)]
pub(crate) mod test_server;

pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
pub use relay_provider::{RelayConfig, RelayProvider, RELAY_ORIGIN};
