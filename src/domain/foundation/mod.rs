//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers and validation errors that form the vocabulary
//! of the skill domain.

mod errors;
mod ids;

pub use errors::ValidationError;
pub use ids::{RequestId, SessionId};
