//! Domain layer containing the skill's vocabulary and rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (platform ids, validation errors)
//! - `conversation` - Session-scoped turn history and model tier selection
//! - `skill` - Request kinds, speech responses and fixed phrases

pub mod conversation;
pub mod foundation;
pub mod skill;
