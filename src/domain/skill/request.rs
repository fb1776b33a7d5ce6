//! Incoming request kinds.

use std::collections::BTreeMap;

pub const LAUNCH_REQUEST: &str = "LaunchRequest";
pub const INTENT_REQUEST: &str = "IntentRequest";
pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const FALLBACK_INTENT: &str = "AMAZON.FallbackIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";

/// A request from the voice platform, reduced to what the dispatcher needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillRequest {
    /// The user opened the skill without a question.
    Launch,
    /// The platform recognized an intent.
    Intent(IntentRequest),
    /// The platform closed the session.
    SessionEnded { reason: Option<String> },
    /// Any request type this skill does not model.
    Unknown { request_type: String },
}

impl SkillRequest {
    /// Platform name of the request type.
    pub fn request_type(&self) -> &str {
        match self {
            SkillRequest::Launch => LAUNCH_REQUEST,
            SkillRequest::Intent(_) => INTENT_REQUEST,
            SkillRequest::SessionEnded { .. } => SESSION_ENDED_REQUEST,
            SkillRequest::Unknown { request_type } => request_type,
        }
    }

    pub fn is_request_type(&self, request_type: &str) -> bool {
        self.request_type() == request_type
    }

    /// Intent name, for intent requests only.
    pub fn intent_name(&self) -> Option<&str> {
        match self {
            SkillRequest::Intent(intent) => Some(&intent.name),
            _ => None,
        }
    }

    pub fn is_intent(&self, name: &str) -> bool {
        self.intent_name() == Some(name)
    }

    pub fn as_intent(&self) -> Option<&IntentRequest> {
        match self {
            SkillRequest::Intent(intent) => Some(intent),
            _ => None,
        }
    }
}

/// An intent with its filled slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentRequest {
    pub name: String,
    slots: BTreeMap<String, String>,
}

impl IntentRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: BTreeMap::new(),
        }
    }

    /// Adds a slot value. Blank values are treated as unfilled and skipped.
    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.slots.insert(name.into(), value);
        }
        self
    }

    /// The value of a filled slot.
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }
}
