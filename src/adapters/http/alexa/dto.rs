//! HTTP DTOs (Data Transfer Objects) for the voice platform envelope.
//!
//! These types mirror the JSON the platform posts and expects back. They are
//! the boundary between the wire format and the skill domain: session
//! attributes are unpacked into a [`SessionState`] on the way in and packed
//! back on the way out.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::fault_response;
use crate::domain::conversation::SessionState;
use crate::domain::foundation::{RequestId, SessionId};
use crate::domain::skill::{
    IntentRequest, SkillRequest, SkillResponse, INTENT_REQUEST, LAUNCH_REQUEST,
    SESSION_ENDED_REQUEST,
};

/// Session attribute that carries the conversation history.
pub const HISTORY_ATTRIBUTE: &str = "messages";

/// Response envelope version understood by the platform.
pub const RESPONSE_VERSION: &str = "1.0";

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Top-level request envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub session: Option<SessionDto>,
    pub request: RequestDto,
}

/// Session block of the envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    #[serde(default)]
    pub new: bool,
    pub session_id: String,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default)]
    pub application: Option<ApplicationDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDto {
    pub application_id: String,
}

/// Request block of the envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDto {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub intent: Option<IntentDto>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntentDto {
    pub name: String,
    #[serde(default)]
    pub slots: Option<BTreeMap<String, SlotDto>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotDto {
    #[serde(default)]
    pub value: Option<String>,
}

impl RequestEnvelope {
    /// Reduces the envelope's request block to a [`SkillRequest`].
    pub fn skill_request(&self) -> SkillRequest {
        let request = &self.request;
        match request.request_type.as_str() {
            LAUNCH_REQUEST => SkillRequest::Launch,
            SESSION_ENDED_REQUEST => SkillRequest::SessionEnded {
                reason: request.reason.clone(),
            },
            INTENT_REQUEST => match &request.intent {
                Some(intent) => SkillRequest::Intent(intent.to_intent_request()),
                None => SkillRequest::Unknown {
                    request_type: request.request_type.clone(),
                },
            },
            other => SkillRequest::Unknown {
                request_type: other.to_string(),
            },
        }
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session
            .as_ref()
            .and_then(|s| SessionId::new(s.session_id.clone()).ok())
    }

    pub fn request_id(&self) -> Option<RequestId> {
        RequestId::new(self.request.request_id.clone()).ok()
    }

    /// Splits session attributes into the history and everything else.
    ///
    /// A history attribute that does not parse is logged and replaced by an
    /// empty history; other attributes are carried through untouched.
    pub fn session_attributes(&self) -> (SessionState, Map<String, Value>) {
        let mut extras = self
            .session
            .as_ref()
            .and_then(|s| s.attributes.clone())
            .unwrap_or_default();

        let state = match extras.remove(HISTORY_ATTRIBUTE) {
            None | Some(Value::Null) => SessionState::new(),
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding unreadable session history");
                SessionState::new()
            }),
        };

        (state, extras)
    }
}

impl IntentDto {
    fn to_intent_request(&self) -> IntentRequest {
        self.slots
            .iter()
            .flatten()
            .fold(IntentRequest::new(&self.name), |intent, (name, slot)| {
                match &slot.value {
                    Some(value) => intent.with_slot(name, value),
                    None => intent,
                }
            })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Top-level response envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: &'static str,
    pub session_attributes: Map<String, Value>,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<RepromptDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: &'static str,
    pub text: String,
}

impl OutputSpeech {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            speech_type: "PlainText",
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepromptDto {
    pub output_speech: OutputSpeech,
}

impl ResponseEnvelope {
    /// Builds the envelope, writing the history back into session attributes.
    pub fn new(
        response: &SkillResponse,
        session: SessionState,
        mut attributes: Map<String, Value>,
    ) -> Self {
        attributes.insert(
            HISTORY_ATTRIBUTE.to_string(),
            serde_json::to_value(session.into_turns()).unwrap_or_else(|_| Value::Array(Vec::new())),
        );

        Self {
            version: RESPONSE_VERSION,
            session_attributes: attributes,
            response: ResponseBody::from(response),
        }
    }

    /// The generic apology envelope, for failures where no session was read:
    /// a malformed body, or a panic that escaped the skill handler.
    pub fn fault() -> Self {
        Self {
            version: RESPONSE_VERSION,
            session_attributes: Map::new(),
            response: ResponseBody::from(&fault_response()),
        }
    }
}

impl From<&SkillResponse> for ResponseBody {
    fn from(response: &SkillResponse) -> Self {
        // Empty responses (session ended) carry no directives at all.
        let says_anything = response.speech().is_some() || response.reprompt().is_some();

        ResponseBody {
            output_speech: response.speech().map(OutputSpeech::plain),
            reprompt: response.reprompt().map(|text| RepromptDto {
                output_speech: OutputSpeech::plain(text),
            }),
            should_end_session: says_anything.then(|| !response.session_open()),
        }
    }
}
