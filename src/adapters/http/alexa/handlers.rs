//! HTTP handlers for the skill endpoint.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use futures::FutureExt;
use serde_json::{json, Value};
use tracing::Instrument;

use crate::application::{fault_response, RequestDispatcher};

use super::dto::{RequestEnvelope, ResponseEnvelope};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SkillAppState {
    dispatcher: Arc<RequestDispatcher>,
}

impl SkillAppState {
    pub fn new(dispatcher: Arc<RequestDispatcher>) -> Self {
        Self { dispatcher }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /alexa - Answer one platform request envelope
///
/// The body is parsed here rather than through the `Json` extractor so that
/// a malformed envelope still gets a spoken answer instead of a 4xx.
pub async fn handle_skill_request(
    State(state): State<SkillAppState>,
    body: Bytes,
) -> Json<ResponseEnvelope> {
    let envelope: RequestEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting malformed request envelope");
            return Json(ResponseEnvelope::fault());
        }
    };

    let request = envelope.skill_request();
    let (mut session, attributes) = envelope.session_attributes();

    let span = tracing::info_span!(
        "skill_request",
        request_id = %envelope.request_id().map(|id| id.to_string()).unwrap_or_default(),
        session_id = %envelope.session_id().map(|id| id.to_string()).unwrap_or_default(),
        request_type = %request.request_type(),
        new_session = envelope.session.as_ref().map(|s| s.new).unwrap_or(false),
    );

    // A panic inside dispatch still echoes the session attributes back.
    let dispatched = AssertUnwindSafe(
        state
            .dispatcher
            .dispatch(&request, &mut session)
            .instrument(span),
    )
    .catch_unwind()
    .await;

    let response = dispatched.unwrap_or_else(|_| {
        tracing::error!("Dispatch panicked");
        fault_response()
    });

    Json(ResponseEnvelope::new(&response, session, attributes))
}

/// GET /health - Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
