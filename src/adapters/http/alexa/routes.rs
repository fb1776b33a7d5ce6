//! Axum router configuration for the skill endpoint.

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use super::dto::ResponseEnvelope;
use super::handlers::{handle_skill_request, health, SkillAppState};

/// Default mount point for the skill endpoint.
pub const DEFAULT_SKILL_PATH: &str = "/alexa";

/// Create the skill router.
///
/// # Routes
/// - `POST {skill_path}` - Platform request envelopes
/// - `GET /health` - Liveness probe
pub fn skill_router(state: SkillAppState, skill_path: &str) -> Router {
    let routes = Router::new()
        .route(skill_path, post(handle_skill_request))
        .route("/health", get(health))
        .with_state(state);

    with_fault_layers(routes)
}

/// Wraps a router with request tracing and the panic fault boundary.
pub fn with_fault_layers(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(panic_response)),
    )
}

/// Turns a caught panic into the apology envelope, keeping the session open.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Request handler panicked");

    Json(ResponseEnvelope::fault()).into_response()
}
