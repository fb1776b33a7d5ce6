//! Local HTTP stub standing in for remote completion backends in tests.

use std::sync::{Arc, Mutex};

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Router;

/// Canned reply served for every request.
#[derive(Debug, Clone)]
pub struct StubReply {
    status: StatusCode,
    content_type: &'static str,
    body: String,
}

impl StubReply {
    pub fn json(status: StatusCode, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.to_string(),
        }
    }
}

/// A request the stub received.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub path: String,
    pub content_type: String,
    pub authorization: Option<String>,
    pub body: String,
}

pub type Received = Arc<Mutex<Vec<ReceivedRequest>>>;

/// Starts a stub on an ephemeral port and returns its base URL.
pub async fn spawn_stub(reply: StubReply) -> String {
    spawn_recording_stub(reply).await.0
}

/// Like [`spawn_stub`], also returning what the stub received.
pub async fn spawn_recording_stub(reply: StubReply) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();

    let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, body: String| {
        let sink = sink.clone();
        let reply = reply.clone();
        async move {
            sink.lock().unwrap().push(ReceivedRequest {
                path: uri.path().to_string(),
                content_type: headers
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string(),
                authorization: headers
                    .get(AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body,
            });
            (reply.status, [(CONTENT_TYPE, reply.content_type)], reply.body)
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), received)
}
