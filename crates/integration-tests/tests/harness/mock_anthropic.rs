//! Mock Anthropic upstream for integration tests
//!
//! Serves `/v1/messages` and `/v1/complete` with canned bodies and records
//! every request it receives.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Request observed by the mock
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Value,
    pub raw: Vec<u8>,
}

/// Canned reply for one path
#[derive(Debug, Clone)]
struct Reply {
    status: StatusCode,
    body: Value,
    delay: Option<Duration>,
}

#[derive(Default)]
struct MockState {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<Recorded>>,
}

/// Mock Anthropic API bound to an ephemeral port
pub struct MockAnthropic {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockAnthropic {
    /// Start the mock with successful default replies
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/v1/messages", routing::post(handle))
            .route("/v1/complete", routing::post(handle))
            .route("/custom/{*rest}", routing::post(handle))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the provider
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Replace the reply for `path`
    pub fn reply(&self, path: &str, status: StatusCode, body: Value) {
        self.set_reply(path, Reply { status, body, delay: None });
    }

    /// Reply to `path` only after `delay`
    pub fn reply_slowly(&self, path: &str, delay: Duration) {
        let body = default_reply(path);
        self.set_reply(
            path,
            Reply {
                status: StatusCode::OK,
                body,
                delay: Some(delay),
            },
        );
    }

    fn set_reply(&self, path: &str, reply: Reply) {
        self.state.replies.lock().unwrap().insert(path.to_owned(), reply);
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("mock received no requests")
    }
}

impl Drop for MockAnthropic {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let path = uri.path().to_owned();

    state.requests.lock().unwrap().push(Recorded {
        path: path.clone(),
        query: uri.query().map(str::to_owned),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        raw: body.to_vec(),
    });

    let reply = state.replies.lock().unwrap().get(&path).cloned();
    let reply = reply.unwrap_or_else(|| Reply {
        status: StatusCode::OK,
        body: default_reply(&path),
        delay: None,
    });

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    (reply.status, Json(reply.body))
}

fn default_reply(path: &str) -> Value {
    if path == "/v1/complete" {
        json!({
            "completion": " Hello from mock Anthropic",
            "stop_reason": "stop_sequence",
            "model": "claude-2.1"
        })
    } else {
        json!({
            "id": "msg_mock",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "Hello from mock Anthropic"}],
            "model": "claude-3-haiku-20240307",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 6}
        })
    }
}
