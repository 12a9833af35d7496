// tests/common/mod.rs
pub use serde_json::json;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::AuthError;
use crate::provider::Clock;
use crate::sources::fetch::{TokenTransport, TransportResponse};

pub const ENDPOINT: &str = "https://auth.example.test/oauth/token";

#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub url: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl RecordedPost {
    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is json")
    }
}

/// In-memory token endpoint answering from a script, one entry per call.
/// Calls past the end of the script fail with a network error.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<TransportResponse, AuthError>>>,
    posts: Mutex<Vec<RecordedPost>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: serde_json::Value) -> Self {
        self.respond_raw(status, body.to_string())
    }

    pub fn respond_raw(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.push(Ok(TransportResponse::new(status, body)))
    }

    pub fn token(self, access_token: &str, expires_in: i64) -> Self {
        self.respond(200, token_body(access_token, expires_in))
    }

    pub fn fail_network(self, reason: &str) -> Self {
        self.push(Err(AuthError::Network(reason.to_owned().into())))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn push(self, entry: Result<TransportResponse, AuthError>) -> Self {
        self.script.lock().unwrap().push_back(entry);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }
}

impl TokenTransport for ScriptedTransport {
    async fn post(&self, url: &str, content_type: &'static str, body: Vec<u8>) -> Result<TransportResponse, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.posts.lock().unwrap().push(RecordedPost { url: url.to_owned(), content_type, body });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(AuthError::Network("no scripted response left".into())))
    }
}

pub fn token_body(access_token: &str, expires_in: i64) -> serde_json::Value {
    json!({
        "access_token": access_token,
        "scope": "read:dispatch",
        "expires_in": expires_in,
        "token_type": "Bearer"
    })
}

/// Clock that only moves when told to.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: Arc::new(Mutex::new(Utc::now())) }
    }

    pub fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    pub fn advance(&self, by: chrono::Duration) {
        *self.now.lock().unwrap() += by;
    }

    pub fn as_clock(&self) -> Clock {
        let now = self.now.clone();
        Arc::new(move || *now.lock().unwrap())
    }
}

pub fn empty_request() -> http::Request<()> {
    http::Request::builder()
        .uri("https://dispatch.example.test/orders")
        .body(())
        .unwrap()
}
