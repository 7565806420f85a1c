#![allow(dead_code)]

//! Mock verification service shared by the integration tests.

use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

use game_id_checker::common::config::{ServiceConfig, DEFAULT_API_KEY_HEADER};

pub const TEST_API_KEY: &str = "test-key";

/// Account IDs starting with this prefix make the mock answer late.
pub const SLOW_PREFIX: &str = "slow";
pub const SLOW_DELAY: Duration = Duration::from_millis(300);

/// One request as seen by the mock.
#[derive(Debug, Clone)]
pub struct Received {
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

type Responder = Arc<dyn Fn(&Value) -> (StatusCode, String) + Send + Sync>;

#[derive(Clone)]
struct MockState {
    received: Arc<Mutex<Vec<Received>>>,
    respond: Responder,
}

pub struct MockService {
    pub endpoint: String,
    received: Arc<Mutex<Vec<Received>>>,
    handle: JoinHandle<()>,
}

impl MockService {
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(&Value) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            received: received.clone(),
            respond: Arc::new(respond),
        };
        let router = Router::new()
            .route("/idgames-checker", post(handle))
            .with_state(state);

        let (base_url, handle) = serve_router(router).await;
        Self {
            endpoint: format!("{base_url}/idgames-checker"),
            received,
            handle,
        }
    }

    /// A mock with a small fixed set of known accounts.
    pub async fn directory() -> Self {
        Self::start(directory).await
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            endpoint: self.endpoint.clone(),
            api_key: Some(TEST_API_KEY.to_string()),
            ..ServiceConfig::default()
        }
    }
}

impl Drop for MockService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    state.received.lock().unwrap().push(Received {
        api_key: header(DEFAULT_API_KEY_HEADER),
        content_type: header("content-type"),
        body: body.clone(),
    });

    if body["id"]
        .as_str()
        .is_some_and(|id| id.starts_with(SLOW_PREFIX))
    {
        sleep(SLOW_DELAY).await;
    }

    (state.respond)(&body)
}

pub async fn serve_router(router: Router) -> (String, JoinHandle<()>) {
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let actual_addr = listener.local_addr().unwrap();
    let base_url = format!("http://{actual_addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .unwrap();
    });

    (base_url, handle)
}

pub fn found(username: &str) -> (StatusCode, String) {
    (
        StatusCode::OK,
        json!({"status": true, "data": {"username": username}}).to_string(),
    )
}

pub fn not_found() -> (StatusCode, String) {
    (
        StatusCode::OK,
        json!({"status": false, "error": "not found"}).to_string(),
    )
}

/// Known accounts: ml 555 zone 9, genshin 777 on Europe, freefire 123, and any
/// `slow*` freefire account (answered after [`SLOW_DELAY`]).
pub fn directory(body: &Value) -> (StatusCode, String) {
    let id = body["id"].as_str().unwrap_or_default();
    match body["game"].as_str() {
        Some("ml") if id == "555" && body["zoneid"] == "9" => found("Alice"),
        Some("genshin") if id == "777" && body["server"] == "Europe" => found("Traveler"),
        Some("freefire") if id == "123" => found("Booyah"),
        Some("freefire") if id.starts_with(SLOW_PREFIX) => found(id),
        _ => not_found(),
    }
}
