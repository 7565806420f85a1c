mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{serve_router, MockService};
use game_id_checker::server::{ProxyServer, ServerConfig, WebConfig};

struct TestContext {
    mock: MockService,
    base_url: String,
    http: reqwest::Client,
    server_handle: tokio::task::JoinHandle<()>,
}

impl TestContext {
    async fn new() -> Self {
        let mock = MockService::directory().await;
        let config = ServerConfig {
            service: mock.service_config(),
            web: WebConfig::default(),
        };
        let router = ProxyServer::new(config).unwrap().router().unwrap();
        let (base_url, server_handle) = serve_router(router).await;

        Self {
            mock,
            base_url,
            http: reqwest::Client::new(),
            server_handle,
        }
    }

    async fn check(&self, body: Value) -> (StatusCode, Value) {
        let response = self
            .http
            .post(format!("{}/api/check", self.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn get(&self, path: &str) -> Value {
        self.http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

#[tokio::test]
async fn test_check_found() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .check(json!({"game": "ml", "id": "555", "zoneid": "9"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"outcome": "success", "username": "Alice"}));
}

#[tokio::test]
async fn test_check_not_found_is_still_ok() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.check(json!({"game": "aov", "id": "42"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"outcome": "failure", "reason": "not found"}));
}

#[tokio::test]
async fn test_missing_zone_is_rejected_locally() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.check(json!({"game": "ml", "id": "555"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Zone ID is required for Mobile Legends");

    let (status, _) = ctx
        .check(json!({"game": "ml", "id": "555", "zoneid": ""}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(ctx.mock.received().is_empty());
}

#[tokio::test]
async fn test_empty_id_is_rejected_locally() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.check(json!({"game": "codm", "id": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "select a game and enter an account ID");

    let (status, body) = ctx.check(json!({"game": "ml"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "select a game and enter an account ID");

    let (status, body) = ctx.check(json!({"id": "123"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "select a game and enter an account ID");

    assert!(ctx.mock.received().is_empty());
}

#[tokio::test]
async fn test_unknown_game_is_rejected() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.check(json!({"game": "pubg", "id": "1"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown game: pubg");

    assert!(ctx.mock.received().is_empty());
}

#[tokio::test]
async fn test_genshin_defaults_to_asia() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.check(json!({"game": "genshin", "id": "777"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "failure");

    let received = ctx.mock.received();
    assert_eq!(
        received[0].body,
        json!({"game": "genshin", "id": "777", "server": "Asia"})
    );
}

#[tokio::test]
async fn test_irrelevant_fields_are_not_forwarded() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .check(json!({"game": "freefire", "id": "123", "zoneid": "9", "server": "Europe"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "Booyah");
    assert_eq!(
        ctx.mock.received()[0].body,
        json!({"game": "freefire", "id": "123"})
    );
}

#[tokio::test]
async fn test_games_listing() {
    let ctx = TestContext::new().await;

    let body = ctx.get("/api/games").await;
    let games = body["games"].as_array().unwrap();
    assert_eq!(games.len(), 5);
    assert_eq!(games[1]["id"], "ml");
    assert_eq!(games[1]["requires_zone"], true);
    assert_eq!(body["default_server"], "Asia");
    assert_eq!(body["servers"], json!(["Asia", "America", "Europe"]));
}

#[tokio::test]
async fn test_metrics_and_health() {
    let ctx = TestContext::new().await;

    ctx.check(json!({"game": "freefire", "id": "123"})).await;
    ctx.check(json!({"game": "freefire", "id": "124"})).await;
    // Rejected locally; never counted.
    ctx.check(json!({"game": "ml", "id": "1"})).await;

    let metrics = ctx.get("/api/metrics").await;
    let stats = &metrics["aggregated_stats"];
    assert_eq!(stats["total_lookups"], 2);
    assert_eq!(stats["successful_lookups"], 1);
    assert_eq!(stats["failure_reasons"]["not found"], 1);

    let health = ctx.get("/api/health").await;
    assert_eq!(health["status"], "ok");
}
