//! # Lookup Proxy
//!
//! HTTP front for browser clients. The proxy keeps the verification service's
//! API key on the server: browsers POST a lookup to `/api/check`, the proxy
//! validates it, performs the upstream call itself and returns the outcome.
//!
//! ## Routes
//!
//! - `POST /api/check`: run one lookup
//! - `GET /api/games`: game catalog and server regions
//! - `GET /api/metrics`: lookup counters
//! - `GET /api/health`: liveness
//! - anything else: the static frontend, when configured

use anyhow::Result;
use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use log::{info, warn};
use std::sync::{Arc, Mutex};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;

use crate::catalog::{find_game, DEFAULT_SERVER, GAMES, SERVERS};
use crate::client::{LookupMetrics, LookupMiddleware, LookupSession, VerificationClient};
use crate::common::messages::{CheckRequest, ErrorResponse, LookupOutcome};
use crate::server::config::{ServerConfig, WebConfig};

type ApiError = (StatusCode, Json<ErrorResponse>);

pub struct AppState {
    middleware: LookupMiddleware,
}

impl AppState {
    pub fn new(middleware: LookupMiddleware) -> Self {
        Self { middleware }
    }
}

/// The web proxy: shared lookup state plus the web settings it was built with.
pub struct ProxyServer {
    state: Arc<AppState>,
    web: WebConfig,
}

impl ProxyServer {
    /// Builds the verification client from `config.service` and attaches
    /// fresh metrics.
    ///
    /// # Errors
    /// Fails if the service settings are unusable (bad endpoint, no API key).
    pub fn new(config: ServerConfig) -> Result<Self> {
        let client = Arc::new(VerificationClient::new(&config.service)?);
        let metrics = Arc::new(Mutex::new(LookupMetrics::new()));
        let middleware = LookupMiddleware::new(client).with_metrics(metrics);

        Ok(Self::with_state(Arc::new(AppState::new(middleware)), config.web))
    }

    pub fn with_state(state: Arc<AppState>, web: WebConfig) -> Self {
        Self { state, web }
    }

    /// Assembles the axum router.
    ///
    /// # Errors
    /// Fails if a configured CORS origin is not a valid header value.
    pub fn router(&self) -> Result<Router> {
        let mut app = Router::new()
            .route("/api/check", post(check_handler))
            .route("/api/games", get(games_handler))
            .route("/api/metrics", get(metrics_handler))
            .route("/api/health", get(health_check));

        if let Some(dir) = &self.web.static_dir {
            app = app.fallback_service(ServeDir::new(dir));
        }

        let mut app = app.with_state(self.state.clone());
        if let Some(cors) = cors_layer(&self.web.allowed_origins)? {
            app = app.layer(cors);
        }
        Ok(app)
    }

    /// Binds the configured address and serves until the process exits.
    pub async fn run(self) -> Result<()> {
        let app = self.router()?;
        let addr = self.web.bind_address.clone();

        info!("🌐 Lookup proxy running on http://{}", addr);
        info!("📡 API endpoint: http://{}/api/check", addr);
        info!("🔗 Upstream: {}", self.state.middleware.client().endpoint());

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;
        Ok(())
    }
}

fn cors_layer(origins: &[String]) -> Result<Option<CorsLayer>> {
    if origins.is_empty() {
        return Ok(None);
    }
    if origins.iter().any(|origin| origin == "*") {
        return Ok(Some(CorsLayer::permissive()));
    }

    let origins = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE]),
    ))
}

fn bad_request(error: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

async fn check_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CheckRequest>,
) -> Result<Json<LookupOutcome>, ApiError> {
    let request_id = rand::random::<u32>();

    // No game selected is an incomplete form; an unrecognized one is a bad key.
    let game = match body.game.as_str() {
        "" => None,
        key => Some(find_game(key).ok_or_else(|| bad_request(format!("unknown game: {key}")))?),
    };
    let server = body
        .server
        .filter(|server| !server.is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());

    info!(
        "📥 [{:08x}] Lookup request for {} account {}",
        request_id,
        game.map_or("<no game>", |game| game.display_name),
        body.id
    );

    let (_, ticket) = LookupSession::new()
        .select_game(game)
        .set_account_id(body.id)
        .set_zone_id(body.zoneid.unwrap_or_default())
        .set_server(server)
        .submit();

    let ticket = ticket.map_err(|e| {
        warn!("⚠️  [{:08x}] Rejected: {}", request_id, e);
        bad_request(e.to_string())
    })?;

    let resolution = state.middleware.dispatch(ticket).await;
    Ok(Json(resolution.outcome))
}

async fn games_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "games": GAMES,
        "servers": SERVERS,
        "default_server": DEFAULT_SERVER,
    }))
}

async fn metrics_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(metrics) = state.middleware.metrics() else {
        return Ok(Json(serde_json::json!({})));
    };
    let snapshot = metrics
        .lock()
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "metrics unavailable".to_string(),
                }),
            )
        })?
        .snapshot_json();
    Ok(Json(snapshot))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "game-id-checker",
    }))
}
