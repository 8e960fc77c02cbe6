use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;

use locker_core::clock::SystemClock;
use locker_core::config::EngineConfig;
use locker_core::error::LockerError;
use locker_core::service::LockerService;

use crate::handlers::*;

pub type AppState = Arc<LockerService<SystemClock>>;

pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub sweep_interval_secs: u64,
    pub max_concurrency: usize,
}

pub async fn run(config: EngineConfig, opts: ServeOptions) -> Result<(), String> {
    let service = LockerService::new(config, SystemClock::new())
        .map_err(|e| format!("Invalid engine configuration: {}", e))?;
    let state: AppState = Arc::new(service);

    if opts.sweep_interval_secs > 0 {
        spawn_sweeper(state.clone(), Duration::from_secs(opts.sweep_interval_secs));
    } else {
        tracing::warn!("Background sweep disabled; call POST /sweep to reclaim expired lockers");
    }

    let app = router(state, opts.max_concurrency);
    let addr = format!("{}:{}", opts.host, opts.port);

    if std::env::var("LOCKER_API_KEY").is_ok() {
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No LOCKER_API_KEY set, server is open (dev mode)");
    }

    tracing::info!("📦 Locker server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))
}

fn router(state: AppState, max_concurrency: usize) -> Router {
    Router::new()
        // Health is always open (no auth)
        .route("/health", get(health))
        // Protected routes
        .route("/lockers", get(lockers))
        .route("/tickets", get(list_tickets))
        .route("/deposits", post(deposit))
        .route("/pickups", post(pickup))
        .route("/sweep", post(sweep))
        .layer(middleware::from_fn(auth_middleware))
        .layer(CorsLayer::permissive())
        .layer(ConcurrencyLimitLayer::new(max_concurrency.max(1)))
        .with_state(state)
}

// ─── Background Sweep ───────────────────────────────────────────────────────

fn spawn_sweeper(state: AppState, every: Duration) {
    tracing::info!(interval_secs = every.as_secs(), "🧹 Background sweep scheduled");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick fires immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let reclaimed = state.sweep();
            if !reclaimed.is_empty() {
                tracing::info!(reclaimed = reclaimed.len(), "Sweep reclaimed expired lockers");
            }
        }
    });
}

// ─── Auth Middleware ────────────────────────────────────────────────────────

async fn auth_middleware(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // If no API key is configured, allow all requests (dev mode)
    let expected_key = match std::env::var("LOCKER_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => return Ok(next.run(request).await),
    };

    if request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("");

    if token == expected_key {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("🚫 Unauthorized request to {}", request.uri().path());
        Err(StatusCode::UNAUTHORIZED)
    }
}

// ─── Handlers ───────────────────────────────────────────────────────────────

async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        active_tickets: state.status().active_tickets,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

async fn lockers(State(state): State<AppState>) -> Json<ApiResponse<LockersResponse>> {
    let status = state.status();
    Json(ApiResponse::ok(LockersResponse {
        total: status.total(),
        status,
    }))
}

async fn list_tickets(State(state): State<AppState>) -> Json<ApiResponse<Vec<TicketSummary>>> {
    let retention_ms = state.retention_ms();
    let tickets = state
        .active_tickets()
        .iter()
        .map(|t| TicketSummary::new(t, retention_ms))
        .collect();
    Json(ApiResponse::ok(tickets))
}

async fn deposit(
    State(state): State<AppState>,
    Json(req): Json<DepositRequest>,
) -> (StatusCode, Json<ApiResponse<TicketResponse>>) {
    let size = match req.validate() {
        Ok(size) => size,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(ApiResponse::err(e))),
    };

    match state.deposit(size) {
        Ok(ticket) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok(TicketResponse::new(&ticket, state.retention_ms()))),
        ),
        Err(e) => (StatusCode::CONFLICT, Json(ApiResponse::err(e.to_string()))),
    }
}

async fn pickup(
    State(state): State<AppState>,
    Json(req): Json<PickupRequest>,
) -> (StatusCode, Json<ApiResponse<PickupResponse>>) {
    let code = match req.validate() {
        Ok(code) => code,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(ApiResponse::err(e))),
    };

    match state.pickup(code) {
        Ok(confirmation) => (StatusCode::OK, Json(ApiResponse::ok(confirmation.into()))),
        Err(e @ LockerError::InvalidCode(_)) => {
            (StatusCode::NOT_FOUND, Json(ApiResponse::err(e.to_string())))
        }
        Err(e) => (StatusCode::CONFLICT, Json(ApiResponse::err(e.to_string()))),
    }
}

async fn sweep(State(state): State<AppState>) -> Json<ApiResponse<SweepResponse>> {
    let reclaimed = state.sweep();
    tracing::info!(reclaimed = reclaimed.len(), "Sweep requested");
    Json(ApiResponse::ok(SweepResponse { reclaimed }))
}
