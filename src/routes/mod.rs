//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/problems", get(http::http_list_problems))
        .route("/api/v1/modules", get(http::http_list_modules))
        .route("/api/v1/module", get(http::http_module_info))
        .route("/api/v1/playground", post(http::http_start_playground))
        .route("/api/v1/playground/practice", get(http::http_practice))
        .route("/api/v1/playground/action", post(http::http_user_action))
        .route("/api/v1/playground/reset", post(http::http_reset))
        .route("/api/v1/playground/state", get(http::http_playground_state))
        .route("/api/v1/playground/variables", get(http::http_variables))
        .route("/api/v1/playground/actions", get(http::http_action_log))
        .route("/api/v1/playground/end", post(http::http_end_playground))
        .route("/api/v1/hint", get(http::http_get_hint))
        .route("/api/v1/explain", get(http::http_explain))
        .route("/api/v1/agent/message", post(http::http_agent_message))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}
