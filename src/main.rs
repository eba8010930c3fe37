//! WindowLab · Guided Algorithm Playground Backend
//!
//! - Axum HTTP + WebSocket API around the step-driven playground engine
//! - Optional assistant integration (local/mock LLM backend, via env)
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT          : u16 (default 3000)
//!   CONTENT_DIR      : directory of *.json problem documents (optional)
//!   APP_CONFIG_PATH  : path to TOML config (prompts + module UI config)
//!   ASSISTANT_BASE_URL : enables the Jarvis assistant if present
//!   ASSISTANT_API_KEY  : optional bearer token for the assistant backend
//!   ASSISTANT_MODEL    : default "local-chat"
//!   LOG_LEVEL    : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod seeds;
mod engine;
mod extract;
mod adapter;
mod state;
mod protocol;
mod logic;
mod assistant;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (problem catalogue, sessions, assistant).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "windowlab_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
