//! Axum-based HTTP gateway exposing the two model-backed endpoints.
//!
//! Body limits are sized for base64-encoded moodboard images; the request
//! timeout has to accommodate a full model round trip.

mod handlers;

use handlers::{handle_analyze, handle_generate, handle_health};

use crate::config::Config;
use crate::moodboard::MoodboardAnalyzer;
use crate::providers::{self, Completion};
use crate::tokens::TokenGenerator;
use anyhow::Result;
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Maximum request body size (16MB) — a base64 data URL of a moodboard
/// image easily runs into the megabytes.
pub const MAX_BODY_SIZE: usize = 16 * 1024 * 1024;
/// Request timeout (120s) — covers a slow model round trip.
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Shared state for all axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<MoodboardAnalyzer>,
    pub generator: Arc<TokenGenerator>,
}

impl AppState {
    pub fn from_provider(provider: Arc<dyn Completion>) -> Self {
        Self {
            analyzer: Arc::new(MoodboardAnalyzer::new(provider.clone())),
            generator: Arc::new(TokenGenerator::new(provider)),
        }
    }
}

/// Body of `POST /analyze-moodboard`: the client-extracted palette.
#[derive(serde::Deserialize)]
pub struct AnalyzeBody {
    pub colors: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/analyze-moodboard", post(handle_analyze))
        .route("/generate-tokens", post(handle_generate))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
}

/// Bind and run the gateway.
pub async fn run_gateway(host: &str, port: u16, config: &Config) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    run_gateway_with_listener(listener, config).await
}

/// Run the gateway from a pre-bound listener (used by tests to grab an
/// ephemeral port).
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    config: &Config,
) -> Result<()> {
    let addr = listener.local_addr()?;
    let state = AppState::from_provider(providers::create_provider(config));

    tracing::info!(%addr, model = %config.model, "gateway listening");
    tracing::info!("  POST /analyze-moodboard");
    tracing::info!("  POST /generate-tokens");
    tracing::info!("  GET  /health");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
