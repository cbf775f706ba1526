//! Request handlers for the gateway routes.
//!
//! Model and parse failures surface as a 500 with a stable, user-facing
//! error string; the underlying cause goes to the log, never the client.

use super::{AnalyzeBody, AppState};
use crate::palette::Palette;
use crate::tokens::GenerateRequest;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub async fn handle_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// `POST /analyze-moodboard` — label a client-extracted palette.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> impl IntoResponse {
    let palette = match Palette::new(body.colors) {
        Ok(palette) => palette,
        Err(reason) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": reason }))).into_response();
        }
    };

    match state.analyzer.analyze(&palette).await {
        Ok(analysis) => Json(analysis).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "moodboard analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Moodboard analysis error" })),
            )
                .into_response()
        }
    }
}

/// `POST /generate-tokens` — one model call over the full brand brief.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> impl IntoResponse {
    match state.generator.generate(&body).await {
        Ok(tokens) => Json(json!({ "tokens": tokens })).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "token generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Token generation error" })),
            )
                .into_response()
        }
    }
}
