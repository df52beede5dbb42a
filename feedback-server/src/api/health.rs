//! Health check endpoints

use axum::{extract::State, response::Html, routing::get, Json, Router};
use serde::Serialize;

use crate::{pages, AppState};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub storage: String,
    pub ai_enabled: bool,
}

/// GET /
///
/// Static availability indicator.
pub async fn availability() -> Html<&'static str> {
    Html(pages::HEALTH_INDICATOR)
}

/// GET /health
///
/// Machine-readable health check for monitoring.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "feedback-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.store.backend_name().to_string(),
        ai_enabled: state.generator.is_enabled(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(availability))
        .route("/health", get(health_check))
}
