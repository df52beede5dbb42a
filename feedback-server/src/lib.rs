//! feedback-server library - star-rating feedback with AI responses
//!
//! Exposes the router and state for the binary and for integration tests.

pub mod api;
pub mod cli;
pub mod error;
pub mod generator;
pub mod pages;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use feedback_common::FeedbackStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::generator::ResponseGenerator;

/// Application state shared across HTTP handlers
///
/// Built once at startup and injected into the router.
#[derive(Clone)]
pub struct AppState {
    /// Persistence adapter (CSV or SQLite)
    pub store: Arc<dyn FeedbackStore>,
    /// AI response generator
    pub generator: ResponseGenerator,
}

impl AppState {
    pub fn new(store: Arc<dyn FeedbackStore>, generator: ResponseGenerator) -> Self {
        Self { store, generator }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .merge(api::health_routes())
        .route("/user", get(api::user_dashboard))
        .route("/submit", post(api::submit_feedback))
        .route("/admin", get(api::admin_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
