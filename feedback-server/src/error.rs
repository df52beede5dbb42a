//! Error types for feedback-server

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::pages;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Storage failure (500)
    #[error("Storage error: {0}")]
    Storage(#[from] feedback_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (status, Html(pages::error_page(status, "Internal Server Error"))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
