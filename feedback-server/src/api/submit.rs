//! Feedback submission

use axum::{extract::State, response::Html, Form};
use feedback_common::FeedbackRecord;
use serde::Deserialize;
use tracing::info;

use crate::{pages, ApiResult, AppState};

/// Form fields posted by the user dashboard
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    pub rating: i64,
    pub review: String,
}

/// POST /submit
///
/// Generates the AI texts, stores the record, and shows the user reply.
/// Storage failures abort the request with a 500.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> ApiResult<Html<String>> {
    info!(rating = form.rating, review_chars = form.review.len(), "Feedback submitted");

    let outputs = state.generator.generate(&form.review, form.rating).await;

    let record = FeedbackRecord::new(
        form.rating,
        form.review,
        outputs.user_response,
        outputs.summary,
        outputs.action,
    );
    state.store.append(&record).await?;

    info!(backend = state.store.backend_name(), "Feedback stored");

    Ok(Html(pages::thank_you(&record.ai_response)))
}
