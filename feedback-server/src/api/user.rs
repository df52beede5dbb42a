//! User dashboard

use axum::response::Html;

use crate::pages;

/// GET /user
///
/// Renders the feedback submission form.
pub async fn user_dashboard() -> Html<String> {
    Html(pages::user_form())
}
