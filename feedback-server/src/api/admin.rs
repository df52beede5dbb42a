//! Admin dashboard

use axum::{extract::State, response::Html};
use tracing::debug;

use crate::{pages, ApiResult, AppState};

/// GET /admin
///
/// Lists every stored submission. Not access controlled.
pub async fn admin_dashboard(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let records = state.store.list_all().await?;
    debug!(count = records.len(), "Loaded feedback records");

    Ok(Html(pages::admin_dashboard(&records)))
}
