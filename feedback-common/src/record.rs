//! Feedback record entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One star-rating submission together with the generated AI texts
///
/// Records are created once by the submission handler and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Server-assigned creation instant
    pub timestamp: DateTime<Utc>,
    /// User-supplied rating (no range enforced)
    pub rating: i64,
    /// Free-text review
    pub review: String,
    /// Reply shown to the end user
    pub ai_response: String,
    /// One-line summary for the admin view
    pub ai_summary: String,
    /// Recommended action for the admin view
    pub ai_action: String,
}

impl FeedbackRecord {
    /// Build a record stamped with the current time
    pub fn new(
        rating: i64,
        review: impl Into<String>,
        ai_response: impl Into<String>,
        ai_summary: impl Into<String>,
        ai_action: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: crate::time::now(),
            rating,
            review: review.into(),
            ai_response: ai_response.into(),
            ai_summary: ai_summary.into(),
            ai_action: ai_action.into(),
        }
    }
}
