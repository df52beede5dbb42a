//! Prompt template

use super::parser::{ADMIN_ACTION_MARKER, ADMIN_SUMMARY_MARKER, USER_RESPONSE_MARKER};

/// Build the instruction prompt for one submission
///
/// Deterministic: the same review and rating always produce the same text.
pub fn build_prompt(review: &str, rating: i64) -> String {
    format!(
        r#"
A user submitted the following feedback.

Rating: {rating} stars
Review: "{review}"

Tasks:
1. Write a short, polite response to the user.
2. Write a one-sentence summary for an admin dashboard.
3. Suggest one clear recommended action for the business.

Respond strictly in this format:

{USER_RESPONSE_MARKER}
<text>

{ADMIN_SUMMARY_MARKER}
<text>

{ADMIN_ACTION_MARKER}
<text>
"#
    )
}
