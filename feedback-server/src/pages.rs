//! HTML page rendering
//!
//! Pages are plain HTML built with `format!`. Every user- or model-supplied
//! string passes through [`escape_html`] before interpolation.

use axum::http::StatusCode;
use feedback_common::FeedbackRecord;
use std::fmt::Write;

const STYLE: &str = r#"
    <style>
        body {
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 960px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
        }
        h1 {
            color: #333;
            border-bottom: 2px solid #0066cc;
            padding-bottom: 10px;
        }
        label { display: block; margin-top: 16px; font-weight: 600; }
        textarea { width: 100%; min-height: 120px; }
        button {
            margin-top: 16px;
            padding: 10px 20px;
            background: #0066cc;
            color: white;
            border: none;
            border-radius: 4px;
        }
        table { width: 100%; border-collapse: collapse; }
        th, td { border: 1px solid #ddd; padding: 8px; vertical-align: top; text-align: left; }
        th { background: #f5f5f5; }
        .response { background: #f5f5f5; padding: 20px; border-radius: 4px; }
    </style>
"#;

/// Escape text for inclusion in HTML element content or quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
{STYLE}</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// Availability indicator for `GET /`
pub const HEALTH_INDICATOR: &str = "<h3>App is running</h3>";

/// Feedback submission form
pub fn user_form() -> String {
    layout(
        "Share Your Feedback",
        r#"    <h1>Share Your Feedback</h1>
    <form method="post" action="/submit">
        <label for="rating">Rating</label>
        <select id="rating" name="rating" required>
            <option value="5">★★★★★ (5)</option>
            <option value="4">★★★★ (4)</option>
            <option value="3">★★★ (3)</option>
            <option value="2">★★ (2)</option>
            <option value="1">★ (1)</option>
        </select>

        <label for="review">Review</label>
        <textarea id="review" name="review" required placeholder="Tell us about your experience"></textarea>

        <button type="submit">Submit</button>
    </form>"#,
    )
}

/// Confirmation page showing only the user-facing reply
pub fn thank_you(ai_response: &str) -> String {
    layout(
        "Thank You",
        &format!(
            r#"    <h1>Thank you for your feedback!</h1>
    <div class="response">{}</div>
    <p><a href="/user">Submit another review</a></p>"#,
            escape_html(ai_response)
        ),
    )
}

/// Admin table of every stored record
pub fn admin_dashboard(records: &[FeedbackRecord]) -> String {
    let mut body = String::from(
        r#"    <h1>Admin Dashboard</h1>
    <table>
        <thead>
            <tr>
                <th>Timestamp</th>
                <th>Rating</th>
                <th>Review</th>
                <th>AI Response</th>
                <th>AI Summary</th>
                <th>AI Action</th>
            </tr>
        </thead>
        <tbody>
"#,
    );

    if records.is_empty() {
        body.push_str("            <tr><td colspan=\"6\">No feedback yet</td></tr>\n");
    }

    for record in records {
        // Writing to a String cannot fail
        let _ = writeln!(
            body,
            "            <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&record.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
            record.rating,
            escape_html(&record.review),
            escape_html(&record.ai_response),
            escape_html(&record.ai_summary),
            escape_html(&record.ai_action),
        );
    }

    body.push_str("        </tbody>\n    </table>\n");
    let _ = write!(body, "    <p><small>{} submission(s)</small></p>", records.len());

    layout("Admin Dashboard", &body)
}

/// Generic error page
pub fn error_page(status: StatusCode, message: &str) -> String {
    layout(
        message,
        &format!(
            "    <h1>{} {}</h1>\n    <p>The request could not be completed.</p>",
            status.as_u16(),
            escape_html(message)
        ),
    )
}
