//! Parser for the three-section model output
//!
//! A line-oriented state machine. Each input line is trimmed; a line equal to
//! a marker moves to that section, any other non-empty line is appended to
//! the current section. Text before the first marker is dropped. Lines in a
//! section are joined with a single space.

use super::AiOutputs;

pub const USER_RESPONSE_MARKER: &str = "USER_RESPONSE:";
pub const ADMIN_SUMMARY_MARKER: &str = "ADMIN_SUMMARY:";
pub const ADMIN_ACTION_MARKER: &str = "ADMIN_ACTION:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    UserResponse,
    Summary,
    Action,
}

impl Section {
    fn from_marker(line: &str) -> Option<Self> {
        match line {
            USER_RESPONSE_MARKER => Some(Section::UserResponse),
            ADMIN_SUMMARY_MARKER => Some(Section::Summary),
            ADMIN_ACTION_MARKER => Some(Section::Action),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Buckets {
    user_response: Vec<String>,
    summary: Vec<String>,
    action: Vec<String>,
}

impl Buckets {
    fn push(&mut self, section: Section, line: &str) {
        let bucket = match section {
            Section::Preamble => return,
            Section::UserResponse => &mut self.user_response,
            Section::Summary => &mut self.summary,
            Section::Action => &mut self.action,
        };
        bucket.push(line.to_string());
    }

    fn finish(self) -> AiOutputs {
        AiOutputs {
            user_response: self.user_response.join(" "),
            summary: self.summary.join(" "),
            action: self.action.join(" "),
        }
    }
}

/// Extract the three sections from free text
///
/// Never fails; a section whose marker is absent comes back as `""`.
pub fn parse_response(text: &str) -> AiOutputs {
    let mut state = Section::Preamble;
    let mut buckets = Buckets::default();

    for line in text.lines().map(str::trim) {
        if let Some(next) = Section::from_marker(line) {
            state = next;
        } else if !line.is_empty() {
            buckets.push(state, line);
        }
    }

    buckets.finish()
}
