//! Line classification for the message region of a transcript.
//!
//! Every component that buckets lines (the day index, the materializer and
//! the day splitter) goes through [`classify_line`], so catalog counts and
//! returned content always agree on what a line is.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::Result;

use super::timestamp::find_instant;

/// Substrings that mark a system notice rather than a chat message.
///
/// Open-chat bot announcements plus membership leave/join notices.
pub const EXCLUDED_PATTERNS: &[&str] = &["오픈채팅봇", "님이 나갔습니다.", "님이 들어왔습니다."];

/// A line holding only a date and weekday, e.g. `2024년 5월 1일 수요일`.
static DAY_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-*\s*[0-9]{4}년 [0-9]{1,2}월 [0-9]{1,2}일 [월화수목금토일]요일\s*-*$")
        .expect("separator pattern is a valid regex")
});

/// What a single line of the message region is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only.
    Blank,
    /// A system notice matched by [`is_excluded`].
    Excluded,
    /// A date banner KakaoTalk inserts between days.
    DaySeparator,
    /// A line that starts a message, with its resolved timestamp.
    Message(NaiveDateTime),
    /// Any other text: the body of a multi-line message.
    Continuation,
}

impl LineKind {
    /// Returns the message timestamp, if this line starts a message.
    pub fn instant(self) -> Option<NaiveDateTime> {
        match self {
            LineKind::Message(instant) => Some(instant),
            _ => None,
        }
    }

    /// Returns `true` for lines that appear in day content.
    pub fn is_content(self) -> bool {
        matches!(self, LineKind::Message(_) | LineKind::Continuation)
    }
}

/// Returns `true` if the line is a system notice.
pub fn is_excluded(line: &str) -> bool {
    EXCLUDED_PATTERNS.iter().any(|pattern| line.contains(pattern))
}

/// Classifies one line.
///
/// The exclusion check runs before the timestamp check, so a timestamped
/// join/leave notice is [`LineKind::Excluded`], never a message.
///
/// # Errors
///
/// Returns [`KakaoDayError::MalformedTimestamp`](crate::KakaoDayError::MalformedTimestamp)
/// when a timestamp token group matched but does not resolve to a real instant.
pub fn classify_line(line: &str) -> Result<LineKind> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(LineKind::Blank);
    }
    if is_excluded(trimmed) {
        return Ok(LineKind::Excluded);
    }
    if let Some(instant) = find_instant(trimmed)? {
        return Ok(LineKind::Message(instant));
    }
    if DAY_SEPARATOR_RE.is_match(trimmed) {
        return Ok(LineKind::DaySeparator);
    }
    Ok(LineKind::Continuation)
}
