//! Header extraction for KakaoTalk exports.
//!
//! A PC export starts with a two-line block:
//!
//! ```text
//! Alice 님과 카카오톡 대화
//! 저장한 날짜 : 2024년 05월 01일 오후 1:00
//! ```
//!
//! [`extract_header`] reads lines from the start of the file until that
//! block matches and reports the byte offset where the messages begin.

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{KakaoDayError, Result};
use crate::source::LineReader;

/// Participant clause, whitespace, then the saved-date clause.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.*?) 님과 카카오톡 대화\s*\n\s*저장한 날짜 : (.*?)\n")
        .expect("header pattern is a valid regex")
});

/// The header block of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHeader {
    /// Chat title (the participant or room name).
    pub title: String,
    /// The "saved on" date text, verbatim.
    pub saved_date: String,
    /// Byte offset of the first line after the header block.
    pub content_start: u64,
}

const TITLE_MARKER: &str = "님과 카카오톡 대화";
const SAVED_DATE_MARKER: &str = "저장한 날짜";

/// Scans from byte 0 until the header block matches.
///
/// Only blank lines may sit between the title line and the saved-date line,
/// so the match is tried on a window that starts at the latest title line.
/// Any other line closes the window. The whole stream is searched.
///
/// # Errors
///
/// Returns [`KakaoDayError::InvalidFormat`] if the stream ends before the
/// header matches.
pub fn extract_header<R: BufRead>(reader: R) -> Result<ChatHeader> {
    let mut lines = LineReader::new(reader, 0);
    let mut window = String::new();
    let mut consumed = 0usize;

    while let Some((_, line)) = lines.next_line()? {
        consumed += 1;

        if line.contains(TITLE_MARKER) {
            window.clear();
            window.push_str(&line);
            continue;
        }
        if window.is_empty() {
            continue;
        }

        let saved_date_line = line.contains(SAVED_DATE_MARKER);
        if !saved_date_line && !line.trim().is_empty() {
            window.clear();
            continue;
        }
        window.push_str(&line);

        if saved_date_line {
            if let Some(caps) = HEADER_RE.captures(&window) {
                let title = caps[1].trim_start_matches('\u{feff}').trim().to_string();
                let saved_date = caps[2].trim().to_string();
                return Ok(ChatHeader {
                    title,
                    saved_date,
                    content_start: lines.offset(),
                });
            }
            window.clear();
        }
    }

    Err(KakaoDayError::invalid_format(format!(
        "chat header not found in {consumed} lines"
    )))
}
