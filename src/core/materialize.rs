//! Reading back the lines of one logical chat day.
//!
//! Two strategies produce the same [`DayContent`]:
//! - [`materialize_scan`] re-reads the whole message region and keeps lines
//!   whose timestamp falls in the day's [`DayWindow`]
//! - [`materialize_indexed`] seeks straight to the offsets recorded by
//!   [`build_catalog`](super::index::build_catalog)
//!
//! Lines without a timestamp are carried forward: they belong to the day of
//! the closest message line above them. Blank lines, day separators and
//! system notices never appear in content and do not end a message.

use std::collections::BTreeMap;
use std::io::{BufRead, Seek, SeekFrom};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{KakaoDayError, Result};
use crate::parsing::{DayWindow, LineKind, classify_line, day_key};
use crate::source::LineReader;

/// The lines of one logical day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayContent {
    /// Trimmed lines in file order.
    pub lines: Vec<String>,
    /// Number of message lines (continuation lines are not counted).
    pub item_count: usize,
    /// Timestamp of the first message line kept.
    pub first_instant: Option<NaiveDateTime>,
}

impl DayContent {
    /// All lines joined with `\n`.
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }

    fn push_message(&mut self, instant: NaiveDateTime, line: &str) {
        self.item_count += 1;
        self.first_instant.get_or_insert(instant);
        self.lines.push(line.trim().to_string());
    }

    fn push_continuation(&mut self, line: &str) {
        self.lines.push(line.trim().to_string());
    }
}

/// Scans forward from `content_start` and collects the lines of `window`.
///
/// The scan runs to end of stream; days are not assumed to be contiguous.
pub fn materialize_scan<R: BufRead>(
    reader: R,
    content_start: u64,
    window: &DayWindow,
) -> Result<DayContent> {
    let mut content = DayContent::default();
    let mut lines = LineReader::new(reader, content_start);
    let mut in_window = false;

    while let Some((_, line)) = lines.next_line()? {
        match classify_line(&line)? {
            LineKind::Message(instant) => {
                in_window = window.contains(instant);
                if in_window {
                    content.push_message(instant, &line);
                }
            }
            LineKind::Continuation if in_window => content.push_continuation(&line),
            _ => {}
        }
    }

    tracing::debug!(
        day = %window.day,
        items = content.item_count,
        lines = content.lines.len(),
        "materialized day by scan"
    );

    Ok(content)
}

/// Reads the messages starting at `offsets`, plus their continuation lines.
///
/// Adjacent messages are read sequentially; the reader only seeks when the
/// next offset is not the line that ended the previous message.
///
/// # Errors
///
/// Returns [`KakaoDayError::InvalidFormat`] if an offset no longer points at
/// a message line (the file changed after it was indexed).
pub fn materialize_indexed<R: BufRead + Seek>(reader: R, offsets: &[u64]) -> Result<DayContent> {
    let mut content = DayContent::default();
    let mut lines = LineReader::new(reader, 0);
    let mut lookahead: Option<(u64, String)> = None;

    for &offset in offsets {
        let first = match lookahead.take() {
            Some((at, line)) if at == offset => line,
            _ => {
                let mut inner = lines.into_inner();
                inner.seek(SeekFrom::Start(offset))?;
                lines = LineReader::new(inner, offset);
                lines
                    .next_line()?
                    .map(|(_, line)| line)
                    .ok_or_else(|| stale_index(offset))?
            }
        };

        let LineKind::Message(instant) = classify_line(&first)? else {
            return Err(stale_index(offset));
        };
        content.push_message(instant, &first);

        while let Some((at, line)) = lines.next_line()? {
            match classify_line(&line)? {
                LineKind::Message(_) => {
                    lookahead = Some((at, line));
                    break;
                }
                LineKind::Continuation => content.push_continuation(&line),
                _ => {}
            }
        }
    }

    tracing::debug!(
        offsets = offsets.len(),
        lines = content.lines.len(),
        "materialized day from index"
    );

    Ok(content)
}

/// Buckets the whole message region into days in a single pass.
///
/// Same carry-forward rules as [`materialize_scan`], for every day at once.
pub fn materialize_all<R: BufRead>(
    reader: R,
    content_start: u64,
) -> Result<BTreeMap<NaiveDate, DayContent>> {
    let mut days: BTreeMap<NaiveDate, DayContent> = BTreeMap::new();
    let mut lines = LineReader::new(reader, content_start);
    let mut current: Option<NaiveDate> = None;

    while let Some((_, line)) = lines.next_line()? {
        match classify_line(&line)? {
            LineKind::Message(instant) => {
                let day = day_key(instant);
                current = Some(day);
                days.entry(day).or_default().push_message(instant, &line);
            }
            LineKind::Continuation => {
                if let Some(content) = current.and_then(|day| days.get_mut(&day)) {
                    content.push_continuation(&line);
                }
            }
            _ => {}
        }
    }

    Ok(days)
}

fn stale_index(offset: u64) -> KakaoDayError {
    KakaoDayError::invalid_format(format!("no message line at indexed offset {offset}"))
}
