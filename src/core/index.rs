//! The day catalog: which logical chat days a transcript contains.
//!
//! [`build_catalog`] makes one forward pass over the message region and
//! buckets every message line by [`day_key`]. In [`IndexMode::Offsets`] it
//! remembers where each message starts so a day can later be read back by
//! seeking; in [`IndexMode::Summary`] it only keeps counters.
//!
//! Catalog keys live in a [`BTreeMap`], so iteration order is ascending
//! calendar order no matter how the source file is ordered. Page `n` is the
//! `n`-th key.

use std::collections::BTreeMap;
use std::io::BufRead;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{KakaoDayError, Result};
use crate::parsing::{LineKind, classify_line, day_key};
use crate::source::LineReader;

/// What the index builder records per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Byte offsets of every message line, for random-access retrieval.
    #[default]
    Offsets,
    /// Message count and first instant only.
    Summary,
}

/// One day of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayEntry {
    /// Offsets of the day's message lines, in file order.
    Offsets(Vec<u64>),
    /// Aggregate counters.
    Summary {
        /// Number of message lines.
        count: usize,
        /// Timestamp of the first message line seen for the day.
        first_instant: NaiveDateTime,
    },
}

impl DayEntry {
    /// Number of message lines in this day.
    pub fn item_count(&self) -> usize {
        match self {
            DayEntry::Offsets(offsets) => offsets.len(),
            DayEntry::Summary { count, .. } => *count,
        }
    }

    /// Indexed offsets, if this entry was built in offsets mode.
    pub fn offsets(&self) -> Option<&[u64]> {
        match self {
            DayEntry::Offsets(offsets) => Some(offsets),
            DayEntry::Summary { .. } => None,
        }
    }

    /// First instant, if this entry was built in summary mode.
    pub fn first_instant(&self) -> Option<NaiveDateTime> {
        match self {
            DayEntry::Offsets(_) => None,
            DayEntry::Summary { first_instant, .. } => Some(*first_instant),
        }
    }
}

/// Every logical day of a transcript, in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayCatalog {
    days: BTreeMap<NaiveDate, DayEntry>,
}

impl DayCatalog {
    /// Number of days (and therefore pages).
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns `true` if no message line was found.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Day keys in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Looks up one day.
    pub fn get(&self, day: NaiveDate) -> Option<&DayEntry> {
        self.days.get(&day)
    }

    /// Iterates over `(day, entry)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &DayEntry)> + '_ {
        self.days.iter().map(|(day, entry)| (*day, entry))
    }

    /// Maps a 1-based page number to its day.
    ///
    /// # Errors
    ///
    /// [`KakaoDayError::NoDatesFound`] for an empty catalog,
    /// [`KakaoDayError::InvalidPage`] for a page outside `1..=len`.
    pub fn day_for_page(&self, page: i64) -> Result<(NaiveDate, &DayEntry)> {
        if self.is_empty() {
            return Err(KakaoDayError::NoDatesFound);
        }
        let index = usize::try_from(page)
            .ok()
            .and_then(|p| p.checked_sub(1))
            .ok_or_else(|| KakaoDayError::invalid_page(page, self.len()))?;

        self.days
            .iter()
            .nth(index)
            .map(|(day, entry)| (*day, entry))
            .ok_or_else(|| KakaoDayError::invalid_page(page, self.len()))
    }

    /// Returns the 1-based page of a day, if the day exists.
    pub fn page_of(&self, day: NaiveDate) -> Option<usize> {
        if !self.days.contains_key(&day) {
            return None;
        }
        Some(self.days.range(..day).count() + 1)
    }

    fn record(&mut self, day: NaiveDate, offset: u64, instant: NaiveDateTime, mode: IndexMode) {
        match mode {
            IndexMode::Offsets => {
                let entry = self
                    .days
                    .entry(day)
                    .or_insert_with(|| DayEntry::Offsets(Vec::new()));
                if let DayEntry::Offsets(offsets) = entry {
                    offsets.push(offset);
                }
            }
            IndexMode::Summary => {
                let entry = self.days.entry(day).or_insert(DayEntry::Summary {
                    count: 0,
                    first_instant: instant,
                });
                if let DayEntry::Summary { count, .. } = entry {
                    *count += 1;
                }
            }
        }
    }
}

/// Builds the catalog from a reader positioned at `content_start`.
///
/// Only message lines are recorded; every line advances the offset by its
/// encoded length whether it matched or not.
///
/// # Errors
///
/// Propagates read errors, and [`KakaoDayError::MalformedTimestamp`] for a
/// timestamp that matched the line pattern but is not a real instant.
pub fn build_catalog<R: BufRead>(
    reader: R,
    content_start: u64,
    mode: IndexMode,
) -> Result<DayCatalog> {
    let mut catalog = DayCatalog::default();
    let mut lines = LineReader::new(reader, content_start);
    let mut scanned = 0usize;

    while let Some((offset, line)) = lines.next_line()? {
        scanned += 1;
        if let LineKind::Message(instant) = classify_line(&line)? {
            catalog.record(day_key(instant), offset, instant, mode);
        }
    }

    tracing::debug!(
        lines = scanned,
        days = catalog.len(),
        ?mode,
        "built day catalog"
    );

    Ok(catalog)
}
