//! Day-paged access to one transcript.
//!
//! [`ChatTranscript`] ties the pieces together for a single request:
//! locate the header, build the day catalog, pick a day by page number and
//! read that day back. Nothing is cached between calls; every operation
//! re-derives its state from the source, so repeated calls on an unchanged
//! file return identical records.
//!
//! # Example
//!
//! ```rust
//! use kakaoday::core::ChatTranscript;
//! use kakaoday::source::MemorySource;
//!
//! let text = "Alice 님과 카카오톡 대화\n저장한 날짜 : 2024년 05월 01일\n\
//!             2024년 5월 1일 오전 10:00, Bob : hello\n";
//! let transcript = ChatTranscript::new(MemorySource::from_text("chat", text));
//!
//! let record = transcript.page(1).unwrap();
//! assert_eq!(record.date, "2024년 05월 01일 10:00");
//! assert_eq!(record.total_pages, 1);
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::{Retrieval, ScanConfig};
use crate::error::{KakaoDayError, Result};
use crate::parsing::{ChatHeader, DayWindow, extract_header, format_day_key};
use crate::source::TranscriptSource;

use super::index::{DayCatalog, DayEntry, IndexMode, build_catalog};
use super::materialize::{DayContent, materialize_all, materialize_indexed, materialize_scan};
use super::models::{DayMeta, DayRecord, SlugTable, display_date, unique_id};

/// A transcript plus the settings used to read it.
#[derive(Debug, Clone)]
pub struct ChatTranscript<S: TranscriptSource> {
    source: S,
    config: ScanConfig,
    slugs: SlugTable,
}

impl<S: TranscriptSource> ChatTranscript<S> {
    /// Creates a transcript reader with default settings and no slugs.
    pub fn new(source: S) -> Self {
        Self::with_config(source, ScanConfig::default())
    }

    /// Creates a transcript reader with custom scan settings.
    pub fn with_config(source: S, config: ScanConfig) -> Self {
        Self {
            source,
            config,
            slugs: SlugTable::default(),
        }
    }

    /// Sets the title slug table.
    #[must_use]
    pub fn with_slugs(mut self, slugs: SlugTable) -> Self {
        self.slugs = slugs;
        self
    }

    /// Returns the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Locates the header block.
    pub fn header(&self) -> Result<ChatHeader> {
        extract_header(self.source.open()?)
    }

    /// Builds the day catalog of the message region.
    pub fn catalog(&self, header: &ChatHeader, mode: IndexMode) -> Result<DayCatalog> {
        let reader = self.source.open_at(header.content_start)?;
        build_catalog(reader, header.content_start, mode)
    }

    /// Reads the lines of one day.
    ///
    /// Uses the entry's offsets when it has them and the configuration asks
    /// for indexed retrieval; otherwise re-scans the message region.
    pub fn day_content(
        &self,
        header: &ChatHeader,
        day: NaiveDate,
        entry: &DayEntry,
    ) -> Result<DayContent> {
        match (self.config.retrieval, entry.offsets()) {
            (Retrieval::Indexed, Some(offsets)) => materialize_indexed(self.source.open()?, offsets),
            _ => {
                let reader = self.source.open_at(header.content_start)?;
                materialize_scan(reader, header.content_start, &DayWindow::for_day(day))
            }
        }
    }

    /// All day keys in page order.
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        request(|| {
            let header = self.header()?;
            let catalog = self.non_empty_catalog(&header, IndexMode::Summary)?;
            Ok(catalog.days().collect())
        })
    }

    /// Retrieves one day with its content.
    ///
    /// # Errors
    ///
    /// [`KakaoDayError::InvalidFormat`] when the header is missing,
    /// [`KakaoDayError::NoDatesFound`] when no message line exists and
    /// [`KakaoDayError::InvalidPage`] when `page` is outside `1..=total_pages`.
    pub fn page(&self, page: i64) -> Result<DayRecord> {
        request(|| {
            let header = self.header()?;
            let mode = match self.config.retrieval {
                Retrieval::Indexed => IndexMode::Offsets,
                Retrieval::Scan => IndexMode::Summary,
            };
            let catalog = self.non_empty_catalog(&header, mode)?;
            let (day, entry) = catalog.day_for_page(page)?;
            let content = self.day_content(&header, day, entry)?;

            let date = display_date(day, content.first_instant);
            Ok(DayRecord {
                unique_id: unique_id(self.slugs.lookup(&header.title), &date),
                title: header.title,
                saved_date: header.saved_date,
                date,
                total_items: content.item_count,
                page: page_number(page),
                total_pages: catalog.len(),
                content: Some(content.joined()),
            })
        })
    }

    /// Retrieves one day's metadata without reading its content.
    pub fn page_meta(&self, page: i64) -> Result<DayRecord> {
        request(|| {
            let header = self.header()?;
            let catalog = self.non_empty_catalog(&header, IndexMode::Summary)?;
            let (day, entry) = catalog.day_for_page(page)?;

            let date = display_date(day, entry.first_instant());
            Ok(DayRecord {
                unique_id: unique_id(self.slugs.lookup(&header.title), &date),
                title: header.title,
                saved_date: header.saved_date,
                date,
                total_items: entry.item_count(),
                page: page_number(page),
                total_pages: catalog.len(),
                content: None,
            })
        })
    }

    /// Lists the metadata of every day.
    pub fn all_meta(&self) -> Result<Vec<DayMeta>> {
        request(|| {
            let header = self.header()?;
            let catalog = self.non_empty_catalog(&header, IndexMode::Summary)?;
            let slug = self.slugs.lookup(&header.title);

            Ok(catalog
                .iter()
                .enumerate()
                .map(|(i, (day, entry))| {
                    let first = entry.first_instant();
                    let date = display_date(day, first);
                    DayMeta {
                        page: i + 1,
                        day: format_day_key(day),
                        unique_id: unique_id(slug, &date),
                        date,
                        total_items: entry.item_count(),
                        first_message_at: first
                            .map(|instant| instant.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default(),
                    }
                })
                .collect())
        })
    }

    /// Buckets every day of the transcript in one pass.
    ///
    /// A transcript without the header block is read from byte 0, so bare
    /// message dumps can still be split.
    pub fn all_days(&self) -> Result<BTreeMap<NaiveDate, DayContent>> {
        request(|| {
            let start = match self.header() {
                Ok(header) => header.content_start,
                Err(KakaoDayError::InvalidFormat { .. }) => 0,
                Err(e) => return Err(e),
            };
            let days = materialize_all(self.source.open_at(start)?, start)?;
            if days.is_empty() {
                return Err(KakaoDayError::NoDatesFound);
            }
            Ok(days)
        })
    }

    fn non_empty_catalog(&self, header: &ChatHeader, mode: IndexMode) -> Result<DayCatalog> {
        let catalog = self.catalog(header, mode)?;
        if catalog.is_empty() {
            return Err(KakaoDayError::NoDatesFound);
        }
        Ok(catalog)
    }
}

/// Runs one request, folding parser-internal errors into request errors.
fn request<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    f().map_err(KakaoDayError::into_request_error)
}

/// A page already validated by [`DayCatalog::day_for_page`] is positive.
fn page_number(page: i64) -> usize {
    usize::try_from(page).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::SlugRule;
    use crate::source::MemorySource;

    const HEADER: &str = "Alice 님과 카카오톡 대화\n저장한 날짜 : 2024년 05월 01일\n";

    fn transcript(body: &str) -> ChatTranscript<MemorySource> {
        ChatTranscript::new(MemorySource::from_text("test", &format!("{HEADER}{body}")))
    }

    #[test]
    fn test_two_days_around_four_am() {
        let chat = transcript(
            "2024년 05월 01일 오전 3:30 Bob: hi\n2024년 05월 01일 오전 10:00 Bob: hello\n",
        );

        let dates = chat.dates().unwrap();
        assert_eq!(dates.len(), 2);
        assert_eq!(format_day_key(dates[0]), "2024년 04월 30일");

        let first = chat.page(1).unwrap();
        assert_eq!(first.title, "Alice");
        assert_eq!(first.saved_date, "2024년 05월 01일");
        assert_eq!(first.date, "2024년 04월 30일 03:30");
        assert_eq!(first.total_items, 1);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.content.as_deref(), Some("2024년 05월 01일 오전 3:30 Bob: hi"));

        let second = chat.page(2).unwrap();
        assert_eq!(second.date, "2024년 05월 01일 10:00");
        assert_eq!(second.page, 2);
    }

    #[test]
    fn test_page_meta_matches_page() {
        let chat = transcript(
            "2024년 5월 1일 오후 1:00, A : one\nmore\n2024년 5월 1일 오후 2:00, B : two\n",
        );
        let full = chat.page(1).unwrap();
        let meta = chat.page_meta(1).unwrap();
        assert_eq!(meta.content, None);
        assert_eq!(meta.date, full.date);
        assert_eq!(meta.total_items, full.total_items);
        assert_eq!(meta.total_pages, full.total_pages);
    }

    #[test]
    fn test_scan_retrieval_matches_indexed() {
        let text = format!(
            "{HEADER}2024년 5월 1일 오후 1:00, A : one\nmore\n2024년 5월 2일 오전 2:00, B : two\n"
        );
        let indexed = ChatTranscript::new(MemorySource::from_text("t", &text));
        let scanned = ChatTranscript::with_config(
            MemorySource::from_text("t", &text),
            ScanConfig::new().with_retrieval(Retrieval::Scan),
        );
        assert_eq!(indexed.page(1).unwrap(), scanned.page(1).unwrap());
    }

    #[test]
    fn test_error_taxonomy() {
        let no_header =
            ChatTranscript::new(MemorySource::from_text("t", "2024년 5월 1일 오후 1:00, A : x\n"));
        assert!(no_header.page(1).unwrap_err().is_invalid_format());

        let notices_only = transcript("철수님이 들어왔습니다.\n영희님이 나갔습니다.\n");
        assert!(notices_only.page(1).unwrap_err().is_no_dates());
        assert!(notices_only.all_meta().unwrap_err().is_no_dates());

        let chat = transcript("2024년 5월 1일 오후 1:00, A : x\n");
        assert!(chat.page(0).unwrap_err().is_invalid_page());
        assert!(chat.page(2).unwrap_err().is_invalid_page());
        assert!(chat.page_meta(2).unwrap_err().is_invalid_page());
    }

    #[test]
    fn test_malformed_timestamp_reported_as_invalid_format() {
        let chat = transcript("2024년 2월 31일 오후 1:00, A : x\n");
        assert!(chat.page(1).unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_unique_id_from_slug_table() {
        let chat = ChatTranscript::new(MemorySource::from_text(
            "t",
            "러스트 스터디 님과 카카오톡 대화\n저장한 날짜 : 2024년 05월 01일\n\
             2024년 5월 1일 오후 1:00, A : x\n",
        ))
        .with_slugs(SlugTable::default().with_rule(SlugRule::new("러스트", "rust")));

        let record = chat.page(1).unwrap();
        assert_eq!(record.unique_id.as_deref(), Some("rust_2024년 05월 01일 13:00"));

        let meta = chat.all_meta().unwrap();
        assert_eq!(meta[0].unique_id, record.unique_id);
    }

    #[test]
    fn test_all_days_without_header() {
        let chat = ChatTranscript::new(MemorySource::from_text(
            "t",
            "2024년 5월 1일 오후 1:00, A : x\nmore\n2024년 5월 2일 오전 1:00, A : y\n",
        ));
        let days = chat.all_days().unwrap();
        assert_eq!(days.len(), 1);
        let content = days.values().next().unwrap();
        assert_eq!(content.item_count, 2);
        assert_eq!(content.lines.len(), 3);
    }

    #[test]
    fn test_all_meta_listing() {
        let chat = transcript(
            "2024년 5월 2일 오후 1:00, A : x\n2024년 5월 1일 오후 1:00, A : y\n2024년 5월 1일 오후 3:00, A : z\n",
        );
        let meta = chat.all_meta().unwrap();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta[0].page, 1);
        assert_eq!(meta[0].day, "2024년 05월 01일");
        assert_eq!(meta[0].total_items, 2);
        assert_eq!(meta[0].first_message_at, "2024-05-01 13:00");
        assert_eq!(meta[1].day, "2024년 05월 02일");
    }
}
