//! Response records and the title slug table.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::parsing::format_day_key;

/// One rule of the [`SlugTable`]: titles containing `pattern` get `slug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugRule {
    /// Substring searched for in the chat title.
    pub pattern: String,
    /// Short identifier used in place of the title.
    pub slug: String,
}

impl SlugRule {
    pub fn new(pattern: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            slug: slug.into(),
        }
    }
}

impl FromStr for SlugRule {
    type Err = String;

    /// Parses `pattern=slug`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pattern, slug) = s
            .split_once('=')
            .ok_or_else(|| format!("Invalid slug rule '{s}'. Expected PATTERN=SLUG"))?;
        let (pattern, slug) = (pattern.trim(), slug.trim());
        if pattern.is_empty() || slug.is_empty() {
            return Err(format!("Invalid slug rule '{s}'. Pattern and slug must be non-empty"));
        }
        Ok(Self::new(pattern, slug))
    }
}

impl fmt::Display for SlugRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.pattern, self.slug)
    }
}

/// Ordered lookup table from known title substrings to short slugs.
///
/// The first matching rule wins. A title no rule matches has no slug, and
/// records built from it carry no unique id.
///
/// # Example
///
/// ```rust
/// use kakaoday::core::models::{SlugRule, SlugTable};
///
/// let table = SlugTable::new(vec![SlugRule::new("러스트 스터디", "rust-study")]);
/// assert_eq!(table.lookup("러스트 스터디 3기"), Some("rust-study"));
/// assert_eq!(table.lookup("가족"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlugTable {
    rules: Vec<SlugRule>,
}

impl SlugTable {
    pub fn new(rules: Vec<SlugRule>) -> Self {
        Self { rules }
    }

    /// Appends a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: SlugRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the slug of the first rule whose pattern occurs in `title`.
    pub fn lookup(&self, title: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| title.contains(&rule.pattern))
            .map(|rule| rule.slug.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

/// Display form of a day: the day key, plus ` HH:MM` of its first message.
pub fn display_date(day: NaiveDate, first_instant: Option<NaiveDateTime>) -> String {
    match first_instant {
        Some(instant) => format!("{} {}", format_day_key(day), instant.format("%H:%M")),
        None => format_day_key(day),
    }
}

/// Unique id of a day: `<slug>_<display date>`, when the title has a slug.
pub fn unique_id(slug: Option<&str>, display_date: &str) -> Option<String> {
    slug.map(|slug| format!("{slug}_{display_date}"))
}

/// A retrieved chat day.
///
/// `content` is `None` for metadata-only requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Chat title from the header.
    #[serde(rename = "korean_title")]
    pub title: String,
    /// `<slug>_<date>` when the title is in the slug table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    /// "Saved on" text from the header.
    #[serde(rename = "file_save_date")]
    pub saved_date: String,
    /// Display date of the day.
    pub date: String,
    /// Number of message lines.
    pub total_items: usize,
    /// 1-based page of this day.
    pub page: usize,
    /// Number of days in the transcript.
    pub total_pages: usize,
    /// Joined day lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Metadata of one day in a full listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMeta {
    /// 1-based page of this day.
    pub page: usize,
    /// Day key, e.g. `2024년 04월 30일`.
    pub day: String,
    /// Display date of the day.
    pub date: String,
    /// `<slug>_<date>` when the title is in the slug table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    /// Number of message lines.
    pub total_items: usize,
    /// Timestamp of the first message line, `YYYY-MM-DD HH:MM`.
    pub first_message_at: String,
}
