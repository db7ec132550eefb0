//! Shared parsing utilities for KakaoTalk transcripts.
//!
//! This module contains the pieces every scan is built from:
//! - [`timestamp`] - Korean 12-hour timestamps and the 4 AM day boundary
//! - [`header`] - the two-line export header and the content start offset
//! - [`line`] - line classification and the system-notice exclusion filter

pub mod header;
pub mod line;
pub mod timestamp;

// Re-export commonly used items
pub use header::{ChatHeader, extract_header};
pub use line::{EXCLUDED_PATTERNS, LineKind, classify_line, is_excluded};
pub use timestamp::{
    DAY_KEY_FORMAT, DAY_START_HOUR, DayWindow, Meridiem, day_key, find_instant, format_day_key,
    parse_date, parse_instant,
};
