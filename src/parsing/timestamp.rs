//! KakaoTalk timestamp parsing and the 4 AM day boundary.
//!
//! KakaoTalk exports stamp every message with a Korean 12-hour clock:
//! `2024년 5월 1일 오후 1:05`. This module resolves that token group into a
//! canonical [`NaiveDateTime`] and assigns it to a logical chat day.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{KakaoDayError, Result};

/// Hour at which a new logical chat day starts.
pub const DAY_START_HOUR: u32 = 4;

/// Display format of a day key, e.g. `2024년 05월 01일`.
pub const DAY_KEY_FORMAT: &str = "%Y년 %m월 %d일";

/// Date, meridiem marker, hour and minute of a message line.
pub(crate) static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4}년 [0-9]{1,2}월 [0-9]{1,2}일) (오[전후]) ([0-9]{1,2}):([0-9]{1,2})")
        .expect("timestamp pattern is a valid regex")
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9]{4})년\s*([0-9]{1,2})월\s*([0-9]{1,2})일\s*$")
        .expect("date pattern is a valid regex")
});

/// The am/pm marker of the Korean 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meridiem {
    /// `오전`
    Am,
    /// `오후`
    Pm,
}

impl Meridiem {
    /// Resolves a 12-hour clock value to a 24-hour one.
    ///
    /// `12` maps to `0` in the morning and stays `12` in the afternoon; every
    /// other afternoon hour gains twelve.
    pub fn to_24h(self, hour: u32) -> u32 {
        match (self, hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, h) => h + 12,
        }
    }
}

impl FromStr for Meridiem {
    type Err = KakaoDayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "오전" => Ok(Meridiem::Am),
            "오후" => Ok(Meridiem::Pm),
            _ => Err(KakaoDayError::malformed_timestamp(s)),
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => write!(f, "오전"),
            Meridiem::Pm => write!(f, "오후"),
        }
    }
}

/// Parses a `YYYY년 M월 D일` calendar date.
///
/// Month and day may be written with or without a leading zero.
pub fn parse_date(date_text: &str) -> Result<NaiveDate> {
    let caps = DATE_RE
        .captures(date_text)
        .ok_or_else(|| KakaoDayError::malformed_timestamp(date_text))?;

    let number = |i: usize| -> Result<u32> {
        caps[i]
            .parse()
            .map_err(|_| KakaoDayError::malformed_timestamp(date_text))
    };

    let year: i32 = caps[1]
        .parse()
        .map_err(|_| KakaoDayError::malformed_timestamp(date_text))?;

    NaiveDate::from_ymd_opt(year, number(2)?, number(3)?)
        .ok_or_else(|| KakaoDayError::malformed_timestamp(date_text))
}

/// Resolves a date, meridiem marker, hour and minute into a canonical instant.
///
/// # Errors
///
/// Returns [`KakaoDayError::MalformedTimestamp`] when the date is not a real
/// calendar date, the marker is neither `오전` nor `오후`, or the hour/minute
/// tokens do not form a valid time of day.
///
/// # Example
///
/// ```rust
/// use kakaoday::parsing::parse_instant;
///
/// let instant = parse_instant("2024년 5월 1일", "오후", "1", "05").unwrap();
/// assert_eq!(instant.format("%Y-%m-%d %H:%M").to_string(), "2024-05-01 13:05");
/// ```
pub fn parse_instant(
    date_text: &str,
    marker: &str,
    hour_text: &str,
    minute_text: &str,
) -> Result<NaiveDateTime> {
    let malformed =
        || KakaoDayError::malformed_timestamp(format!("{date_text} {marker} {hour_text}:{minute_text}"));

    let date = parse_date(date_text).map_err(|_| malformed())?;
    let meridiem: Meridiem = marker.parse().map_err(|_| malformed())?;
    let hour: u32 = hour_text.trim().parse().map_err(|_| malformed())?;
    let minute: u32 = minute_text.trim().parse().map_err(|_| malformed())?;

    let time = NaiveTime::from_hms_opt(meridiem.to_24h(hour), minute, 0).ok_or_else(malformed)?;
    Ok(date.and_time(time))
}

/// Finds and resolves the first timestamp in a line.
///
/// Returns `Ok(None)` when the line carries no timestamp token group.
pub fn find_instant(line: &str) -> Result<Option<NaiveDateTime>> {
    let Some(caps) = TIMESTAMP_RE.captures(line) else {
        return Ok(None);
    };
    parse_instant(&caps[1], &caps[2], &caps[3], &caps[4]).map(Some)
}

/// Maps an instant to the logical chat day it belongs to.
///
/// Anything before 04:00 still belongs to the previous calendar day.
pub fn day_key(instant: NaiveDateTime) -> NaiveDate {
    if instant.hour() < DAY_START_HOUR {
        instant.date() - Duration::days(1)
    } else {
        instant.date()
    }
}

/// Formats a day key the way KakaoTalk writes dates, zero-padded.
pub fn format_day_key(day: NaiveDate) -> String {
    day.format(DAY_KEY_FORMAT).to_string()
}

/// The inclusive time window of one logical chat day.
///
/// Spans `day 04:00` through `day+1 03:59`. Timestamps have minute
/// resolution, so every instant lands in exactly one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    /// The logical day this window covers.
    pub day: NaiveDate,
    /// First instant of the day (inclusive).
    pub start: NaiveDateTime,
    /// Last instant of the day (inclusive).
    pub end: NaiveDateTime,
}

impl DayWindow {
    /// Builds the window for a logical day.
    pub fn for_day(day: NaiveDate) -> Self {
        let start = day.and_time(NaiveTime::default()) + Duration::hours(i64::from(DAY_START_HOUR));
        let end = start + Duration::days(1) - Duration::minutes(1);
        Self { day, start, end }
    }

    /// Returns `true` if the instant falls inside the window.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_midnight_and_noon() {
        let am12 = parse_instant("2024년 05월 01일", "오전", "12", "00").unwrap();
        assert_eq!(am12, at(2024, 5, 1, 0, 0));

        let pm12 = parse_instant("2024년 05월 01일", "오후", "12", "30").unwrap();
        assert_eq!(pm12, at(2024, 5, 1, 12, 30));
    }

    #[test]
    fn test_regular_hours() {
        let morning = parse_instant("2024년 05월 01일", "오전", "4", "15").unwrap();
        assert_eq!(morning, at(2024, 5, 1, 4, 15));

        let afternoon = parse_instant("2024년 05월 01일", "오후", "1", "05").unwrap();
        assert_eq!(afternoon, at(2024, 5, 1, 13, 5));
    }

    #[test]
    fn test_unpadded_date() {
        let instant = parse_instant("2024년 5월 1일", "오후", "11", "59").unwrap();
        assert_eq!(instant, at(2024, 5, 1, 23, 59));
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(parse_instant("2024년 13월 40일", "오전", "3", "30").is_err());
        assert!(parse_instant("2024년 02월 30일", "오전", "3", "30").is_err());
        assert!(parse_instant("2024년 05월 01일", "오후", "25", "00").is_err());
        assert!(parse_instant("2024년 05월 01일", "오전", "3", "60").is_err());
        assert!(parse_instant("2024년 05월 01일", "새벽", "3", "00").is_err());
        assert!(parse_instant("2024-05-01", "오전", "3", "00").is_err());

        let err = parse_instant("2024년 05월 01일", "오전", "x", "00").unwrap_err();
        assert!(matches!(err, KakaoDayError::MalformedTimestamp { .. }));
    }

    #[test]
    fn test_day_key_boundary() {
        let before = at(2024, 5, 1, 3, 59);
        assert_eq!(day_key(before), NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());

        let after = at(2024, 5, 1, 4, 0);
        assert_eq!(day_key(after), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_day_key_crosses_year() {
        let new_year = at(2025, 1, 1, 0, 30);
        assert_eq!(day_key(new_year), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_format_day_key_zero_pads() {
        let day = NaiveDate::from_ymd_opt(2024, 4, 3).unwrap();
        assert_eq!(format_day_key(day), "2024년 04월 03일");
    }

    #[test]
    fn test_find_instant() {
        let line = "2024년 5월 1일 오후 1:05, Bob : hi";
        assert_eq!(find_instant(line).unwrap(), Some(at(2024, 5, 1, 13, 5)));
        assert_eq!(find_instant("just a continuation").unwrap(), None);
        assert_eq!(find_instant("2024년 5월 1일 수요일").unwrap(), None);
    }

    #[test]
    fn test_non_ascii_digits_are_not_timestamps() {
        // Full-width and Arabic-Indic digits are Unicode decimals but not ASCII.
        assert_eq!(find_instant("２０２４년 ５월 １일 오후 １:０５, Bob : hi").unwrap(), None);
        assert_eq!(find_instant("2024년 5월 1일 오후 ١:٠٥, Bob : hi").unwrap(), None);
        assert!(parse_date("２０２４년 5월 1일").is_err());
    }

    #[test]
    fn test_window_agrees_with_day_key() {
        let day = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
        let window = DayWindow::for_day(day);

        assert_eq!(window.start, at(2024, 4, 30, 4, 0));
        assert_eq!(window.end, at(2024, 5, 1, 3, 59));

        for instant in [
            at(2024, 4, 30, 3, 59),
            at(2024, 4, 30, 4, 0),
            at(2024, 4, 30, 23, 59),
            at(2024, 5, 1, 0, 0),
            at(2024, 5, 1, 3, 59),
            at(2024, 5, 1, 4, 0),
        ] {
            assert_eq!(window.contains(instant), day_key(instant) == day, "{instant}");
        }
    }

    #[test]
    fn test_meridiem_display_roundtrip() {
        assert_eq!("오전".parse::<Meridiem>().unwrap().to_string(), "오전");
        assert_eq!("오후".parse::<Meridiem>().unwrap(), Meridiem::Pm);
    }
}
