//! Output writers.
//!
//! - [`split_by_day`] / [`write_day_files`] - one text file per logical day
//! - [`write_csv`] / [`to_csv`] - day metadata as CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - records and metadata as JSON - requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> kakaoday::Result<()> {
//! use kakaoday::core::output::split_by_day;
//!
//! // Writes out/KakaoTalk_20240430.txt, out/KakaoTalk_20240501.txt, ...
//! let written = split_by_day("KakaoTalk.txt", "out")?;
//! println!("{} days", written.len());
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod day_files;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
pub use day_files::{split_by_day, write_day_files};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
