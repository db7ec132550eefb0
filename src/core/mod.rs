//! Day indexing and retrieval.
//!
//! This module contains:
//! - [`index`] - the day catalog built in one pass over the message region
//! - [`materialize`] - reading back the lines of one day
//! - [`models`] - response records and the title slug table
//! - [`transcript`] - the page-oriented façade over one transcript
//! - [`output`] - day files and metadata export (CSV, JSON)
//!
//! # Quick Start
//!
//! ```rust
//! use kakaoday::core::{ChatTranscript, IndexMode};
//! use kakaoday::source::MemorySource;
//!
//! let text = "Alice 님과 카카오톡 대화\n저장한 날짜 : 2024년 05월 01일\n\
//!             2024년 5월 1일 오후 9:00, Bob : hi\n";
//! let transcript = ChatTranscript::new(MemorySource::from_text("chat", text));
//! let header = transcript.header().unwrap();
//! let catalog = transcript.catalog(&header, IndexMode::Summary).unwrap();
//! assert_eq!(catalog.len(), 1);
//! ```

pub mod index;
pub mod materialize;
pub mod models;
pub mod output;
pub mod transcript;

pub use index::{DayCatalog, DayEntry, IndexMode, build_catalog};
pub use materialize::{DayContent, materialize_all, materialize_indexed, materialize_scan};
pub use models::{DayMeta, DayRecord, SlugRule, SlugTable};
pub use transcript::ChatTranscript;

pub use output::{split_by_day, write_day_files};
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, write_json};
