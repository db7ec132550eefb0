//! # kakaoday
//!
//! A Rust library for reading KakaoTalk chat exports one day at a time.
//!
//! ## Overview
//!
//! A KakaoTalk PC export is one long text file: a header naming the chat and
//! the date it was saved, followed by message lines such as
//!
//! ```text
//! 2024년 5월 1일 오후 11:42, 철수 : 내일 봐요
//! ```
//!
//! kakaoday splits the message region into **chat days**. A chat day runs
//! from 04:00 to 03:59 the next morning, so a late-night conversation stays
//! on the day it started. Days are numbered in calendar order and served as
//! pages: page 1 is the earliest day.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kakaoday::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let transcript = ChatTranscript::new(FileSource::new("KakaoTalk_Chat.txt"));
//!
//!     let record = transcript.page(1)?;
//!     println!("{} ({} of {})", record.date, record.page, record.total_pages);
//!     println!("{}", record.content.unwrap_or_default());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - timestamps, the 4 AM day boundary, the header and line classification
//! - [`source`] - [`TranscriptSource`](source::TranscriptSource) and byte-offset line reading
//! - [`core`] - day catalog, day materialization, the [`ChatTranscript`](core::ChatTranscript) façade and output writers
//! - [`service`] - [`ChatService`](service::ChatService): operations addressed by file identifier
//! - [`server`] - axum HTTP layer (feature `server`)
//! - [`config`] - configuration types
//! - [`cli`] - CLI types (feature `cli`)
//! - [`error`] - unified error types ([`KakaoDayError`], [`Result`])
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod parsing;
#[cfg(feature = "server")]
pub mod server;
pub mod service;
pub mod source;

// Re-export the main types at the crate root for convenience
pub use error::{KakaoDayError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use kakaoday::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{KakaoDayError, Result};

    // Configuration
    pub use crate::config::{Retrieval, ScanConfig, ServerConfig, ServiceConfig};

    // Sources
    pub use crate::source::{FileSource, MemorySource, TranscriptSource};

    // Façade and records
    pub use crate::core::{ChatTranscript, DayMeta, DayRecord, IndexMode, SlugRule, SlugTable};

    // Service
    pub use crate::service::{ChatService, Health, MetaResponse};

    // Output
    pub use crate::core::output::{split_by_day, write_day_files};
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, write_json};
}
