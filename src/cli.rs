//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Command`] - the subcommands
//! - [`MetaFormat`] - output format of `meta`
//! - [`RetrievalArg`] - day retrieval strategy
//!
//! ```rust
//! use clap::Parser;
//! use kakaoday::cli::{Args, Command};
//!
//! let args = Args::parse_from(["kakaoday", "page", "chat.txt", "--page", "2"]);
//! assert!(matches!(args.command, Command::Page { page: 2, .. }));
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{Retrieval, ScanConfig, ServiceConfig};
use crate::core::models::{SlugRule, SlugTable};

/// Read KakaoTalk chat exports one 4 AM-bounded day at a time.
#[derive(Parser, Debug, Clone)]
#[command(name = "kakaoday")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    kakaoday serve --input-dir ./input --slug '러스트 스터디=rust-study'
    kakaoday dates KakaoTalk_Chat.txt
    kakaoday page KakaoTalk_Chat.txt --page 3
    kakaoday meta KakaoTalk_Chat.txt --format csv -o days.csv
    kakaoday split KakaoTalk_Chat.txt -o days/")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve transcripts in a directory over HTTP
    Serve {
        /// Directory holding transcript files
        #[arg(short, long, default_value = "./input")]
        input_dir: PathBuf,

        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8000")]
        bind: String,

        #[command(flatten)]
        options: TranscriptOptions,
    },

    /// List the chat days of a transcript
    Dates {
        /// Path to the transcript
        input: PathBuf,
    },

    /// Print one day with its content as JSON
    Page {
        /// Path to the transcript
        input: PathBuf,

        /// 1-based day number
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,

        #[command(flatten)]
        options: TranscriptOptions,
    },

    /// Print day metadata (one page, or every day)
    Meta {
        /// Path to the transcript
        input: PathBuf,

        /// 1-based day number; every day when omitted
        #[arg(short, long, allow_negative_numbers = true)]
        page: Option<i64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: MetaFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: TranscriptOptions,
    },

    /// Write one text file per chat day
    Split {
        /// Path to the transcript
        input: PathBuf,

        /// Directory to write day files into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}

/// Options shared by the commands that build records.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TranscriptOptions {
    /// Title slug rule PATTERN=SLUG (repeatable, first match wins)
    #[arg(long = "slug", value_name = "PATTERN=SLUG")]
    pub slugs: Vec<SlugRule>,

    /// How a day's lines are read back
    #[arg(long, value_enum, default_value = "indexed")]
    pub retrieval: RetrievalArg,
}

impl TranscriptOptions {
    /// The slug table built from `--slug` rules.
    pub fn slug_table(&self) -> SlugTable {
        SlugTable::new(self.slugs.clone())
    }

    /// Scan settings for these options.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::new().with_retrieval(self.retrieval.into())
    }

    /// Service settings rooted at `input_dir`.
    pub fn service_config(&self, input_dir: PathBuf) -> ServiceConfig {
        ServiceConfig::new(input_dir)
            .with_slugs(self.slug_table())
            .with_scan(self.scan_config())
    }
}

/// Output format of the `meta` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaFormat {
    /// Pretty-printed JSON (default)
    #[default]
    Json,

    /// CSV with semicolon delimiter (day listings only)
    Csv,
}

impl MetaFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            MetaFormat::Json => "json",
            MetaFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for MetaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetaFormat::Json => write!(f, "JSON"),
            MetaFormat::Csv => write!(f, "CSV"),
        }
    }
}

/// Day retrieval strategy as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum RetrievalArg {
    /// Seek to indexed message offsets
    #[default]
    Indexed,
    /// Re-scan the message region
    Scan,
}

impl From<RetrievalArg> for Retrieval {
    fn from(arg: RetrievalArg) -> Retrieval {
        match arg {
            RetrievalArg::Indexed => Retrieval::Indexed,
            RetrievalArg::Scan => Retrieval::Scan,
        }
    }
}
