//! Configuration types for scanning, the service and the HTTP server.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ScanConfig`] - how a transcript is read
//! - [`ServiceConfig`] - where transcripts live and how titles map to slugs
//! - [`ServerConfig`] - the HTTP bind address
//!
//! # Example
//!
//! ```rust
//! use kakaoday::config::{Retrieval, ScanConfig, ServiceConfig};
//!
//! let scan = ScanConfig::new()
//!     .with_buffer_size(128 * 1024)
//!     .with_retrieval(Retrieval::Scan);
//!
//! let config = ServiceConfig::new("./input").with_scan(scan);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::models::{SlugRule, SlugTable};
use crate::source::DEFAULT_BUFFER_SIZE;

/// How the lines of a requested day are read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Retrieval {
    /// Index message offsets, then seek to them.
    #[default]
    Indexed,
    /// Re-scan the whole message region with the day's time window.
    Scan,
}

/// Settings for reading one transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Read buffer size (default: 64KB)
    pub buffer_size: usize,

    /// Day retrieval strategy (default: indexed)
    pub retrieval: Retrieval,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            retrieval: Retrieval::default(),
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    #[must_use]
    pub fn with_retrieval(mut self, retrieval: Retrieval) -> Self {
        self.retrieval = retrieval;
        self
    }
}

/// Settings for [`ChatService`](crate::service::ChatService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Directory file identifiers are resolved under (default: `./input`)
    pub input_dir: PathBuf,

    /// Title substring to slug rules
    #[serde(default)]
    pub slugs: SlugTable,

    /// Per-transcript scan settings
    #[serde(default)]
    pub scan: ScanConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new("./input")
    }
}

impl ServiceConfig {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            slugs: SlugTable::default(),
            scan: ScanConfig::default(),
        }
    }

    #[must_use]
    pub fn with_slugs(mut self, slugs: SlugTable) -> Self {
        self.slugs = slugs;
        self
    }

    #[must_use]
    pub fn with_slug(mut self, rule: SlugRule) -> Self {
        self.slugs = self.slugs.with_rule(rule);
        self
    }

    #[must_use]
    pub fn with_scan(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }
}

/// Settings for the HTTP serving layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (default: `127.0.0.1:8000`)
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }
}
