//! File-identifier level operations.
//!
//! [`ChatService`] is what a serving layer talks to. It resolves a file
//! identifier under the configured input directory, then runs one
//! [`ChatTranscript`] operation on it. Every call is independent: no state
//! is kept between requests, so calls may run concurrently.

use std::path::{Component, Path, PathBuf};
#[cfg(feature = "server")]
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;
use crate::core::models::{DayMeta, DayRecord};
use crate::core::transcript::ChatTranscript;
use crate::error::{KakaoDayError, Result};
use crate::source::FileSource;

/// Liveness marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Always `"ok"`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Answer of [`ChatService::get_meta`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaResponse {
    /// Metadata of the requested page.
    Page(DayRecord),
    /// Metadata of every day, when no page was requested.
    Days(Vec<DayMeta>),
}

/// Transcript operations addressed by file identifier.
#[derive(Debug, Clone, Default)]
pub struct ChatService {
    config: ServiceConfig,
}

impl ChatService {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Maps a file identifier onto a path under the input directory.
    ///
    /// # Errors
    ///
    /// [`KakaoDayError::FileNotFound`] for empty identifiers, absolute paths
    /// and anything containing `.`/`..` components. Whether the path exists
    /// is checked when the transcript is opened.
    pub fn resolve(&self, file: &str) -> Result<PathBuf> {
        let relative = Path::new(file);
        let plain = !file.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !plain {
            tracing::warn!(file, "rejected file identifier");
            return Err(KakaoDayError::file_not_found(file));
        }
        Ok(self.config.input_dir.join(relative))
    }

    /// Liveness marker; touches no file.
    pub fn health(&self) -> Health {
        Health::default()
    }

    /// Retrieves one day of `file` with its content.
    pub fn get_page(&self, file: &str, page: i64) -> Result<DayRecord> {
        self.transcript(file)?.page(page)
    }

    /// Retrieves the metadata of one page, or of every day when `page` is `None`.
    pub fn get_meta(&self, file: &str, page: Option<i64>) -> Result<MetaResponse> {
        let transcript = self.transcript(file)?;
        match page {
            Some(page) => transcript.page_meta(page).map(MetaResponse::Page),
            None => transcript.all_meta().map(MetaResponse::Days),
        }
    }

    fn transcript(&self, file: &str) -> Result<ChatTranscript<FileSource>> {
        let path = self.resolve(file)?;
        let source = FileSource::new(path).with_buffer_size(self.config.scan.buffer_size);
        Ok(ChatTranscript::with_config(source, self.config.scan).with_slugs(self.config.slugs.clone()))
    }
}

// ============================================================================
// Async wrappers
// ============================================================================

#[cfg(feature = "server")]
impl ChatService {
    /// [`get_page`](Self::get_page) on the blocking thread pool.
    pub async fn get_page_async(self: Arc<Self>, file: String, page: i64) -> Result<DayRecord> {
        blocking(move || self.get_page(&file, page)).await
    }

    /// [`get_meta`](Self::get_meta) on the blocking thread pool.
    pub async fn get_meta_async(
        self: Arc<Self>,
        file: String,
        page: Option<i64>,
    ) -> Result<MetaResponse> {
        blocking(move || self.get_meta(&file, page)).await
    }
}

#[cfg(feature = "server")]
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| KakaoDayError::Io(std::io::Error::other(e)))?
}
