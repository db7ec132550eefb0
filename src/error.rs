//! Unified error types for kakaoday.
//!
//! This module provides a single [`KakaoDayError`] enum that covers every
//! failure the library can report. The four request-level outcomes of the
//! serving contract (`FileNotFound`, `InvalidFormat`, `NoDatesFound`,
//! `InvalidPage`) are first-class variants so callers can match on them.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Serving layers** get a [`status_hint`](KakaoDayError::status_hint) to map onto transport codes
//! - **Nothing is partial**: an operation returns a full record or one of these errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for kakaoday operations.
///
/// # Example
///
/// ```rust
/// use kakaoday::error::Result;
///
/// fn my_function() -> Result<Vec<String>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, KakaoDayError>;

/// The error type for all kakaoday operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KakaoDayError {
    /// The resolved transcript path is missing, unreadable, or not a regular file.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// The path (or identifier) that could not be opened
        path: PathBuf,
    },

    /// The transcript does not look like a KakaoTalk export.
    ///
    /// Raised when the header block never matched, and when a timestamp that
    /// passed the line pattern still failed to resolve to a calendar instant.
    #[error("Invalid chat format: {message}")]
    InvalidFormat {
        /// Description of what's wrong
        message: String,
    },

    /// The message region contained no timestamped message lines.
    #[error("No dates found in content")]
    NoDatesFound,

    /// The requested page lies outside `[1, total_pages]`.
    #[error("Invalid page number {page} (valid range: 1..={total_pages})")]
    InvalidPage {
        /// The page that was requested
        page: i64,
        /// Number of chat days in the transcript
        total_pages: usize,
    },

    /// A timestamp token group matched the line pattern but is not a valid instant.
    ///
    /// Internal to the parsing layer; the façade reports it as [`InvalidFormat`](Self::InvalidFormat).
    #[error("Malformed timestamp '{input}'")]
    MalformedTimestamp {
        /// The offending token group
        input: String,
    },

    /// An I/O error occurred while reading the transcript or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl KakaoDayError {
    /// Creates a file-not-found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        KakaoDayError::FileNotFound { path: path.into() }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        KakaoDayError::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an invalid page error.
    pub fn invalid_page(page: i64, total_pages: usize) -> Self {
        KakaoDayError::InvalidPage { page, total_pages }
    }

    /// Creates a malformed timestamp error.
    pub fn malformed_timestamp(input: impl Into<String>) -> Self {
        KakaoDayError::MalformedTimestamp {
            input: input.into(),
        }
    }

    /// Folds parser-internal failures into the request-level taxonomy.
    ///
    /// A [`MalformedTimestamp`](Self::MalformedTimestamp) never leaves the
    /// façade as itself; it is reported as an invalid chat format.
    #[must_use]
    pub fn into_request_error(self) -> Self {
        match self {
            KakaoDayError::MalformedTimestamp { input } => {
                KakaoDayError::invalid_format(format!("malformed timestamp '{input}'"))
            }
            other => other,
        }
    }

    /// Returns the HTTP status code a serving layer should use for this error.
    pub fn status_hint(&self) -> u16 {
        match self {
            KakaoDayError::FileNotFound { .. } => 404,
            KakaoDayError::InvalidFormat { .. }
            | KakaoDayError::NoDatesFound
            | KakaoDayError::MalformedTimestamp { .. } => 422,
            KakaoDayError::InvalidPage { .. } => 400,
            _ => 500,
        }
    }

    /// Returns `true` if this is a file-not-found error.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, KakaoDayError::FileNotFound { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, KakaoDayError::InvalidFormat { .. })
    }

    /// Returns `true` if the transcript held no dates.
    pub fn is_no_dates(&self) -> bool {
        matches!(self, KakaoDayError::NoDatesFound)
    }

    /// Returns `true` if this is an invalid page error.
    pub fn is_invalid_page(&self) -> bool {
        matches!(self, KakaoDayError::InvalidPage { .. })
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, KakaoDayError::Io(_))
    }
}
