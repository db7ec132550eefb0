//! Byte-stream access to transcripts.
//!
//! A [`TranscriptSource`] hands out readers positioned at a byte offset.
//! Each reader owns its handle and releases it on drop, so every exit path
//! of a scan (success, error, early return) closes the underlying file.
//!
//! [`LineReader`] walks a reader line by line and reports the byte offset of
//! every line. Offsets are counted in encoded bytes, never characters, so
//! they can be fed straight back into [`TranscriptSource::open_at`].

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{KakaoDayError, Result};

/// Default read buffer size.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Something a transcript can be read from.
///
/// Implementations must be cheap to share across threads: the façade opens
/// a fresh reader for every phase of a request.
pub trait TranscriptSource: Send + Sync {
    /// Reader type handed out by this source.
    type Reader: BufRead + Seek + Send;

    /// Human-readable description, used in log events and errors.
    fn describe(&self) -> String;

    /// Opens a reader positioned at byte 0.
    fn open(&self) -> Result<Self::Reader>;

    /// Opens a reader positioned at `offset`.
    fn open_at(&self, offset: u64) -> Result<Self::Reader> {
        let mut reader = self.open()?;
        reader.seek(SeekFrom::Start(offset))?;
        Ok(reader)
    }
}

/// A transcript stored in a regular file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    buffer_size: usize,
}

impl FileSource {
    /// Creates a source for `path` with the default buffer size.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Sets the read buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TranscriptSource for FileSource {
    type Reader = BufReader<File>;

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> Result<Self::Reader> {
        // Missing, unreadable and non-regular paths all read as "not found".
        let not_found = || KakaoDayError::file_not_found(&self.path);
        let metadata = std::fs::metadata(&self.path).map_err(|_| not_found())?;
        if !metadata.is_file() {
            return Err(not_found());
        }
        let file = File::open(&self.path).map_err(|_| not_found())?;
        Ok(BufReader::with_capacity(self.buffer_size, file))
    }
}

/// A transcript held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    bytes: Arc<[u8]>,
}

impl MemorySource {
    /// Creates a source from owned bytes.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Creates a source from text.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, text.as_bytes())
    }

    /// Returns the size of the transcript in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl TranscriptSource for MemorySource {
    type Reader = Cursor<Arc<[u8]>>;

    fn describe(&self) -> String {
        format!("<memory:{}>", self.name)
    }

    fn open(&self) -> Result<Self::Reader> {
        Ok(Cursor::new(Arc::clone(&self.bytes)))
    }
}

/// Reads lines and tracks the byte offset of each one.
pub struct LineReader<R: BufRead> {
    reader: R,
    offset: u64,
    raw: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    /// Wraps a reader whose current position is `start_offset`.
    pub fn new(reader: R, start_offset: u64) -> Self {
        Self {
            reader,
            offset: start_offset,
            raw: Vec::with_capacity(4096),
        }
    }

    /// Byte offset of the next unread line.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Reads the next line.
    ///
    /// Returns the offset the line starts at and its text (line terminator
    /// included, invalid UTF-8 replaced). `Ok(None)` at end of stream.
    pub fn next_line(&mut self) -> io::Result<Option<(u64, String)>> {
        self.raw.clear();
        let bytes = self.reader.read_until(b'\n', &mut self.raw)?;
        if bytes == 0 {
            return Ok(None);
        }
        let start = self.offset;
        self.offset += bytes as u64;
        Ok(Some((start, String::from_utf8_lossy(&self.raw).into_owned())))
    }

    /// Consumes the line reader, returning the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<(u64, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
