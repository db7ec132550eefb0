//! Per-day text files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::transcript::ChatTranscript;
use crate::error::Result;
use crate::source::{FileSource, TranscriptSource};

/// Writes one `<base>_<YYYYMMDD>.txt` file per logical day into `out_dir`.
///
/// `out_dir` is created if missing. Each file holds the day's trimmed lines
/// joined by `\n`, continuation lines included. Returns the written paths in
/// day order.
pub fn write_day_files<S: TranscriptSource>(
    transcript: &ChatTranscript<S>,
    base: &str,
    out_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    let days = transcript.all_days()?;
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(days.len());
    for (day, content) in &days {
        let path = out_dir.join(format!("{base}_{}.txt", day.format("%Y%m%d")));
        fs::write(&path, content.joined())?;
        written.push(path);
    }

    tracing::debug!(
        source = %transcript.source().describe(),
        files = written.len(),
        out_dir = %out_dir.display(),
        "split transcript by day"
    );

    Ok(written)
}

/// Splits the transcript at `path`, naming files after its stem.
pub fn split_by_day(path: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    let base = path
        .file_stem()
        .map_or_else(|| "chat".to_string(), |stem| stem.to_string_lossy().into_owned());
    write_day_files(&ChatTranscript::new(FileSource::new(path)), &base, out_dir)
}
