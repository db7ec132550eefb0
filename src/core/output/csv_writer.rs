//! CSV output writer for day metadata.

use std::fs::File;
use std::path::Path;

use crate::core::models::DayMeta;
use crate::error::{KakaoDayError, Result};

const HEADER: [&str; 6] = ["Page", "Day", "Date", "UniqueId", "Items", "FirstMessageAt"];

/// Writes day metadata to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Page`, `Day`, `Date`, `UniqueId`, `Items`, `FirstMessageAt`
/// - Encoding: UTF-8
pub fn write_csv(days: &[DayMeta], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);
    write_records(&mut writer, days)?;
    writer.flush()?;
    Ok(())
}

/// Renders day metadata as a CSV string.
pub fn to_csv(days: &[DayMeta]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());
    write_records(&mut writer, days)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| KakaoDayError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| KakaoDayError::invalid_format(e.to_string()))
}

fn write_records<W: std::io::Write>(writer: &mut csv::Writer<W>, days: &[DayMeta]) -> Result<()> {
    writer.write_record(HEADER)?;
    for day in days {
        writer.write_record([
            day.page.to_string(),
            day.day.clone(),
            day.date.clone(),
            day.unique_id.clone().unwrap_or_default(),
            day.total_items.to_string(),
            day.first_message_at.clone(),
        ])?;
    }
    Ok(())
}
