//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

/// Writes any serializable value (a day record, a metadata list) as
/// pretty-printed JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(
    value: &T,
    output_path: impl AsRef<Path>,
) -> crate::Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Renders a value as pretty-printed JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
