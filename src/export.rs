//! CSV export of the report rows.

use crate::node::Entry;
use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use std::path::Path;

const HEADER: [&str; 3] = ["Directory", "Size in Bytes", "Files"];

/// Write one quoted row per entry, in the order given, after a header row.
pub fn write_csv(path: &Path, entries: &[Entry]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;

    writer.write_record(HEADER)?;
    for entry in entries {
        writer.write_record([
            &*entry.path.to_string_lossy(),
            entry.totals.size.to_string().as_str(),
            entry.totals.files.to_string().as_str(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write '{}'", path.display()))?;

    Ok(())
}
