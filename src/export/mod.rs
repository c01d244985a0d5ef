//! Export of phone entries to JSON or CSV.
//!
//! The destination's extension picks the format: `.csv` writes CSV, `.json`
//! writes JSON, and any other path gets `.json` appended and is written as JSON.
//! The file is written once and replaces whatever was there.

use crate::error::ExportResult;
use crate::models::PhoneEntry;
use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Header line of every CSV export.
pub const CSV_HEADER: &str =
    "ClientNumber,PhoneNumber,PhoneType,PersonId,PersonName,Priority,LastModified";

/// Format of the CSV `LastModified` column, in the timestamp's own offset.
pub const LAST_MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Pick the format for `path` and return the path actually written.
    ///
    /// Extensions compare case-insensitively.
    pub fn resolve(path: &Path) -> (ExportFormat, PathBuf) {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => (ExportFormat::Csv, path.to_path_buf()),
            Some("json") => (ExportFormat::Json, path.to_path_buf()),
            _ => {
                let mut with_extension = OsString::from(path.as_os_str());
                with_extension.push(".json");
                (ExportFormat::Json, PathBuf::from(with_extension))
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Csv => write!(f, "CSV"),
        }
    }
}

/// Write `entries` to `path`, choosing the format from its extension.
///
/// Returns the format used and the final path.
pub fn export_entries(entries: &[PhoneEntry], path: &Path) -> ExportResult<(ExportFormat, PathBuf)> {
    let (format, path) = ExportFormat::resolve(path);

    let mut writer = BufWriter::new(File::create(&path)?);
    match format {
        ExportFormat::Json => write_json(entries, &mut writer)?,
        ExportFormat::Csv => write_csv(entries, &mut writer)?,
    }
    writer.flush()?;

    tracing::info!(
        "Exported {} phone numbers as {} to {}",
        entries.len(),
        format,
        path.display()
    );

    Ok((format, path))
}

/// Write entries as a pretty-printed JSON array with camelCase keys.
pub fn write_json<W: Write>(entries: &[PhoneEntry], writer: &mut W) -> ExportResult<()> {
    serde_json::to_writer_pretty(&mut *writer, entries)?;
    writeln!(writer)?;
    Ok(())
}

/// Write entries as CSV.
///
/// `ClientNumber` and `Priority` are bare; every other column is quoted, and
/// absent values become `""`.
pub fn write_csv<W: Write>(entries: &[PhoneEntry], writer: &mut W) -> ExportResult<()> {
    writeln!(writer, "{}", CSV_HEADER)?;

    for entry in entries {
        let last_modified = entry
            .last_modified
            .map(|ts| ts.format(LAST_MODIFIED_FORMAT).to_string());

        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            entry.client_number,
            quote(entry.phone_number.as_deref()),
            quote(Some(entry.phone_type.as_tag())),
            quote(entry.person_id.as_deref()),
            quote(entry.person_name.as_deref()),
            entry.priority,
            quote(last_modified.as_deref()),
        )?;
    }

    Ok(())
}

/// Wrap a field in double quotes, doubling any embedded quote.
fn quote(value: Option<&str>) -> String {
    format!("\"{}\"", value.unwrap_or_default().replace('"', "\"\""))
}
