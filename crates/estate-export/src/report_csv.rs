//! # CSV Report Export
//!
//! Serializes report rows as CSV.
//!
//! ## Layout
//! ```text
//! id,name,email,...            ◄── column names of the first row
//! 3f2a...,"Delta Trading, Co.",...
//! ```
//!
//! - Every later row is written in the header's column order.
//! - Values containing a comma, quote or newline are quoted, and inner
//!   quotes are doubled.
//! - No rows gives empty output, not a bare header.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use estate_core::{ReportRow, ReportType};
use tracing::info;

use crate::error::{ExportError, ExportResult};

/// Serializes rows to CSV bytes.
///
/// ## Example
/// ```rust
/// use estate_core::ReportRow;
/// use estate_export::rows_to_csv;
///
/// let rows = vec![ReportRow::new().cell("name", "Nile View, Tower").cell("units", 80u32)];
/// let csv = rows_to_csv(&rows).unwrap();
/// assert_eq!(String::from_utf8(csv).unwrap(), "name,units\n\"Nile View, Tower\",80\n");
/// ```
pub fn rows_to_csv(rows: &[ReportRow]) -> ExportResult<Vec<u8>> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let header: Vec<&'static str> = first.columns().collect();

    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(&header)?;

    for row in rows {
        writer.write_record(header.iter().map(|column| {
            row.get(column)
                .map(ToString::to_string)
                .unwrap_or_default()
        }))?;
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

/// `<report-type>-report-<YYYY-MM-DD>.csv`
pub fn report_file_name(report_type: ReportType, date: NaiveDate) -> String {
    format!("{}-report-{}.csv", report_type.as_str(), date.format("%Y-%m-%d"))
}

/// Writes the report into `dir`, creating the directory when needed.
///
/// Returns the path of the written file.
pub fn write_report(
    dir: &Path,
    report_type: ReportType,
    date: NaiveDate,
    rows: &[ReportRow],
) -> ExportResult<PathBuf> {
    let bytes = rows_to_csv(rows)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(report_type, date));
    fs::write(&path, bytes)?;

    info!(path = %path.display(), report = %report_type, rows = rows.len(), "Report exported");
    Ok(path)
}
