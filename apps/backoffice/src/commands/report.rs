//! # Report Command

use std::io::Write;
use std::path::PathBuf;

use estate_core::report::build_report;
use estate_core::ReportType;
use estate_export::{rows_to_csv, write_report};
use tracing::info;

use crate::error::AppResult;
use crate::state::AppState;

/// Builds a report and writes it as CSV, to a file or to `out`.
///
/// The file goes to `dir` when given, else to the configured export
/// directory, and is named `<type>-report-<as-of date>.csv`.
pub fn export_report(
    state: &AppState,
    report_type: ReportType,
    dir: Option<PathBuf>,
    to_stdout: bool,
    out: &mut dyn Write,
) -> AppResult<()> {
    let rows = state
        .store
        .with_store(|store| build_report(report_type, &store.report_source()));

    info!(report = %report_type, rows = rows.len(), "Report built");

    if to_stdout {
        out.write_all(&rows_to_csv(&rows)?)?;
        return Ok(());
    }

    let dir = dir.unwrap_or_else(|| state.config.export.output_dir.clone());
    let path = write_report(&dir, report_type, state.today, &rows)?;
    writeln!(out, "Wrote {} {} rows to {}", rows.len(), report_type, path.display())?;
    Ok(())
}
