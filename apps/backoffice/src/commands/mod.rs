//! # Back-Office Commands
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (dispatch)
//! ├── report.rs     ◄─── CSV report export
//! ├── dashboard.rs  ◄─── Summary counts, text or JSON
//! ├── cheques.rs    ◄─── Due-cheque alerts
//! ├── inventory.rs  ◄─── Stock levels
//! └── documents.rs  ◄─── Contract and invoice documents
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  parse_args ──► Command                                                 │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  dispatch(state, command, out)                                          │
//! │      state: &AppState      ◄── config + shared store + as-of date       │
//! │      out:   &mut dyn Write ◄── stdout in the binary, a buffer in tests  │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  store read via with_store ──► deriver ──► text / JSON / file           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cheques;
pub mod dashboard;
pub mod documents;
pub mod inventory;
pub mod report;

use std::io::Write;

use tracing::debug;

use crate::cli::{Command, USAGE};
use crate::error::AppResult;
use crate::state::AppState;

/// Runs one command against the state, writing its output to `out`.
pub fn dispatch(state: &AppState, command: Command, out: &mut dyn Write) -> AppResult<()> {
    debug!(?command, today = %state.today, "Dispatching command");

    match command {
        Command::Report {
            report_type,
            out: dir,
            stdout,
        } => report::export_report(state, report_type, dir, stdout, out),
        Command::Dashboard { json } => dashboard::show_dashboard(state, json, out),
        Command::Cheques { week } => cheques::list_due_cheques(state, week, out),
        Command::Inventory => inventory::show_inventory(state, out),
        Command::Contract { key, out: dir } => documents::contract(state, &key, dir, out),
        Command::Invoice { key, out: dir } => documents::invoice(state, &key, dir, out),
        Command::Help => {
            write!(out, "{}", USAGE)?;
            Ok(())
        }
    }
}
