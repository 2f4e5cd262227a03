//! # Estate Back-Office Library
//!
//! Core library for the back-office command line. `main.rs` only forwards
//! the process arguments here.
//!
//! ## Module Organization
//! ```text
//! backoffice/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Argument parsing, usage text
//! ├── config.rs       ◄─── AppConfig (TOML + env overrides)
//! ├── state.rs        ◄─── AppState: config, shared store, as-of date
//! ├── commands/
//! │   ├── mod.rs      ◄─── dispatch
//! │   ├── report.rs   ◄─── CSV report export
//! │   ├── dashboard.rs
//! │   ├── cheques.rs
//! │   ├── inventory.rs
//! │   └── documents.rs
//! └── error.rs        ◄─── AppError, error codes, exit codes
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::io::Write;
use std::process::ExitCode;

use chrono::Local;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{parse_args, Cli, Command};
use config::AppConfig;
use error::AppResult;
use state::AppState;

/// Runs the command line and maps the outcome to a process exit code.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info,estate=debug; override with RUST_LOG                │
/// │                                                                         │
/// │  2. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • help needs no config or store                                     │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • --config PATH or platform config dir, then ESTATE_* overrides     │
/// │                                                                         │
/// │  4. Initialize State ─────────────────────────────────────────────────► │
/// │     • as-of date: --date or local today                                 │
/// │     • Entity Store seeded with the sample dataset                       │
/// │                                                                         │
/// │  5. Dispatch Command ─────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run<S: AsRef<str>>(args: &[S]) -> ExitCode {
    init_tracing();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match execute(args, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let report = err.report();
            eprintln!("error[{}]: {}", report.code, report.message);
            ExitCode::from(report.code.exit_code())
        }
    }
}

/// Parses, builds state, and dispatches one command.
pub fn execute<S: AsRef<str>>(args: &[S], out: &mut dyn Write) -> AppResult<()> {
    let Cli {
        config,
        date,
        command,
    } = parse_args(args)?;

    if command == Command::Help {
        write!(out, "{}", cli::USAGE)?;
        return Ok(());
    }

    let config = AppConfig::load(config)?;
    let today = date.unwrap_or_else(|| Local::now().date_naive());
    info!(company = %config.company.name, %today, "Starting back office");

    let state = AppState::new(config, today)?;
    commands::dispatch(&state, command, out)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=estate_store=trace` - Trace the store only
/// - Default: info, debug for the estate crates
///
/// Logs go to stderr so command output stays pipeable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,estate=debug,backoffice=debug"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
