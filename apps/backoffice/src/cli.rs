//! # Command Line Parsing
//!
//! ```text
//! backoffice [--config PATH] [--date YYYY-MM-DD] <command> [options]
//!
//!   report <revenue|sales|customer|property> [--out DIR] [--stdout]
//!   dashboard [--json]
//!   cheques [--week]
//!   inventory
//!   contract <id|number> [--out DIR]
//!   invoice <id|number> [--out DIR]
//!   help
//! ```
//!
//! Global flags may appear anywhere on the line.

use std::path::PathBuf;

use chrono::NaiveDate;
use estate_core::ReportType;

use crate::error::{AppError, AppResult};

pub const USAGE: &str = "\
Estate back office

USAGE:
    backoffice [--config PATH] [--date YYYY-MM-DD] <COMMAND> [OPTIONS]

COMMANDS:
    report <TYPE>        Export a report as CSV (revenue, sales, customer, property)
        --out DIR        Write into DIR instead of the configured export directory
        --stdout         Print the CSV instead of writing a file
    dashboard            Summary counts and totals
        --json           Print as JSON
    cheques              Overdue cheques, cheques due today and in the next 3 days
        --week           Use the 7-day window instead
    inventory            Stock levels and reorder quantities
    contract <ID|NUMBER> Print a sale contract document
        --out DIR        Write the document into DIR
    invoice <ID|NUMBER>  Print an invoice document
        --out DIR        Write the document into DIR
    help                 Show this message

GLOBAL OPTIONS:
    --config PATH        Configuration file (default: platform config dir)
    --date YYYY-MM-DD    Evaluate date rules as of this day (default: today)

ENVIRONMENT:
    RUST_LOG, ESTATE_COMPANY_NAME, ESTATE_CURRENCY, ESTATE_TAX_RATE, ESTATE_EXPORT_DIR
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Report {
        report_type: ReportType,
        out: Option<PathBuf>,
        stdout: bool,
    },
    Dashboard {
        json: bool,
    },
    Cheques {
        week: bool,
    },
    Inventory,
    Contract {
        key: String,
        out: Option<PathBuf>,
    },
    Invoice {
        key: String,
        out: Option<PathBuf>,
    },
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub config: Option<PathBuf>,
    pub date: Option<NaiveDate>,
    pub command: Command,
}

/// Parses the arguments after the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> AppResult<Cli> {
    let mut config = None;
    let mut date = None;
    let mut out = None;
    let mut json = false;
    let mut week = false;
    let mut stdout = false;
    let mut help = false;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_ref();
        match arg {
            "--config" | "-c" => {
                config = Some(PathBuf::from(value_of(args, i, arg)?));
                i += 1;
            }
            "--date" | "-d" => {
                let raw = value_of(args, i, arg)?;
                date = Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                    AppError::usage(format!("--date expects YYYY-MM-DD, got '{}'", raw))
                })?);
                i += 1;
            }
            "--out" | "-o" => {
                out = Some(PathBuf::from(value_of(args, i, arg)?));
                i += 1;
            }
            "--json" => json = true,
            "--week" => week = true,
            "--stdout" => stdout = true,
            "--help" | "-h" => help = true,
            flag if flag.starts_with('-') => {
                return Err(AppError::usage(format!("unknown option '{}'", flag)));
            }
            _ => positional.push(arg.to_string()),
        }
        i += 1;
    }

    if help {
        return Ok(Cli {
            config,
            date,
            command: Command::Help,
        });
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        None | Some("help") => Command::Help,
        Some("report") => {
            let raw = positional
                .next()
                .ok_or_else(|| AppError::usage("report needs a type: revenue, sales, customer, property"))?;
            let report_type = raw
                .parse::<ReportType>()
                .map_err(|e| AppError::usage(e.to_string()))?;
            Command::Report {
                report_type,
                out,
                stdout,
            }
        }
        Some("dashboard") => Command::Dashboard { json },
        Some("cheques") => Command::Cheques { week },
        Some("inventory") => Command::Inventory,
        Some("contract") => Command::Contract {
            key: positional
                .next()
                .ok_or_else(|| AppError::usage("contract needs an id or contract number"))?,
            out,
        },
        Some("invoice") => Command::Invoice {
            key: positional
                .next()
                .ok_or_else(|| AppError::usage("invoice needs an id or invoice number"))?,
            out,
        },
        Some(other) => {
            return Err(AppError::usage(format!(
                "unknown command '{}'. Run 'backoffice help' for usage",
                other
            )))
        }
    };

    if let Some(extra) = positional.next() {
        return Err(AppError::usage(format!("unexpected argument '{}'", extra)));
    }

    Ok(Cli {
        config,
        date,
        command,
    })
}

fn value_of<'a, S: AsRef<str>>(args: &'a [S], i: usize, flag: &str) -> AppResult<&'a str> {
    args.get(i + 1)
        .map(AsRef::as_ref)
        .ok_or_else(|| AppError::usage(format!("{} expects a value", flag)))
}
