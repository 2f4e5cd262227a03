//! # Estate Back-Office Entry Point
//!
//! ```bash
//! backoffice dashboard
//! backoffice --date 2024-06-10 cheques --week
//! backoffice report customer --out ./exports
//! backoffice invoice INV-2024-000001
//! ```
//!
//! All setup lives in the library for testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    backoffice::run(&args)
}
