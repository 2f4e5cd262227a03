//! # estate-export: Files Out of the Back Office
//!
//! Report CSV files and plain-text contract and invoice documents.
//!
//! ```text
//! ReportRow[] ──► rows_to_csv ──► <type>-report-<date>.csv
//! Contract + Customer/Unit/Property ──► contract_document ──► contract-<no>.txt
//! Invoice + Customer ──► invoice_document ──► invoice-<no>.txt
//! ```
//!
//! ## Module Organization
//!
//! - [`report_csv`] - CSV serialization and report file naming
//! - [`document`] - Contract and invoice documents
//! - [`error`] - Export error types

pub mod document;
pub mod error;
pub mod report_csv;

pub use document::{
    contract_document, contract_file_name, invoice_document, invoice_file_name, write_document,
    ContractParties, Letterhead,
};
pub use error::{ExportError, ExportResult};
pub use report_csv::{report_file_name, rows_to_csv, write_report};
