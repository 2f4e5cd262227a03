//! # estate-core: Pure Domain Logic for the Estate Back Office
//!
//! Entity types, validation and every derived figure the back office shows:
//! stock status, invoice totals, budget utilization, cheque due-state,
//! portfolio and report rollups.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Estate Back-Office Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/backoffice (CLI shell)                      │   │
//! │  │    report, dashboard, cheques, inventory, contract, invoice     │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────┐ ┌─────────────▼───────────────────┐   │
//! │  │  estate-store               │ │  estate-export                  │   │
//! │  │  Entity Store, mutations,   │ │  CSV writer, contract and       │   │
//! │  │  sample data                │ │  invoice documents              │   │
//! │  └──────────────┬──────────────┘ └─────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────────────────────▼───────────────────┐   │
//! │  │               ★ estate-core (THIS CRATE) ★                       │   │
//! │  │                                                                  │   │
//! │  │   types  validation  stock  finance  cheque  portfolio  report  │   │
//! │  │                                                                  │   │
//! │  │   NO I/O • NO CLOCK • PURE FUNCTIONS                             │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities and their status enums
//! - [`money`] - Amount hygiene, percentages, tax rate
//! - [`error`] - Domain error types
//! - [`validation`] - Field and entity rules
//! - [`stock`] - Stock-status deriver
//! - [`finance`] - Invoice totals, budgets, campaign ratios
//! - [`cheque`] - Cheque due windows and lifecycle
//! - [`portfolio`] - Property and portfolio rollups
//! - [`report`] - Flat report rows for export
//! - [`dashboard`] - Home-screen counters
//!
//! ## Design Principles
//!
//! 1. **Derived, never stored**: stock status and invoice totals are
//!    computed from the fields they depend on at read time
//! 2. **No clock**: "today" is an argument, so date rules are testable
//! 3. **Explicit Errors**: every rejected input is a typed error
//!
//! ## Example Usage
//!
//! ```rust
//! use estate_core::stock::stock_status;
//! use estate_core::cheque::is_overdue;
//! use estate_core::{ChequeStatus, StockStatus};
//! use chrono::NaiveDate;
//!
//! assert_eq!(stock_status(3, 10), StockStatus::LowStock);
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
//! let yesterday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
//! assert!(is_overdue(yesterday, ChequeStatus::Pending, today));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cheque;
pub mod dashboard;
pub mod error;
pub mod finance;
pub mod money;
pub mod portfolio;
pub mod report;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::TaxRate;
pub use report::{ReportRow, ReportSource, ReportType, ReportValue};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax rate applied to new invoices unless configured otherwise (percent).
pub const DEFAULT_TAX_RATE_PERCENT: f64 = 15.0;

/// Prefix of store-assigned contract numbers (`CNT-2024-000001`).
pub const CONTRACT_NUMBER_PREFIX: &str = "CNT";

/// Prefix of store-assigned invoice numbers (`INV-2024-000001`).
pub const INVOICE_NUMBER_PREFIX: &str = "INV";
