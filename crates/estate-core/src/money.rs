//! # Money Module
//!
//! Amount helpers shared by every financial rollup.
//!
//! ## Why Plain `f64`?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AMOUNTS IN THE BACK OFFICE                                             │
//! │                                                                         │
//! │  Invoices, budgets and report exports have always been computed with   │
//! │  ordinary floating-point arithmetic, and exported figures must keep    │
//! │  matching the numbers operators already filed:                         │
//! │                                                                         │
//! │    200 × (1 + 15/100) − 10 = 220                                        │
//! │                                                                         │
//! │  So amounts stay `f64`; what this module adds is the input hygiene     │
//! │  (negative / NaN → 0), guarded percentages, and display formatting.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use estate_core::money::{coerce_amount, percentage, TaxRate};
//!
//! assert_eq!(coerce_amount(-5.0), 0.0);
//! assert_eq!(percentage(25.0, 100.0), 25.0);
//! assert_eq!(TaxRate::default().tax_on(200.0), 30.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::DEFAULT_TAX_RATE_PERCENT;

// =============================================================================
// Input Hygiene
// =============================================================================

/// Coerces a user-entered amount: negative and non-finite values become 0.
///
/// ## Example
/// ```rust
/// use estate_core::money::coerce_amount;
///
/// assert_eq!(coerce_amount(12.5), 12.5);
/// assert_eq!(coerce_amount(-1.0), 0.0);
/// assert_eq!(coerce_amount(f64::NAN), 0.0);
/// ```
#[inline]
pub fn coerce_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// `part / whole × 100`, or 0 when `whole` is not positive.
#[inline]
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// `numerator / denominator`, or `None` ("N/A") when the denominator is 0.
#[inline]
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// A tax rate expressed as a percentage (15.0 = 15%).
///
/// ## Why Not Basis Points?
/// The rate is typed by an operator per invoice and may carry decimals
/// (e.g. 7.5%); it is applied with plain float arithmetic, so the
/// percentage itself is the most faithful representation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct TaxRate(f64);

impl TaxRate {
    /// Creates a tax rate, rejecting anything outside 0-100%.
    pub fn new(percent: f64) -> Result<Self, ValidationError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(ValidationError::OutOfRange {
                field: "taxRate".to_string(),
                min: 0.0,
                max: 100.0,
            });
        }
        Ok(TaxRate(percent))
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0.0)
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Tax due on `amount`: `amount × rate / 100`.
    ///
    /// ## Example
    /// ```rust
    /// use estate_core::money::TaxRate;
    ///
    /// let rate = TaxRate::new(15.0).unwrap();
    /// assert_eq!(rate.tax_on(200.0), 30.0);
    /// ```
    #[inline]
    pub fn tax_on(&self, amount: f64) -> f64 {
        amount * (self.0 / 100.0)
    }
}

impl Default for TaxRate {
    /// The rate pre-filled on a new invoice (15%).
    fn default() -> Self {
        TaxRate(DEFAULT_TAX_RATE_PERCENT)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Formats an amount with a currency code and fixed decimals.
///
/// ## Example
/// ```rust
/// use estate_core::money::format_amount;
///
/// assert_eq!(format_amount(1234.5, "EGP", 2), "EGP 1234.50");
/// assert_eq!(format_amount(-10.0, "USD", 2), "-USD 10.00");
/// ```
pub fn format_amount(amount: f64, currency: &str, decimals: usize) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{} {:.*}", sign, currency, decimals, amount.abs())
}

// =============================================================================
// Unit Tests
// =============================================================================
