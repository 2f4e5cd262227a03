//! # Error Types
//!
//! Domain-specific error types for estate-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  estate-core errors (this file)                                        │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  estate-store errors (separate crate)                                  │
//! │  └── StoreError       - Unknown ids, dangling references               │
//! │                                                                         │
//! │  backoffice errors (app)                                               │
//! │  └── AppError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → AppError → Operator  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failed create/update is reported through one of these types and
//! aborts the mutation. Nothing here is ever retried.

use thiserror::Error;

use crate::types::ChequeStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations that are not tied to a single form field.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A cheque status change that the lifecycle does not allow.
    ///
    /// ## Legal Edges
    /// ```text
    /// pending ──► sent_to_bank ──► cleared
    ///                  │
    ///                  └─────────► bounced
    ///
    /// any state (except cancelled) ──► cancelled
    /// ```
    #[error("Cheque cannot move from {from} to {to}")]
    InvalidChequeTransition { from: ChequeStatus, to: ChequeStatus },

    /// A cheque operation was requested on a non-cheque transaction.
    #[error("Transaction {0} is not paid by cheque")]
    NotACheque(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These mirror the checks a back-office form performs before submitting:
/// missing fields, non-positive amounts, malformed numbers, date ordering.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Invalid format (e.g. contract number, email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two dates are in the wrong order.
    #[error("{later} must be after {earlier}")]
    DateOrder { earlier: String, later: String },

    /// A field is required because of another field's value.
    ///
    /// e.g. `reviewedBy` when `legalReviewed` is set, `bounceReason`
    /// when a cheque bounces.
    #[error("{field} is required when {condition}")]
    Conditional { field: String, condition: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn conditional(field: impl Into<String>, condition: impl Into<String>) -> Self {
        ValidationError::Conditional {
            field: field.into(),
            condition: condition.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_error_message() {
        let err = CoreError::InvalidChequeTransition {
            from: ChequeStatus::Cleared,
            to: ChequeStatus::Pending,
        };
        assert_eq!(err.to_string(), "Cheque cannot move from cleared to pending");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("email").to_string(), "email is required");

        let err = ValidationError::DateOrder {
            earlier: "startDate".to_string(),
            later: "endDate".to_string(),
        };
        assert_eq!(err.to_string(), "endDate must be after startDate");

        let err = ValidationError::conditional("reviewedBy", "legalReviewed is set");
        assert_eq!(err.to_string(), "reviewedBy is required when legalReviewed is set");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
