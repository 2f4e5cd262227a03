//! # Application Error Type
//!
//! Unified error type for back-office commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Back Office                        │
//! │                                                                         │
//! │  backoffice contract CNT-2024-000099                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  AppResult<()>                                                   │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ─── StoreError::NotFound ──────────┐              │  │
//! │  │         │                                         │              │  │
//! │  │         ▼                                         ▼              │  │
//! │  │  Export Error? ─── ExportError::Io ──────────► AppError ───────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: error[NOT_FOUND]: Contract not found: CNT-2024-000099          │
//! │  exit code: 4                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use estate_core::CoreError;
use estate_export::ExportError;
use estate_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the back-office command line.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file or override is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Entity Store rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Writing an export failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Bad command line.
    #[error("{0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Entity or document not on record
    NotFound,

    /// Input failed a validation rule
    ValidationError,

    /// A field points at a missing entity
    InvalidReference,

    /// Domain rule refused the operation (e.g. cheque transition)
    BusinessLogic,

    ConfigError,

    ExportError,

    UsageError,

    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidReference => "INVALID_REFERENCE",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::ExportError => "EXPORT_ERROR",
            ErrorCode::UsageError => "USAGE_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit code for this class of failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::UsageError => 2,
            ErrorCode::ConfigError => 3,
            ErrorCode::NotFound => 4,
            ErrorCode::ValidationError | ErrorCode::InvalidReference | ErrorCode::BusinessLogic => 5,
            ErrorCode::ExportError => 6,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What gets printed when a command fails.
///
/// ```json
/// { "code": "NOT_FOUND", "message": "Invoice not found: INV-2024-000099" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl AppError {
    pub fn usage(message: impl Into<String>) -> Self {
        AppError::Usage(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::Config(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Config(_) => ErrorCode::ConfigError,
            AppError::Store(StoreError::NotFound { .. }) => ErrorCode::NotFound,
            AppError::Store(StoreError::UnknownReference { .. }) => ErrorCode::InvalidReference,
            AppError::Store(StoreError::Core(CoreError::Validation(_))) => {
                ErrorCode::ValidationError
            }
            AppError::Store(StoreError::Core(_)) => ErrorCode::BusinessLogic,
            AppError::Export(_) => ErrorCode::ExportError,
            AppError::Usage(_) => ErrorCode::UsageError,
            AppError::Io(_) | AppError::Json(_) => ErrorCode::Internal,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::{ChequeStatus, ValidationError};

    #[test]
    fn test_store_errors_map_to_codes() {
        let not_found = AppError::from(StoreError::not_found("Invoice", "INV-2024-000099"));
        assert_eq!(not_found.code(), ErrorCode::NotFound);
        assert_eq!(not_found.to_string(), "Invoice not found: INV-2024-000099");

        let reference = AppError::from(StoreError::unknown_reference("Customer", "ghost"));
        assert_eq!(reference.code(), ErrorCode::InvalidReference);

        let invalid = AppError::from(StoreError::from(ValidationError::Required {
            field: "name".to_string(),
        }));
        assert_eq!(invalid.code(), ErrorCode::ValidationError);

        let transition = AppError::from(StoreError::from(CoreError::InvalidChequeTransition {
            from: ChequeStatus::Cleared,
            to: ChequeStatus::Pending,
        }));
        assert_eq!(transition.code(), ErrorCode::BusinessLogic);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::usage("unknown command").code().exit_code(), 2);
        assert_eq!(AppError::config("bad tax rate").code().exit_code(), 3);
        assert_eq!(ErrorCode::NotFound.exit_code(), 4);
    }

    #[test]
    fn test_report_serialization() {
        let report = AppError::usage("missing report type").report();
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"code":"USAGE_ERROR","message":"missing report type"}"#);
    }
}
