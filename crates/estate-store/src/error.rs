//! # Store Error Types
//!
//! Error types for Entity Store mutations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (estate-core)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds unknown-id and reference failures     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (backoffice) ← Code + message for the operator               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Whatever the variant, the store is unchanged when one is returned.

use estate_core::{CoreError, ValidationError};
use thiserror::Error;

/// Entity Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the store.
    ///
    /// ## When This Occurs
    /// - `update_*` called with an id that was never assigned
    /// - Contract/invoice lookup by an unknown number
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A field points at an entity that does not exist.
    ///
    /// ## When This Occurs
    /// - Unit with an unknown `propertyId`
    /// - Transaction, contract or invoice with an unknown `customerId`
    /// - Lead with an unknown `campaignId`
    #[error("Unknown {entity} referenced: {id}")]
    UnknownReference { entity: String, id: String },

    /// Domain rule or validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn unknown_reference(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::UnknownReference {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// The validation failure behind this error, if that is what it is.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            StoreError::Core(CoreError::Validation(err)) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
