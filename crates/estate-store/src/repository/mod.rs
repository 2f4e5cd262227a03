//! # Repository Module
//!
//! Mutation operations of the Entity Store, one file per entity family.
//!
//! ## Mutation Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Validate, Then Commit                                │
//! │                                                                         │
//! │  add_x(NewX)                       update_x(id, XPatch)                 │
//! │       │                                 │                               │
//! │       ▼                                 ▼                               │
//! │  build X with fresh id             clone stored X (NotFound if absent)  │
//! │       │                            shallow-merge the set patch fields   │
//! │       │                                 │                               │
//! │       └──────────────┬──────────────────┘                               │
//! │                      ▼                                                  │
//! │       validate_x (estate-core) + reference checks                       │
//! │                      │                                                  │
//! │            error ◄───┴───► ok                                           │
//! │       (store untouched)     │                                           │
//! │                             ▼                                           │
//! │                 push / replace in one step                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Patch fields are `Option<T>`; `None` keeps the stored value. Fields that
//! are themselves optional use `Option<Option<T>>`, so `Some(None)` clears
//! them. A patch that changes nothing is a no-op and returns the stored
//! entity.
//!
//! ## Available Repositories
//!
//! - [`customer`] - Customers
//! - [`property`] - Properties and units
//! - [`transaction`] - Payments and cheque status
//! - [`contract`] - Sale contracts
//! - [`invoice`] - Invoices
//! - [`inventory`] - Stock items
//! - [`maintenance`] - Maintenance requests
//! - [`marketing`] - Campaigns and leads
//! - [`project`] - Projects

use chrono::{Datelike, NaiveDate};
use estate_core::ValidationError;

use crate::error::StoreResult;

pub mod contract;
pub mod customer;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod inventory;
pub mod invoice;
pub mod maintenance;
pub mod marketing;
pub mod project;
pub mod property;
pub mod transaction;

/// Copies every `Some` field of a patch onto the target.
macro_rules! merge_patch {
    ($target:ident <- $patch:ident { $($field:ident),+ $(,)? }) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )+
    };
}

pub(crate) use merge_patch;

/// Order-preserving de-duplication of an id list.
pub(crate) fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}

/// Document numbers are assigned once, so the date they carry the year of
/// may move within that year only.
pub(crate) fn check_number_year(
    field: &str,
    number: &str,
    before: NaiveDate,
    after: NaiveDate,
) -> StoreResult<()> {
    if before.year() == after.year() {
        return Ok(());
    }
    Err(ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("must stay in {} to match {}", before.year(), number),
    }
    .into())
}
