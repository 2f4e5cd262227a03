//! # estate-store: Entity Store for the Estate Back Office
//!
//! This crate holds every entity collection of the back office in memory
//! and owns the only operations that change them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Estate Back Office Data Flow                         │
//! │                                                                         │
//! │  backoffice CLI command (report, cheques, documents, ...)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   estate-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │  EntityStore  │    │ Repositories  │    │    Seed      │   │   │
//! │  │   │  (store.rs)   │    │ add_* /       │    │ sample_store │   │   │
//! │  │   │               │◄───│ update_*      │    │              │   │   │
//! │  │   │ Collection<T> │    │ validate,     │    │ SharedStore  │   │   │
//! │  │   │ per entity    │    │ then commit   │    │ (shared.rs)  │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  estate-core derivers (stock, finance, cheque, portfolio, report)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The store, its collections and lookups
//! - [`repository`] - Add and update operations per entity family
//! - [`shared`] - Lock-guarded handle for concurrent front-ends
//! - [`seed`] - Sample dataset
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use estate_store::{EntityStore, NewCustomer};
//!
//! let mut store = EntityStore::new();
//! let customer = store.add_customer(new_customer)?;
//! let rows = build_report(ReportType::Customer, &store.report_source());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod seed;
pub mod shared;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use seed::sample_store;
pub use shared::SharedStore;
pub use store::{Collection, EntityStore, Record};

// Payload re-exports for convenience
pub use repository::contract::{ContractPatch, NewContract};
pub use repository::customer::{CustomerPatch, NewCustomer};
pub use repository::inventory::{InventoryPatch, NewInventoryItem};
pub use repository::invoice::{InvoicePatch, NewInvoice};
pub use repository::maintenance::{MaintenancePatch, NewMaintenanceRequest};
pub use repository::marketing::{CampaignPatch, LeadPatch, NewCampaign, NewLead};
pub use repository::project::{NewProject, ProjectPatch};
pub use repository::property::{NewProperty, NewUnit, PropertyPatch, UnitPatch};
pub use repository::transaction::{NewTransaction, TransactionPatch};
