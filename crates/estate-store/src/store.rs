//! # Entity Store
//!
//! In-memory collections of every back-office entity.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EntityStore                                                            │
//! │  ├── customers     Collection<Customer>                                 │
//! │  ├── properties    Collection<Property>                                 │
//! │  ├── units         Collection<Unit>                                     │
//! │  ├── transactions  Collection<Transaction>                              │
//! │  ├── contracts     Collection<Contract>                                 │
//! │  ├── invoices      Collection<Invoice>                                  │
//! │  ├── inventory     Collection<InventoryItem>                            │
//! │  ├── maintenance   Collection<MaintenanceRequest>                       │
//! │  ├── campaigns     Collection<Campaign>                                 │
//! │  ├── leads         Collection<Lead>                                     │
//! │  └── projects      Collection<Project>                                  │
//! │                                                                         │
//! │  Reads: slices in insertion order, lookups by id                        │
//! │  Writes: repository/*.rs (add_* appends, update_* replaces in place)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDate};
use estate_core::dashboard::DashboardSource;
use estate_core::validation::validate_document_number;
use estate_core::{
    Campaign, Contract, Customer, InventoryItem, Invoice, Lead, MaintenanceRequest, Project,
    Property, ReportSource, TaxRate, Transaction, Unit, CONTRACT_NUMBER_PREFIX,
    INVOICE_NUMBER_PREFIX,
};
use tracing::warn;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Record & Collection
// =============================================================================

/// An entity kept in a [`Collection`].
pub trait Record: Clone {
    /// Entity name used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty => $kind:literal),+ $(,)?) => {
        $(
            impl Record for $ty {
                const KIND: &'static str = $kind;

                fn id(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

impl_record!(
    Customer => "Customer",
    Property => "Property",
    Unit => "Unit",
    Transaction => "Transaction",
    Contract => "Contract",
    Invoice => "Invoice",
    InventoryItem => "InventoryItem",
    MaintenanceRequest => "MaintenanceRequest",
    Campaign => "Campaign",
    Lead => "Lead",
    Project => "Project",
);

/// An insertion-ordered list of records.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Like [`get`](Self::get), but an unknown id is a `NotFound` error.
    pub fn require(&self, id: &str) -> StoreResult<&T> {
        self.get(id).ok_or_else(|| {
            warn!(entity = T::KIND, id = %id, "Unknown id");
            StoreError::not_found(T::KIND, id)
        })
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Swaps in a new version of an existing record, keeping its position.
    pub(crate) fn replace(&mut self, item: T) -> StoreResult<()> {
        let slot = self
            .items
            .iter_mut()
            .find(|existing| existing.id() == item.id())
            .ok_or_else(|| StoreError::not_found(T::KIND, item.id()))?;
        *slot = item;
        Ok(())
    }
}

// =============================================================================
// Entity Store
// =============================================================================

/// The single owner of all back-office entities.
///
/// ## Usage
/// ```rust
/// use estate_store::{EntityStore, NewProperty};
/// use estate_core::{PropertyStatus, PropertyType};
///
/// let mut store = EntityStore::new();
/// let property = store
///     .add_property(NewProperty {
///         name: "Palm Residence".to_string(),
///         property_type: PropertyType::Residential,
///         location: "6th of October".to_string(),
///         description: String::new(),
///         total_units: 120,
///         available_units: 120,
///         sold_units: 0,
///         reserved_units: 0,
///         base_price: 2_500_000.0,
///         status: PropertyStatus::Construction,
///         completion_date: None,
///         images: vec![],
///         amenities: vec![],
///     })
///     .unwrap();
///
/// assert_eq!(store.properties().len(), 1);
/// assert_eq!(store.properties()[0].id, property.id);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    pub(crate) customers: Collection<Customer>,
    pub(crate) properties: Collection<Property>,
    pub(crate) units: Collection<Unit>,
    pub(crate) transactions: Collection<Transaction>,
    pub(crate) contracts: Collection<Contract>,
    pub(crate) invoices: Collection<Invoice>,
    pub(crate) inventory: Collection<InventoryItem>,
    pub(crate) maintenance: Collection<MaintenanceRequest>,
    pub(crate) campaigns: Collection<Campaign>,
    pub(crate) leads: Collection<Lead>,
    pub(crate) projects: Collection<Project>,
    /// Used by `add_invoice` when the caller leaves the rate unset.
    pub(crate) default_tax_rate: TaxRate,
    /// Business date for dates the store fills in itself (`soldAt`).
    pub(crate) as_of: Option<NaiveDate>,
}

impl EntityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_tax_rate(mut self, rate: TaxRate) -> Self {
        self.default_tax_rate = rate;
        self
    }

    pub fn default_tax_rate(&self) -> TaxRate {
        self.default_tax_rate
    }

    /// Pins the business date, so runs with an injected date stay reproducible.
    pub fn with_as_of(mut self, today: NaiveDate) -> Self {
        self.as_of = Some(today);
        self
    }

    /// The pinned business date, or the local calendar date when unpinned.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }

    // -------------------------------------------------------------------------
    // Collection reads
    // -------------------------------------------------------------------------

    pub fn customers(&self) -> &[Customer] {
        self.customers.all()
    }

    pub fn properties(&self) -> &[Property] {
        self.properties.all()
    }

    pub fn units(&self) -> &[Unit] {
        self.units.all()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.transactions.all()
    }

    pub fn contracts(&self) -> &[Contract] {
        self.contracts.all()
    }

    pub fn invoices(&self) -> &[Invoice] {
        self.invoices.all()
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        self.inventory.all()
    }

    pub fn maintenance(&self) -> &[MaintenanceRequest] {
        self.maintenance.all()
    }

    pub fn campaigns(&self) -> &[Campaign] {
        self.campaigns.all()
    }

    pub fn leads(&self) -> &[Lead] {
        self.leads.all()
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.all()
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.get(id)
    }

    pub fn property(&self, id: &str) -> Option<&Property> {
        self.properties.get(id)
    }

    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    pub fn campaign(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.get(id)
    }

    /// Finds a contract by id or by its `CNT-...` number.
    pub fn find_contract(&self, key: &str) -> StoreResult<&Contract> {
        let key = key.trim();
        self.contracts
            .all()
            .iter()
            .find(|c| c.id == key || c.contract_number == key)
            .ok_or_else(|| StoreError::not_found(Contract::KIND, key))
    }

    /// Finds an invoice by id or by its `INV-...` number.
    pub fn find_invoice(&self, key: &str) -> StoreResult<&Invoice> {
        let key = key.trim();
        self.invoices
            .all()
            .iter()
            .find(|i| i.id == key || i.invoice_number == key)
            .ok_or_else(|| StoreError::not_found(Invoice::KIND, key))
    }

    // -------------------------------------------------------------------------
    // Deriver views
    // -------------------------------------------------------------------------

    pub fn report_source(&self) -> ReportSource<'_> {
        ReportSource {
            customers: self.customers(),
            properties: self.properties(),
            units: self.units(),
            transactions: self.transactions(),
        }
    }

    pub fn dashboard_source(&self) -> DashboardSource<'_> {
        DashboardSource {
            customers: self.customers(),
            properties: self.properties(),
            units: self.units(),
            transactions: self.transactions(),
            invoices: self.invoices(),
            inventory: self.inventory(),
            maintenance: self.maintenance(),
            campaigns: self.campaigns(),
            leads: self.leads(),
            projects: self.projects(),
        }
    }

    // -------------------------------------------------------------------------
    // Store-assigned values
    // -------------------------------------------------------------------------

    pub(crate) fn next_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub(crate) fn next_contract_number(&self, year: i32) -> String {
        next_document_number(
            CONTRACT_NUMBER_PREFIX,
            year,
            self.contracts.all().iter().map(|c| c.contract_number.as_str()),
        )
    }

    pub(crate) fn next_invoice_number(&self, year: i32) -> String {
        next_document_number(
            INVOICE_NUMBER_PREFIX,
            year,
            self.invoices.all().iter().map(|i| i.invoice_number.as_str()),
        )
    }

    /// Fails with `UnknownReference` unless `id` names a stored customer.
    pub(crate) fn require_customer(&self, id: &str) -> StoreResult<&Customer> {
        self.customers
            .get(id)
            .ok_or_else(|| StoreError::unknown_reference(Customer::KIND, id))
    }

    pub(crate) fn require_property(&self, id: &str) -> StoreResult<&Property> {
        self.properties
            .get(id)
            .ok_or_else(|| StoreError::unknown_reference(Property::KIND, id))
    }

    pub(crate) fn require_unit(&self, id: &str) -> StoreResult<&Unit> {
        self.units
            .get(id)
            .ok_or_else(|| StoreError::unknown_reference(Unit::KIND, id))
    }

    pub(crate) fn require_campaign(&self, id: &str) -> StoreResult<&Campaign> {
        self.campaigns
            .get(id)
            .ok_or_else(|| StoreError::unknown_reference(Campaign::KIND, id))
    }
}

/// Highest existing sequence for `prefix`/`year`, plus one.
fn next_document_number<'a>(
    prefix: &str,
    year: i32,
    existing: impl Iterator<Item = &'a str>,
) -> String {
    let last = existing
        .filter_map(|number| validate_document_number(prefix, number).ok())
        .filter(|(y, _)| *y == year)
        .map(|(_, sequence)| sequence)
        .max()
        .unwrap_or(0);

    estate_core::validation::format_document_number(prefix, year, last + 1)
}
