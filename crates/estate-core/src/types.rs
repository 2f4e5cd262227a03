//! # Domain Types
//!
//! Every business object the back office keeps in its Entity Store.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Sales side                      Money side                             │
//! │  ──────────                      ──────────                             │
//! │  Customer ◄──┬── Unit ──► Property     Transaction ──► ChequeDetails    │
//! │              ├── Contract ──► Unit     Invoice ──► InvoiceItem*         │
//! │              └── Lead ──► Campaign                                      │
//! │                                                                         │
//! │  Operations side                                                        │
//! │  ───────────────                                                        │
//! │  InventoryItem   MaintenanceRequest ──► Property   Project              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity carries an opaque string `id` (UUID v4 text) assigned by the
//! store. Cross-references hold ids only; the store owns the objects.
//!
//! ## Derived Fields Are Not Stored
//! Inventory stock status and invoice totals are computed on read
//! ([`InventoryItem::status`], [`Invoice::totals`]) so they can never drift
//! from the fields they are derived from.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::TaxRate;

// =============================================================================
// Enum Labels
// =============================================================================

/// Implements `as_str`, `ALL`, `Display` and `FromStr` for a status enum,
/// using the same snake_case labels serde writes.
macro_rules! impl_labels {
    ($ty:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// The wire/report label of this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($label => Ok($ty::$variant),)+
                    other => Err(ValidationError::InvalidFormat {
                        field: stringify!($ty).to_string(),
                        reason: format!("unknown value '{}'", other),
                    }),
                }
            }
        }
    };
}

// =============================================================================
// Customer
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    Individual,
    Corporate,
}

impl_labels!(CustomerType { Individual => "individual", Corporate => "corporate" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Lead,
    Prospect,
    Customer,
    Inactive,
}

impl_labels!(CustomerStatus {
    Lead => "lead",
    Prospect => "prospect",
    Customer => "customer",
    Inactive => "inactive",
});

/// A person or company the office sells to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    pub status: CustomerStatus,
    /// Where the customer came from ("referral", "website", ...).
    pub source: String,
    pub assigned_to: String,
    pub notes: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub last_contact: Option<DateTime<Utc>>,
    /// Running total maintained by the office, not recomputed from
    /// transactions.
    pub total_spent: f64,
    /// Ids of the properties this customer holds units in (no duplicates).
    pub properties: Vec<String>,
}

// =============================================================================
// Property & Unit
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Residential,
    Commercial,
}

impl_labels!(PropertyType { Residential => "residential", Commercial => "commercial" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Planning,
    Construction,
    Ready,
    Completed,
}

impl_labels!(PropertyStatus {
    Planning => "planning",
    Construction => "construction",
    Ready => "ready",
    Completed => "completed",
});

/// A development (building or compound) made of units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub location: String,
    pub description: String,
    pub total_units: u32,
    pub available_units: u32,
    pub sold_units: u32,
    pub reserved_units: u32,
    pub base_price: f64,
    pub status: PropertyStatus,
    #[ts(as = "Option<String>")]
    pub completion_date: Option<NaiveDate>,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
}

impl Property {
    /// Units accounted for by the three stored counters.
    #[inline]
    pub fn allocated_units(&self) -> u64 {
        self.available_units as u64 + self.sold_units as u64 + self.reserved_units as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Available,
    Reserved,
    Sold,
    Maintenance,
}

impl_labels!(UnitStatus {
    Available => "available",
    Reserved => "reserved",
    Sold => "sold",
    Maintenance => "maintenance",
});

impl UnitStatus {
    /// Sold and reserved units belong to a customer.
    #[inline]
    pub fn requires_customer(&self) -> bool {
        matches!(self, UnitStatus::Sold | UnitStatus::Reserved)
    }
}

/// A sellable apartment, villa or shop inside a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub property_id: String,
    pub unit_number: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    /// Area in square metres.
    pub size: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub price: f64,
    pub status: UnitStatus,
    pub floor: i32,
    pub facing: String,
    pub customer_id: Option<String>,
    #[ts(as = "Option<String>")]
    pub sold_at: Option<NaiveDate>,
}

// =============================================================================
// Transaction & Cheque
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Instapay,
    Cheque,
    BankTransfer,
    Other,
}

impl_labels!(PaymentMethod {
    Cash => "cash",
    Instapay => "instapay",
    Cheque => "cheque",
    BankTransfer => "bank_transfer",
    Other => "other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl_labels!(TransactionStatus {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ChequeStatus {
    Pending,
    SentToBank,
    Cleared,
    Bounced,
    Cancelled,
}

impl_labels!(ChequeStatus {
    Pending => "pending",
    SentToBank => "sent_to_bank",
    Cleared => "cleared",
    Bounced => "bounced",
    Cancelled => "cancelled",
});

impl ChequeStatus {
    /// Cleared and cancelled cheques never count as overdue.
    #[inline]
    pub fn is_settled(&self) -> bool {
        matches!(self, ChequeStatus::Cleared | ChequeStatus::Cancelled)
    }
}

/// Cheque data embedded in a cheque-paid transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChequeDetails {
    pub cheque_number: String,
    pub bank_name: String,
    pub branch_name: String,
    pub account_number: String,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    pub status: ChequeStatus,
    #[ts(as = "Option<String>")]
    pub bank_processed_date: Option<NaiveDate>,
    pub bounce_reason: Option<String>,
}

/// A payment received from a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub customer_id: String,
    /// Customer name at the time the payment was recorded.
    pub customer_name: String,
    pub payee_details: String,
    pub amount: f64,
    pub currency: String,
    pub unit_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub accountant: String,
    #[ts(as = "String")]
    pub transaction_date: NaiveDate,
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    pub status: TransactionStatus,
    pub comments: Option<String>,
    pub attachments: Vec<String>,
    /// Present iff `payment_method` is [`PaymentMethod::Cheque`].
    pub cheque_details: Option<ChequeDetails>,
}

// =============================================================================
// Contract
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    PendingSignature,
    Signed,
    Executed,
    Terminated,
}

impl_labels!(ContractStatus {
    Draft => "draft",
    PendingSignature => "pending_signature",
    Signed => "signed",
    Executed => "executed",
    Terminated => "terminated",
});

/// A sale contract for one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub customer_id: String,
    pub unit_id: String,
    /// `CNT-<year>-<6 digits>`
    pub contract_number: String,
    #[ts(as = "String")]
    pub signed_date: NaiveDate,
    pub total_value: f64,
    pub payment_terms: String,
    pub status: ContractStatus,
    pub documents: Vec<String>,
    pub legal_reviewed: bool,
    pub reviewed_by: Option<String>,
}

// =============================================================================
// Invoice
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl_labels!(InvoiceStatus {
    Draft => "draft",
    Sent => "sent",
    Paid => "paid",
    Overdue => "overdue",
    Cancelled => "cancelled",
});

impl InvoiceStatus {
    /// Paid and cancelled invoices no longer expect money.
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }
}

/// One billed line. Its total is always `quantity × unit_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

/// A bill issued to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    /// `INV-<year>-<6 digits>`
    pub invoice_number: String,
    pub customer_id: String,
    pub customer_name: String,
    pub items: Vec<InvoiceItem>,
    pub tax_rate: TaxRate,
    pub discount: f64,
    pub currency: String,
    #[ts(as = "String")]
    pub issue_date: NaiveDate,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub payment_terms: String,
    pub notes: Option<String>,
}

// =============================================================================
// Inventory
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl_labels!(StockStatus {
    OutOfStock => "out_of_stock",
    LowStock => "low_stock",
    InStock => "in_stock",
});

/// A stocked material or fixture (tiles, fittings, spare parts...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub item_name: String,
    pub category: String,
    pub sku: String,
    pub quantity: u32,
    pub min_stock: u32,
    pub max_stock: u32,
    pub unit_price: f64,
    pub supplier: String,
    pub location: String,
    #[ts(as = "String")]
    pub last_updated: DateTime<Utc>,
}

// =============================================================================
// Maintenance
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    Preventive,
    Corrective,
    Emergency,
}

impl_labels!(MaintenanceType {
    Preventive => "preventive",
    Corrective => "corrective",
    Emergency => "emergency",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MaintenancePriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl_labels!(MaintenancePriority {
    Low => "low",
    Medium => "medium",
    High => "high",
    Urgent => "urgent",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Pending,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl_labels!(MaintenanceStatus {
    Pending => "pending",
    Scheduled => "scheduled",
    InProgress => "in_progress",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl MaintenanceStatus {
    /// Requests still waiting for work.
    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            MaintenanceStatus::Pending | MaintenanceStatus::Scheduled | MaintenanceStatus::InProgress
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub property_id: Option<String>,
    #[serde(rename = "type")]
    pub maintenance_type: MaintenanceType,
    pub priority: MaintenancePriority,
    pub status: MaintenanceStatus,
    #[ts(as = "String")]
    pub scheduled_date: NaiveDate,
    #[ts(as = "Option<String>")]
    pub completed_date: Option<NaiveDate>,
    pub assigned_to: String,
    /// Estimated cost.
    pub cost: f64,
    pub actual_cost: Option<f64>,
    /// Hours.
    pub estimated_duration: Option<f64>,
    /// Hours.
    pub actual_duration: Option<f64>,
}

impl MaintenanceRequest {
    /// `actual_cost − cost`, once an actual cost is known.
    pub fn cost_variance(&self) -> Option<f64> {
        self.actual_cost.map(|actual| actual - self.cost)
    }
}

// =============================================================================
// Marketing: Campaign & Lead
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    Digital,
    Email,
    Social,
    Print,
}

impl_labels!(CampaignType {
    Digital => "digital",
    Email => "email",
    Social => "social",
    Print => "print",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
    Draft,
}

impl_labels!(CampaignStatus {
    Active => "active",
    Paused => "paused",
    Completed => "completed",
    Draft => "draft",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub campaign_type: CampaignType,
    pub status: CampaignStatus,
    pub budget: f64,
    pub spent: f64,
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    #[ts(as = "String")]
    pub end_date: NaiveDate,
    pub target_audience: String,
    pub leads: u32,
    pub conversions: u32,
    /// Return on investment as entered by marketing, in percent.
    pub roi: f64,
    pub channels: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

impl_labels!(LeadStatus {
    New => "new",
    Contacted => "contacted",
    Qualified => "qualified",
    Converted => "converted",
    Lost => "lost",
});

impl LeadStatus {
    /// Leads that sales is still working.
    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, LeadStatus::New | LeadStatus::Contacted | LeadStatus::Qualified)
    }
}

/// A sales enquiry, optionally attributed to a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    pub status: LeadStatus,
    pub campaign_id: Option<String>,
    pub assigned_to: String,
    /// Property id the lead asked about.
    pub interested_in: Option<String>,
    pub notes: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Project
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    OnHold,
    Completed,
}

impl_labels!(ProjectStatus {
    Planning => "planning",
    InProgress => "in_progress",
    OnHold => "on_hold",
    Completed => "completed",
});

/// A construction or fit-out project with its own budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub location: String,
    pub status: ProjectStatus,
    pub budget: f64,
    pub spent: f64,
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    #[ts(as = "String")]
    pub end_date: NaiveDate,
    pub manager: String,
    /// Completion in percent (0-100).
    pub progress: u8,
}

// =============================================================================
// Unit Tests
// =============================================================================
