//! # Report Aggregator
//!
//! Turns entity collections into flat, ordered rows ready for export.
//!
//! ## Report Shapes
//! ```text
//! ┌──────────┬──────────────────────────────┬──────────────────────────────┐
//! │ type     │ one row per                  │ columns                      │
//! ├──────────┼──────────────────────────────┼──────────────────────────────┤
//! │ revenue  │ completed Transaction        │ id customer amount date      │
//! │          │                              │ method currency              │
//! │ sales    │ sold Unit (+ Property,       │ unitId unitNumber property   │
//! │          │   Customer joined by id)     │ customer price soldAt        │
//! │ customer │ Customer                     │ stored fields                │
//! │ property │ Property                     │ stored fields                │
//! └──────────┴──────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! Rows come out in collection (insertion) order. Nothing is sorted, so
//! two exports of the same store are byte-identical.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ValidationError;
use crate::types::{Customer, Property, Transaction, TransactionStatus, Unit, UnitStatus};

// =============================================================================
// Report Type
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Revenue,
    Sales,
    Customer,
    Property,
}

impl ReportType {
    pub const ALL: [ReportType; 4] = [
        ReportType::Revenue,
        ReportType::Sales,
        ReportType::Customer,
        ReportType::Property,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Revenue => "revenue",
            ReportType::Sales => "sales",
            ReportType::Customer => "customer",
            ReportType::Property => "property",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "revenue" => Ok(ReportType::Revenue),
            "sales" => Ok(ReportType::Sales),
            "customer" | "customers" => Ok(ReportType::Customer),
            "property" | "properties" => Ok(ReportType::Property),
            other => Err(ValidationError::InvalidFormat {
                field: "reportType".to_string(),
                reason: format!(
                    "unknown report '{}'. Valid options: revenue, sales, customer, property",
                    other
                ),
            }),
        }
    }
}

// =============================================================================
// Rows
// =============================================================================

/// A scalar cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Flag(bool),
    Empty,
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportValue::Text(s) => f.write_str(s),
            ReportValue::Number(n) => write!(f, "{}", n),
            ReportValue::Integer(n) => write!(f, "{}", n),
            ReportValue::Flag(b) => write!(f, "{}", b),
            ReportValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for ReportValue {
    fn from(value: &str) -> Self {
        ReportValue::Text(value.to_string())
    }
}

impl From<String> for ReportValue {
    fn from(value: String) -> Self {
        ReportValue::Text(value)
    }
}

impl From<f64> for ReportValue {
    fn from(value: f64) -> Self {
        ReportValue::Number(value)
    }
}

impl From<u32> for ReportValue {
    fn from(value: u32) -> Self {
        ReportValue::Integer(value as i64)
    }
}

impl From<bool> for ReportValue {
    fn from(value: bool) -> Self {
        ReportValue::Flag(value)
    }
}

impl<T: Into<ReportValue>> From<Option<T>> for ReportValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ReportValue::Empty)
    }
}

/// One exported row: ordered `(column, value)` cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportRow {
    cells: Vec<(&'static str, ReportValue)>,
}

impl ReportRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a cell; builder style.
    pub fn cell(mut self, column: &'static str, value: impl Into<ReportValue>) -> Self {
        self.cells.push((column, value.into()));
        self
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|(column, _)| *column)
    }

    pub fn values(&self) -> impl Iterator<Item = &ReportValue> {
        self.cells.iter().map(|(_, value)| value)
    }

    pub fn get(&self, column: &str) -> Option<&ReportValue> {
        self.cells
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Borrowed view of the collections a report reads.
#[derive(Debug, Clone, Copy)]
pub struct ReportSource<'a> {
    pub customers: &'a [Customer],
    pub properties: &'a [Property],
    pub units: &'a [Unit],
    pub transactions: &'a [Transaction],
}

/// Builds the rows for `report_type`.
pub fn build_report(report_type: ReportType, source: &ReportSource<'_>) -> Vec<ReportRow> {
    match report_type {
        ReportType::Revenue => revenue_rows(source.transactions),
        ReportType::Sales => sales_rows(source),
        ReportType::Customer => source.customers.iter().map(customer_row).collect(),
        ReportType::Property => source.properties.iter().map(property_row).collect(),
    }
}

fn revenue_rows(transactions: &[Transaction]) -> Vec<ReportRow> {
    transactions
        .iter()
        .filter(|tx| tx.status == TransactionStatus::Completed)
        .map(|tx| {
            ReportRow::new()
                .cell("id", tx.id.as_str())
                .cell("customer", tx.customer_name.as_str())
                .cell("amount", tx.amount)
                .cell("date", tx.transaction_date.to_string())
                .cell("method", tx.payment_method.as_str())
                .cell("currency", tx.currency.as_str())
        })
        .collect()
}

fn sales_rows(source: &ReportSource<'_>) -> Vec<ReportRow> {
    let property_names: HashMap<&str, &str> = source
        .properties
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();
    let customer_names: HashMap<&str, &str> = source
        .customers
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    source
        .units
        .iter()
        .filter(|unit| unit.status == UnitStatus::Sold)
        .map(|unit| {
            let property = property_names.get(unit.property_id.as_str()).copied();
            let customer = unit
                .customer_id
                .as_deref()
                .and_then(|id| customer_names.get(id).copied());

            ReportRow::new()
                .cell("unitId", unit.id.as_str())
                .cell("unitNumber", unit.unit_number.as_str())
                .cell("property", property)
                .cell("customer", customer)
                .cell("price", unit.price)
                .cell("soldAt", unit.sold_at.map(|d| d.to_string()))
        })
        .collect()
}

fn customer_row(customer: &Customer) -> ReportRow {
    ReportRow::new()
        .cell("id", customer.id.as_str())
        .cell("name", customer.name.as_str())
        .cell("email", customer.email.as_str())
        .cell("phone", customer.phone.as_str())
        .cell("address", customer.address.as_str())
        .cell("type", customer.customer_type.as_str())
        .cell("status", customer.status.as_str())
        .cell("source", customer.source.as_str())
        .cell("assignedTo", customer.assigned_to.as_str())
        .cell("createdAt", customer.created_at.to_rfc3339())
        .cell("lastContact", customer.last_contact.map(|d| d.to_rfc3339()))
        .cell("totalSpent", customer.total_spent)
        .cell("properties", customer.properties.join(";"))
        .cell("notes", customer.notes.as_str())
}

fn property_row(property: &Property) -> ReportRow {
    ReportRow::new()
        .cell("id", property.id.as_str())
        .cell("name", property.name.as_str())
        .cell("type", property.property_type.as_str())
        .cell("location", property.location.as_str())
        .cell("description", property.description.as_str())
        .cell("totalUnits", property.total_units)
        .cell("availableUnits", property.available_units)
        .cell("soldUnits", property.sold_units)
        .cell("reservedUnits", property.reserved_units)
        .cell("basePrice", property.base_price)
        .cell("status", property.status.as_str())
        .cell("completionDate", property.completion_date.map(|d| d.to_string()))
        .cell("amenities", property.amenities.join(";"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CustomerStatus, CustomerType, PaymentMethod, PropertyStatus, PropertyType};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            phone: "+20 100 000 0000".to_string(),
            address: "Cairo".to_string(),
            customer_type: CustomerType::Individual,
            status: CustomerStatus::Customer,
            source: "referral".to_string(),
            assigned_to: "Sara".to_string(),
            notes: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap(),
            last_contact: None,
            total_spent: 0.0,
            properties: vec!["p1".to_string()],
        }
    }

    fn property(id: &str, name: &str) -> Property {
        Property {
            id: id.to_string(),
            name: name.to_string(),
            property_type: PropertyType::Commercial,
            location: "Sheikh Zayed".to_string(),
            description: "Mall, phase 2".to_string(),
            total_units: 40,
            available_units: 30,
            sold_units: 8,
            reserved_units: 2,
            base_price: 900_000.0,
            status: PropertyStatus::Ready,
            completion_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            images: vec![],
            amenities: vec!["parking".to_string(), "security".to_string()],
        }
    }

    fn unit(id: &str, status: UnitStatus, customer_id: Option<&str>) -> Unit {
        Unit {
            id: id.to_string(),
            property_id: "p1".to_string(),
            unit_number: format!("S-{}", id),
            unit_type: "shop".to_string(),
            size: 45.0,
            bedrooms: 0,
            bathrooms: 1,
            price: 950_000.0,
            status,
            floor: 0,
            facing: "main street".to_string(),
            customer_id: customer_id.map(str::to_string),
            sold_at: NaiveDate::from_ymd_opt(2024, 2, 1).filter(|_| status == UnitStatus::Sold),
        }
    }

    fn transaction(id: &str, status: TransactionStatus, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            customer_id: "c1".to_string(),
            customer_name: "Mona Adel".to_string(),
            payee_details: "Down payment".to_string(),
            amount,
            currency: "EGP".to_string(),
            unit_id: None,
            payment_method: PaymentMethod::BankTransfer,
            accountant: "Khaled".to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            due_date: None,
            status,
            comments: None,
            attachments: vec![],
            cheque_details: None,
        }
    }

    #[test]
    fn test_report_type_parsing() {
        assert_eq!("Revenue".parse::<ReportType>().unwrap(), ReportType::Revenue);
        assert_eq!("customers".parse::<ReportType>().unwrap(), ReportType::Customer);
        assert!("inventory".parse::<ReportType>().is_err());
        assert_eq!(ReportType::Sales.to_string(), "sales");
    }

    #[test]
    fn test_revenue_only_completed_in_order() {
        let transactions = vec![
            transaction("t1", TransactionStatus::Completed, 5000.0),
            transaction("t2", TransactionStatus::Pending, 7000.0),
            transaction("t3", TransactionStatus::Completed, 1500.5),
        ];
        let source = ReportSource {
            customers: &[],
            properties: &[],
            units: &[],
            transactions: &transactions,
        };

        let rows = build_report(ReportType::Revenue, &source);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].columns().collect::<Vec<_>>(),
            vec!["id", "customer", "amount", "date", "method", "currency"]
        );
        assert_eq!(rows[0].get("id"), Some(&ReportValue::from("t1")));
        assert_eq!(rows[1].get("id"), Some(&ReportValue::from("t3")));
        assert_eq!(rows[1].get("amount").unwrap().to_string(), "1500.5");
        assert_eq!(rows[0].get("method").unwrap().to_string(), "bank_transfer");
        assert_eq!(rows[0].get("date").unwrap().to_string(), "2024-02-10");
    }

    #[test]
    fn test_sales_joins_property_and_customer() {
        let customers = vec![customer("c1", "Mona Adel")];
        let properties = vec![property("p1", "Zayed Plaza")];
        let units = vec![
            unit("u1", UnitStatus::Sold, Some("c1")),
            unit("u2", UnitStatus::Available, None),
            unit("u3", UnitStatus::Sold, Some("missing")),
        ];
        let source = ReportSource {
            customers: &customers,
            properties: &properties,
            units: &units,
            transactions: &[],
        };

        let rows = build_report(ReportType::Sales, &source);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("property"), Some(&ReportValue::from("Zayed Plaza")));
        assert_eq!(rows[0].get("customer"), Some(&ReportValue::from("Mona Adel")));
        assert_eq!(rows[0].get("soldAt").unwrap().to_string(), "2024-02-01");
        assert_eq!(rows[1].get("customer"), Some(&ReportValue::Empty));
    }

    #[test]
    fn test_customer_and_property_rows() {
        let customers = vec![customer("c1", "Mona Adel"), customer("c2", "Omar Farouk")];
        let properties = vec![property("p1", "Zayed Plaza")];
        let source = ReportSource {
            customers: &customers,
            properties: &properties,
            units: &[],
            transactions: &[],
        };

        let rows = build_report(ReportType::Customer, &source);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("name"), Some(&ReportValue::from("Omar Farouk")));
        assert_eq!(rows[0].get("lastContact"), Some(&ReportValue::Empty));

        let rows = build_report(ReportType::Property, &source);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("totalUnits"), Some(&ReportValue::Integer(40)));
        assert_eq!(rows[0].get("amenities").unwrap().to_string(), "parking;security");
        assert_eq!(rows[0].get("basePrice").unwrap().to_string(), "900000");
    }

    #[test]
    fn test_empty_collections_give_no_rows() {
        let source = ReportSource {
            customers: &[],
            properties: &[],
            units: &[],
            transactions: &[],
        };
        for report_type in ReportType::ALL {
            assert!(build_report(report_type, &source).is_empty());
        }
    }
}
