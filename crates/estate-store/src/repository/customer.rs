//! # Customer Repository
//!
//! `totalSpent` is whatever the office enters; it is never recomputed from
//! transactions. `properties` is kept free of duplicates.

use chrono::{DateTime, Utc};
use estate_core::validation::validate_customer;
use estate_core::{Customer, CustomerStatus, CustomerType};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{dedup_ids, merge_patch};
use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    pub status: CustomerStatus,
    pub source: String,
    pub assigned_to: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub last_contact: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub properties: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub customer_type: Option<CustomerType>,
    pub status: Option<CustomerStatus>,
    pub source: Option<String>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub last_contact: Option<Option<DateTime<Utc>>>,
    pub total_spent: Option<f64>,
    pub properties: Option<Vec<String>>,
}

impl EntityStore {
    /// Adds a customer. `createdAt` is stamped now.
    pub fn add_customer(&mut self, new: NewCustomer) -> StoreResult<Customer> {
        let customer = Customer {
            id: Self::next_id(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            address: new.address,
            customer_type: new.customer_type,
            status: new.status,
            source: new.source,
            assigned_to: new.assigned_to,
            notes: new.notes,
            created_at: Utc::now(),
            last_contact: new.last_contact,
            total_spent: new.total_spent,
            properties: dedup_ids(new.properties),
        };

        self.check_customer(&customer)?;

        debug!(id = %customer.id, name = %customer.name, "Adding customer");
        self.customers.push(customer.clone());
        Ok(customer)
    }

    /// Shallow-merges `patch` into the customer with `id`.
    ///
    /// Snapshots already taken on transactions and invoices keep the old
    /// name.
    pub fn update_customer(&mut self, id: &str, patch: CustomerPatch) -> StoreResult<Customer> {
        let current = self.customers.require(id)?;
        let mut customer = current.clone();

        merge_patch!(customer <- patch {
            name, email, phone, address, customer_type, status, source,
            assigned_to, notes, last_contact, total_spent, properties,
        });
        customer.properties = dedup_ids(customer.properties);

        if customer == *current {
            return Ok(customer);
        }

        self.check_customer(&customer)?;

        debug!(id = %customer.id, "Updating customer");
        self.customers.replace(customer.clone())?;
        Ok(customer)
    }

    fn check_customer(&self, customer: &Customer) -> StoreResult<()> {
        let result = validate_customer(customer)
            .map_err(StoreError::from)
            .and_then(|()| {
                customer
                    .properties
                    .iter()
                    .try_for_each(|property_id| self.require_property(property_id).map(|_| ()))
            });

        if let Err(err) = &result {
            warn!(id = %customer.id, error = %err, "Customer rejected");
        }
        result
    }
}
