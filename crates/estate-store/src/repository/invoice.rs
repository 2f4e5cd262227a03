//! # Invoice Repository
//!
//! Only the inputs of an invoice are stored (lines, tax rate, discount);
//! subtotal, tax and total are read through [`Invoice::totals`].
//!
//! Invoice numbers follow the contract scheme: `INV-<year of issueDate>-<seq>`.

use chrono::{Datelike, NaiveDate};
use estate_core::validation::validate_invoice;
use estate_core::{Invoice, InvoiceItem, InvoiceStatus, TaxRate};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{check_number_year, merge_patch};
use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub customer_id: String,
    pub items: Vec<InvoiceItem>,
    /// Falls back to the store's default rate.
    #[serde(default)]
    pub tax_rate: Option<TaxRate>,
    #[serde(default)]
    pub discount: f64,
    pub currency: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub payment_terms: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    pub customer_id: Option<String>,
    pub items: Option<Vec<InvoiceItem>>,
    pub tax_rate: Option<TaxRate>,
    pub discount: Option<f64>,
    pub currency: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<InvoiceStatus>,
    pub payment_terms: Option<String>,
    pub notes: Option<Option<String>>,
}

impl EntityStore {
    pub fn add_invoice(&mut self, new: NewInvoice) -> StoreResult<Invoice> {
        let customer_name = self.require_customer(&new.customer_id)?.name.clone();

        let invoice = Invoice {
            id: Self::next_id(),
            invoice_number: self.next_invoice_number(new.issue_date.year()),
            customer_id: new.customer_id,
            customer_name,
            items: new.items,
            tax_rate: new.tax_rate.unwrap_or(self.default_tax_rate),
            discount: new.discount,
            currency: new.currency,
            issue_date: new.issue_date,
            due_date: new.due_date,
            status: new.status,
            payment_terms: new.payment_terms,
            notes: new.notes,
        };

        self.check_invoice(&invoice)?;

        debug!(
            id = %invoice.id,
            number = %invoice.invoice_number,
            total = invoice.totals().total,
            "Adding invoice"
        );
        self.invoices.push(invoice.clone());
        Ok(invoice)
    }

    pub fn update_invoice(&mut self, id: &str, patch: InvoicePatch) -> StoreResult<Invoice> {
        let current = self.invoices.require(id)?;
        let mut invoice = current.clone();

        merge_patch!(invoice <- patch {
            customer_id, items, tax_rate, discount, currency, issue_date,
            due_date, status, payment_terms, notes,
        });

        if invoice == *current {
            return Ok(invoice);
        }

        let year = check_number_year(
            "issueDate",
            &invoice.invoice_number,
            current.issue_date,
            invoice.issue_date,
        );
        if let Err(err) = year {
            warn!(id = %invoice.id, error = %err, "Invoice rejected");
            return Err(err);
        }

        if invoice.customer_id != current.customer_id {
            invoice.customer_name = self.require_customer(&invoice.customer_id)?.name.clone();
        }

        self.check_invoice(&invoice)?;

        debug!(id = %invoice.id, status = %invoice.status, "Updating invoice");
        self.invoices.replace(invoice.clone())?;
        Ok(invoice)
    }

    fn check_invoice(&self, invoice: &Invoice) -> StoreResult<()> {
        let result = validate_invoice(invoice)
            .map_err(StoreError::from)
            .and_then(|()| self.require_customer(&invoice.customer_id).map(|_| ()));

        if let Err(err) = &result {
            warn!(id = %invoice.id, error = %err, "Invoice rejected");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::new_customer;
    use estate_core::ValidationError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_invoice(customer_id: &str) -> NewInvoice {
        NewInvoice {
            customer_id: customer_id.to_string(),
            items: vec![InvoiceItem {
                description: "Maintenance fee".to_string(),
                quantity: 2.0,
                unit_price: 100.0,
            }],
            tax_rate: None,
            discount: 10.0,
            currency: "EGP".to_string(),
            issue_date: date(2024, 1, 1),
            due_date: date(2024, 1, 31),
            status: InvoiceStatus::Draft,
            payment_terms: "Net 30".to_string(),
            notes: None,
        }
    }

    fn setup() -> (EntityStore, String) {
        let mut store = EntityStore::new();
        let customer = store.add_customer(new_customer("Ahmed Hassan")).unwrap();
        (store, customer.id)
    }

    #[test]
    fn test_invoice_totals_scenario() {
        let (mut store, customer_id) = setup();
        let invoice = store.add_invoice(new_invoice(&customer_id)).unwrap();

        let totals = invoice.totals();
        assert_eq!(totals.subtotal, 200.0);
        assert_eq!(totals.tax, 30.0);
        assert_eq!(totals.total, 220.0);
        assert_eq!(invoice.invoice_number, "INV-2024-000001");
        assert_eq!(invoice.customer_name, "Ahmed Hassan");
    }

    #[test]
    fn test_default_tax_rate_from_store() {
        let mut store = EntityStore::new().with_default_tax_rate(TaxRate::new(14.0).unwrap());
        let customer = store.add_customer(new_customer("Ahmed Hassan")).unwrap();
        let invoice = store.add_invoice(new_invoice(&customer.id)).unwrap();
        assert_eq!(invoice.tax_rate.percent(), 14.0);
    }

    #[test]
    fn test_totals_follow_item_changes() {
        let (mut store, customer_id) = setup();
        let invoice = store.add_invoice(new_invoice(&customer_id)).unwrap();

        let updated = store
            .update_invoice(
                &invoice.id,
                InvoicePatch {
                    items: Some(vec![InvoiceItem {
                        description: "Maintenance fee".to_string(),
                        quantity: 3.0,
                        unit_price: 100.0,
                    }]),
                    tax_rate: Some(TaxRate::zero()),
                    ..Default::default()
                },
            )
            .unwrap();

        let totals = updated.totals();
        assert_eq!(totals.subtotal, 300.0);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 290.0);
    }

    #[test]
    fn test_due_before_issue_rejected() {
        let (mut store, customer_id) = setup();
        let mut new = new_invoice(&customer_id);
        new.due_date = date(2023, 12, 1);
        assert!(store.add_invoice(new).is_err());
        assert!(store.invoices().is_empty());
    }

    #[test]
    fn test_invoice_numbers_sequential() {
        let (mut store, customer_id) = setup();
        let first = store.add_invoice(new_invoice(&customer_id)).unwrap();
        let second = store.add_invoice(new_invoice(&customer_id)).unwrap();
        assert_eq!(first.invoice_number, "INV-2024-000001");
        assert_eq!(second.invoice_number, "INV-2024-000002");
        assert_eq!(store.find_invoice("INV-2024-000002").unwrap().id, second.id);
    }

    #[test]
    fn test_deserialized_tax_rate_checked() {
        let (mut store, customer_id) = setup();
        let invoice = store.add_invoice(new_invoice(&customer_id)).unwrap();

        let patch: InvoicePatch = serde_json::from_str(r#"{"taxRate":150}"#).unwrap();
        let err = store.update_invoice(&invoice.id, patch).unwrap_err();
        assert!(matches!(
            err.validation(),
            Some(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(store.invoices()[0].tax_rate.percent(), 15.0);
    }

    #[test]
    fn test_unknown_customer() {
        let mut store = EntityStore::new();
        assert!(matches!(
            store.add_invoice(new_invoice("ghost")),
            Err(StoreError::UnknownReference { .. })
        ));
    }
}
