//! # Document Generation
//!
//! Plain-text sale contracts and invoices, built from the entity and the
//! records it references.
//!
//! ## Layout
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ COMPANY NAME                                               │
//! │ address lines                                              │
//! │ ══════════════════════════════════════════════════════════ │
//! │ SALE CONTRACT / INVOICE                  document number   │
//! │ ══════════════════════════════════════════════════════════ │
//! │ dates, status                                              │
//! │ parties (customer; unit and property for contracts)        │
//! │ amounts (terms for contracts; lines and totals for         │
//! │ invoices)                                                  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Referenced records are optional: when a lookup comes back empty the
//! document still renders, with the missing part marked.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use estate_core::money::format_amount;
use estate_core::{Contract, Customer, Invoice, Property, Unit};
use tracing::info;

use crate::error::ExportResult;

const WIDTH: usize = 64;
const LABEL_WIDTH: usize = 16;
const MISSING: &str = "(not on record)";

// =============================================================================
// Letterhead
// =============================================================================

/// Company details printed on every document.
#[derive(Debug, Clone, PartialEq)]
pub struct Letterhead {
    pub company_name: String,
    pub address_lines: Vec<String>,
    /// Currency for amounts that carry none of their own (contract values).
    pub currency: String,
    pub decimals: usize,
}

impl Letterhead {
    fn money(&self, amount: f64, currency: &str) -> String {
        format_amount(amount, currency, self.decimals)
    }

    fn write_header(&self, out: &mut String, title: &str, number: &str) {
        let _ = writeln!(out, "{}", self.company_name.to_uppercase());
        for line in &self.address_lines {
            let _ = writeln!(out, "{}", line);
        }
        rule(out, '=');
        let gap = WIDTH.saturating_sub(title.len() + number.len()).max(1);
        let _ = writeln!(out, "{}{}{}", title, " ".repeat(gap), number);
        rule(out, '=');
    }
}

/// The records a contract document joins.
#[derive(Debug, Clone, Copy)]
pub struct ContractParties<'a> {
    pub customer: Option<&'a Customer>,
    pub unit: Option<&'a Unit>,
    pub property: Option<&'a Property>,
}

// =============================================================================
// Contract
// =============================================================================

/// Renders a sale contract.
pub fn contract_document(
    letterhead: &Letterhead,
    contract: &Contract,
    parties: ContractParties<'_>,
) -> String {
    let mut out = String::new();
    letterhead.write_header(&mut out, "SALE CONTRACT", &contract.contract_number);

    field(&mut out, "Signed", &contract.signed_date.format("%Y-%m-%d").to_string());
    field(&mut out, "Status", contract.status.as_str());

    section(&mut out, "BUYER");
    write_customer(&mut out, parties.customer);

    section(&mut out, "UNIT");
    match parties.property {
        Some(property) => field(
            &mut out,
            "Property",
            &format!("{} ({})", property.name, property.location),
        ),
        None => field(&mut out, "Property", MISSING),
    }
    match parties.unit {
        Some(unit) => {
            field(&mut out, "Unit", &unit.unit_number);
            field(
                &mut out,
                "Type",
                &format!(
                    "{}, {} m², {} bed / {} bath, floor {}",
                    unit.unit_type, unit.size, unit.bedrooms, unit.bathrooms, unit.floor
                ),
            );
        }
        None => field(&mut out, "Unit", MISSING),
    }

    section(&mut out, "TERMS");
    field(
        &mut out,
        "Total value",
        &letterhead.money(contract.total_value, &letterhead.currency),
    );
    field(&mut out, "Payment terms", &contract.payment_terms);
    let review = match contract.reviewed_by.as_deref() {
        Some(reviewer) if contract.legal_reviewed => format!("reviewed by {}", reviewer),
        _ => "pending".to_string(),
    };
    field(&mut out, "Legal review", &review);

    if !contract.documents.is_empty() {
        section(&mut out, "ATTACHMENTS");
        for document in &contract.documents {
            let _ = writeln!(out, "  - {}", document);
        }
    }

    rule(&mut out, '-');
    let _ = writeln!(out, "Buyer signature: ____________________");
    let _ = writeln!(out, "For {}: ____________________", letterhead.company_name);
    out
}

// =============================================================================
// Invoice
// =============================================================================

/// Renders an invoice with its lines and totals.
pub fn invoice_document(
    letterhead: &Letterhead,
    invoice: &Invoice,
    customer: Option<&Customer>,
) -> String {
    let mut out = String::new();
    letterhead.write_header(&mut out, "INVOICE", &invoice.invoice_number);

    field(&mut out, "Issued", &invoice.issue_date.format("%Y-%m-%d").to_string());
    field(&mut out, "Due", &invoice.due_date.format("%Y-%m-%d").to_string());
    field(&mut out, "Status", invoice.status.as_str());

    section(&mut out, "BILL TO");
    match customer {
        Some(customer) => write_customer(&mut out, Some(customer)),
        None => field(&mut out, "Name", &invoice.customer_name),
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<28}{:>8}{:>14}{:>14}", "Description", "Qty", "Unit price", "Amount");
    rule(&mut out, '-');
    for item in &invoice.items {
        let _ = writeln!(
            out,
            "{:<28}{:>8}{:>14.*}{:>14.*}",
            truncate(&item.description, 27),
            item.quantity,
            letterhead.decimals,
            item.unit_price,
            letterhead.decimals,
            item.total()
        );
    }
    rule(&mut out, '-');

    let totals = invoice.totals();
    let currency = invoice.currency.as_str();
    field(&mut out, "Subtotal", &letterhead.money(totals.subtotal, currency));
    field(
        &mut out,
        &format!("Tax ({})", invoice.tax_rate),
        &letterhead.money(totals.tax, currency),
    );
    if totals.discount > 0.0 {
        field(&mut out, "Discount", &letterhead.money(-totals.discount, currency));
    }
    field(&mut out, "Total", &letterhead.money(totals.total, currency));

    if !invoice.payment_terms.is_empty() {
        let _ = writeln!(out);
        field(&mut out, "Payment terms", &invoice.payment_terms);
    }
    if let Some(notes) = invoice.notes.as_deref().filter(|n| !n.is_empty()) {
        field(&mut out, "Notes", notes);
    }
    out
}

// =============================================================================
// Files
// =============================================================================

/// `contract-<number>.txt`
pub fn contract_file_name(contract: &Contract) -> String {
    format!("contract-{}.txt", contract.contract_number)
}

/// `invoice-<number>.txt`
pub fn invoice_file_name(invoice: &Invoice) -> String {
    format!("invoice-{}.txt", invoice.invoice_number)
}

/// Writes a rendered document into `dir`, creating it when needed.
pub fn write_document(dir: &Path, file_name: &str, text: &str) -> ExportResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, text)?;

    info!(path = %path.display(), "Document written");
    Ok(path)
}

// =============================================================================
// Layout Helpers
// =============================================================================

fn rule(out: &mut String, ch: char) {
    let _ = writeln!(out, "{}", ch.to_string().repeat(WIDTH));
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {:<width$}{}", format!("{}:", label), value, width = LABEL_WIDTH);
}

fn write_customer(out: &mut String, customer: Option<&Customer>) {
    let Some(customer) = customer else {
        field(out, "Name", MISSING);
        return;
    };
    field(out, "Name", &customer.name);
    field(out, "Email", &customer.email);
    field(out, "Phone", &customer.phone);
    if !customer.address.is_empty() {
        field(out, "Address", &customer.address);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use estate_core::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn letterhead() -> Letterhead {
        Letterhead {
            company_name: "Nile Estates".to_string(),
            address_lines: vec!["90 Corniche El Nil".to_string(), "Cairo".to_string()],
            currency: "EGP".to_string(),
            decimals: 2,
        }
    }

    fn customer() -> Customer {
        Customer {
            id: "c1".to_string(),
            name: "Ahmed Hassan".to_string(),
            email: "ahmed@example.com".to_string(),
            phone: "+20 100 123 4567".to_string(),
            address: "12 Tahrir St".to_string(),
            customer_type: CustomerType::Individual,
            status: CustomerStatus::Customer,
            source: "referral".to_string(),
            assigned_to: "Sara".to_string(),
            notes: String::new(),
            created_at: Utc::now(),
            last_contact: None,
            total_spent: 0.0,
            properties: vec![],
        }
    }

    fn contract() -> Contract {
        Contract {
            id: "k1".to_string(),
            customer_id: "c1".to_string(),
            unit_id: "u1".to_string(),
            contract_number: "CNT-2024-000001".to_string(),
            signed_date: date(2024, 3, 12),
            total_value: 2_750_000.0,
            payment_terms: "10% down, quarterly cheques".to_string(),
            status: ContractStatus::Signed,
            documents: vec!["contract-a101.pdf".to_string()],
            legal_reviewed: true,
            reviewed_by: Some("Hany Legal".to_string()),
        }
    }

    fn invoice() -> Invoice {
        Invoice {
            id: "i1".to_string(),
            invoice_number: "INV-2024-000007".to_string(),
            customer_id: "c1".to_string(),
            customer_name: "Ahmed Hassan".to_string(),
            items: vec![InvoiceItem {
                description: "Maintenance fee".to_string(),
                quantity: 2.0,
                unit_price: 100.0,
            }],
            tax_rate: TaxRate::new(15.0).unwrap(),
            discount: 10.0,
            currency: "EGP".to_string(),
            issue_date: date(2024, 5, 1),
            due_date: date(2024, 5, 31),
            status: InvoiceStatus::Sent,
            payment_terms: "Net 30".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_contract_document() {
        let buyer = customer();
        let text = contract_document(
            &letterhead(),
            &contract(),
            ContractParties {
                customer: Some(&buyer),
                unit: None,
                property: None,
            },
        );

        assert!(text.starts_with("NILE ESTATES\n90 Corniche El Nil\nCairo\n"));
        assert!(text.contains("SALE CONTRACT"));
        assert!(text.contains("CNT-2024-000001"));
        assert!(text.contains("Ahmed Hassan"));
        assert!(text.contains("EGP 2750000.00"));
        assert!(text.contains("reviewed by Hany Legal"));
        assert!(text.contains(&format!("  {:<16}{}", "Unit:", MISSING)));
        assert!(text.contains("  - contract-a101.pdf"));
    }

    #[test]
    fn test_unreviewed_contract() {
        let mut draft = contract();
        draft.legal_reviewed = false;
        draft.reviewed_by = None;
        let text = contract_document(
            &letterhead(),
            &draft,
            ContractParties {
                customer: None,
                unit: None,
                property: None,
            },
        );
        assert!(text.contains("Legal review:   pending"));
    }

    #[test]
    fn test_invoice_document_totals() {
        let buyer = customer();
        let text = invoice_document(&letterhead(), &invoice(), Some(&buyer));

        assert!(text.contains("INV-2024-000007"));
        assert!(text.contains("Maintenance fee"));
        assert!(text.contains("EGP 200.00"));
        assert!(text.contains("Tax (15%):"));
        assert!(text.contains("EGP 30.00"));
        assert!(text.contains("-EGP 10.00"));
        assert!(text.contains("Total:          EGP 220.00"));
        assert!(text.contains("Net 30"));
    }

    #[test]
    fn test_invoice_without_customer_uses_snapshot() {
        let text = invoice_document(&letterhead(), &invoice(), None);
        assert!(text.contains("Name:           Ahmed Hassan"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_write_document() {
        let tmp = TempDir::new().unwrap();
        let doc = invoice();
        let text = invoice_document(&letterhead(), &doc, None);

        let path = write_document(tmp.path(), &invoice_file_name(&doc), &text).unwrap();

        assert_eq!(path, tmp.path().join("invoice-INV-2024-000007.txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), text);
    }
}
