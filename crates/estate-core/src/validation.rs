//! # Validation Module
//!
//! Field and entity validation for the back office.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Field validators (validate_required, validate_positive...)   │
//! │  ├── One field, one rule                                               │
//! │  └── Reused by every entity validator                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Entity validators (validate_customer, validate_invoice...)   │
//! │  ├── THIS MODULE: every rule that can be checked on the entity alone   │
//! │  └── Cross-field rules (cheque iff method, reviewedBy if reviewed)     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Entity Store (estate-store)                                  │
//! │  ├── Referenced ids must exist                                         │
//! │  └── Runs layer 2 on the merged copy before committing                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entity validators take the complete entity, so add and update go through
//! exactly the same checks.
//!
//! ## Usage
//! ```rust
//! use estate_core::validation::{validate_document_number, format_document_number};
//!
//! let number = format_document_number("CNT", 2024, 7);
//! assert_eq!(number, "CNT-2024-000007");
//! assert!(validate_document_number("CNT", &number).is_ok());
//! assert!(validate_document_number("CNT", "CNT-24-7").is_err());
//! ```

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::types::{
    Campaign, ChequeDetails, ChequeStatus, Contract, Customer, InventoryItem, Invoice, Lead, MaintenanceRequest,
    MaintenanceStatus, PaymentMethod, Project, Property, Transaction, Unit,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted name or title.
pub const MAX_NAME_LENGTH: usize = 200;

/// Digits in the sequence part of a contract/invoice number.
pub const DOCUMENT_SEQUENCE_DIGITS: usize = 6;

// =============================================================================
// String Validators
// =============================================================================

/// Rejects empty or whitespace-only text.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Validates a name or title.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use estate_core::validation::validate_name;
///
/// assert!(validate_name("name", "Palm Hills Residence").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// assert!(validate_name("name", &"x".repeat(201)).is_err());
/// ```
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    validate_required(field, value)?;

    if value.trim().chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Loose email shape check: `local@domain.tld`, no whitespace.
pub fn validate_email(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();
    validate_required(field, value)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    if value.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    match value.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.') =>
        {
            Ok(())
        }
        _ => Err(invalid("expected an address like name@example.com")),
    }
}

/// Validates an entity id (UUID text).
pub fn validate_uuid(field: &str, value: &str) -> ValidationResult<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Value must be finite and strictly greater than zero.
pub fn validate_positive(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Value must be finite and zero or more.
pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Value must lie in `min..=max`.
pub fn validate_range(field: &str, value: f64, min: f64, max: f64) -> ValidationResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// `later` must fall strictly after `earlier`.
pub fn validate_date_order(
    earlier_field: &str,
    earlier: NaiveDate,
    later_field: &str,
    later: NaiveDate,
) -> ValidationResult<()> {
    if later <= earlier {
        return Err(date_order(earlier_field, later_field));
    }
    Ok(())
}

/// `later` must not fall before `earlier` (same day allowed).
pub fn validate_not_before(
    earlier_field: &str,
    earlier: NaiveDate,
    later_field: &str,
    later: NaiveDate,
) -> ValidationResult<()> {
    if later < earlier {
        return Err(date_order(earlier_field, later_field));
    }
    Ok(())
}

fn date_order(earlier: &str, later: &str) -> ValidationError {
    ValidationError::DateOrder {
        earlier: earlier.to_string(),
        later: later.to_string(),
    }
}

// =============================================================================
// Document Numbers
// =============================================================================

/// Formats `PREFIX-YYYY-NNNNNN`.
pub fn format_document_number(prefix: &str, year: i32, sequence: u32) -> String {
    format!(
        "{}-{:04}-{:0width$}",
        prefix,
        year,
        sequence,
        width = DOCUMENT_SEQUENCE_DIGITS
    )
}

/// Checks a contract/invoice number and returns its `(year, sequence)`.
///
/// ## Format
/// ```text
/// CNT-2024-000123
/// ─┬─ ─┬── ──┬───
///  │   │     └── 6-digit sequence
///  │   └──────── 4-digit year
///  └──────────── document prefix
/// ```
pub fn validate_document_number(prefix: &str, value: &str) -> ValidationResult<(i32, u32)> {
    let invalid = || ValidationError::InvalidFormat {
        field: "documentNumber".to_string(),
        reason: format!("expected {}-YYYY-NNNNNN", prefix),
    };

    let mut parts = value.trim().split('-');
    let (head, year, sequence) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(head), Some(year), Some(sequence), None) => (head, year, sequence),
        _ => return Err(invalid()),
    };

    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if head != prefix
        || year.len() != 4
        || sequence.len() != DOCUMENT_SEQUENCE_DIGITS
        || !all_digits(year)
        || !all_digits(sequence)
    {
        return Err(invalid());
    }

    let year = year.parse().map_err(|_| invalid())?;
    let sequence = sequence.parse().map_err(|_| invalid())?;
    Ok((year, sequence))
}

// =============================================================================
// Entity Validators
// =============================================================================

pub fn validate_customer(customer: &Customer) -> ValidationResult<()> {
    validate_name("name", &customer.name)?;
    validate_email("email", &customer.email)?;
    validate_required("phone", &customer.phone)?;
    validate_non_negative("totalSpent", customer.total_spent)?;
    Ok(())
}

/// ## Rules
/// - `totalUnits > 0`, `basePrice > 0`
/// - `availableUnits + soldUnits + reservedUnits ≤ totalUnits`
pub fn validate_property(property: &Property) -> ValidationResult<()> {
    validate_name("name", &property.name)?;
    validate_required("location", &property.location)?;

    if property.total_units == 0 {
        return Err(ValidationError::MustBePositive {
            field: "totalUnits".to_string(),
        });
    }
    validate_positive("basePrice", property.base_price)?;

    if property.allocated_units() > property.total_units as u64 {
        return Err(ValidationError::OutOfRange {
            field: "availableUnits + soldUnits + reservedUnits".to_string(),
            min: 0.0,
            max: property.total_units as f64,
        });
    }

    Ok(())
}

/// Reference checks (`propertyId`, `customerId` exist) happen in the store.
pub fn validate_unit(unit: &Unit) -> ValidationResult<()> {
    validate_required("propertyId", &unit.property_id)?;
    validate_required("unitNumber", &unit.unit_number)?;
    validate_non_negative("size", unit.size)?;
    validate_positive("price", unit.price)?;

    let has_customer = unit
        .customer_id
        .as_deref()
        .is_some_and(|id| !id.trim().is_empty());
    if unit.status.requires_customer() && !has_customer {
        return Err(ValidationError::conditional(
            "customerId",
            format!("the unit is {}", unit.status),
        ));
    }

    Ok(())
}

/// ## Rules
/// - `amount > 0`
/// - `chequeDetails` present iff `paymentMethod = cheque`
/// - cheque side fields agree with its status (see [`validate_cheque_details`])
pub fn validate_transaction(transaction: &Transaction) -> ValidationResult<()> {
    validate_required("customerId", &transaction.customer_id)?;
    validate_positive("amount", transaction.amount)?;
    validate_required("currency", &transaction.currency)?;

    match (transaction.payment_method, &transaction.cheque_details) {
        (PaymentMethod::Cheque, None) => Err(ValidationError::conditional(
            "chequeDetails",
            "paymentMethod is cheque",
        )),
        (PaymentMethod::Cheque, Some(cheque)) => validate_cheque_details(cheque),
        (method, Some(_)) => Err(ValidationError::InvalidFormat {
            field: "chequeDetails".to_string(),
            reason: format!("not allowed for payment method {}", method),
        }),
        (_, None) => Ok(()),
    }
}

/// ## Rules
/// - `chequeNumber`, `bankName` required
/// - `cleared` / `bounced` carry a `bankProcessedDate`
/// - `bounced` carries a non-empty `bounceReason`
pub fn validate_cheque_details(cheque: &ChequeDetails) -> ValidationResult<()> {
    validate_required("chequeNumber", &cheque.cheque_number)?;
    validate_required("bankName", &cheque.bank_name)?;

    let processed = matches!(cheque.status, ChequeStatus::Cleared | ChequeStatus::Bounced);
    if processed && cheque.bank_processed_date.is_none() {
        return Err(ValidationError::conditional(
            "bankProcessedDate",
            format!("the cheque is {}", cheque.status),
        ));
    }

    let has_reason = cheque
        .bounce_reason
        .as_deref()
        .is_some_and(|reason| !reason.trim().is_empty());
    if cheque.status == ChequeStatus::Bounced && !has_reason {
        return Err(ValidationError::conditional("bounceReason", "the cheque bounced"));
    }

    Ok(())
}

pub fn validate_contract(contract: &Contract) -> ValidationResult<()> {
    validate_required("customerId", &contract.customer_id)?;
    validate_required("unitId", &contract.unit_id)?;
    validate_positive("totalValue", contract.total_value)?;

    let reviewer = contract
        .reviewed_by
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());
    if contract.legal_reviewed && !reviewer {
        return Err(ValidationError::conditional(
            "reviewedBy",
            "legalReviewed is set",
        ));
    }

    Ok(())
}

/// ## Rules
/// - `dueDate ≥ issueDate`, `discount ≥ 0`
/// - `taxRate` within 0-100 (deserialized rates skip [`TaxRate::new`](crate::money::TaxRate::new))
/// - every line: description present, `quantity > 0`, `unitPrice ≥ 0`
pub fn validate_invoice(invoice: &Invoice) -> ValidationResult<()> {
    validate_required("customerId", &invoice.customer_id)?;
    validate_required("currency", &invoice.currency)?;
    validate_range("taxRate", invoice.tax_rate.percent(), 0.0, 100.0)?;
    validate_non_negative("discount", invoice.discount)?;
    validate_not_before("issueDate", invoice.issue_date, "dueDate", invoice.due_date)?;

    for item in &invoice.items {
        validate_required("items.description", &item.description)?;
        validate_positive("items.quantity", item.quantity)?;
        validate_non_negative("items.unitPrice", item.unit_price)?;
    }

    Ok(())
}

pub fn validate_inventory_item(item: &InventoryItem) -> ValidationResult<()> {
    validate_name("itemName", &item.item_name)?;
    validate_required("sku", &item.sku)?;
    validate_positive("unitPrice", item.unit_price)?;

    if item.max_stock < item.min_stock {
        return Err(ValidationError::OutOfRange {
            field: "maxStock".to_string(),
            min: item.min_stock as f64,
            max: u32::MAX as f64,
        });
    }

    Ok(())
}

/// ## Rules
/// - `completedDate` present iff status is completed, and not before
///   `scheduledDate`
/// - costs and durations are never negative
pub fn validate_maintenance(request: &MaintenanceRequest) -> ValidationResult<()> {
    validate_name("title", &request.title)?;
    validate_non_negative("cost", request.cost)?;

    if let Some(actual) = request.actual_cost {
        validate_non_negative("actualCost", actual)?;
    }
    if let Some(hours) = request.estimated_duration {
        validate_non_negative("estimatedDuration", hours)?;
    }
    if let Some(hours) = request.actual_duration {
        validate_non_negative("actualDuration", hours)?;
    }

    match (request.status, request.completed_date) {
        (MaintenanceStatus::Completed, None) => Err(ValidationError::conditional(
            "completedDate",
            "status is completed",
        )),
        (MaintenanceStatus::Completed, Some(done)) => validate_not_before(
            "scheduledDate",
            request.scheduled_date,
            "completedDate",
            done,
        ),
        (status, Some(_)) => Err(ValidationError::InvalidFormat {
            field: "completedDate".to_string(),
            reason: format!("not allowed while status is {}", status),
        }),
        (_, None) => Ok(()),
    }
}

pub fn validate_campaign(campaign: &Campaign) -> ValidationResult<()> {
    validate_name("name", &campaign.name)?;
    validate_positive("budget", campaign.budget)?;
    validate_non_negative("spent", campaign.spent)?;
    validate_date_order("startDate", campaign.start_date, "endDate", campaign.end_date)?;
    Ok(())
}

pub fn validate_lead(lead: &Lead) -> ValidationResult<()> {
    validate_name("name", &lead.name)?;
    if lead.email.trim().is_empty() && lead.phone.trim().is_empty() {
        return Err(ValidationError::conditional("email", "no phone is given"));
    }
    if !lead.email.trim().is_empty() {
        validate_email("email", &lead.email)?;
    }
    Ok(())
}

pub fn validate_project(project: &Project) -> ValidationResult<()> {
    validate_name("name", &project.name)?;
    validate_positive("budget", project.budget)?;
    validate_non_negative("spent", project.spent)?;
    validate_range("progress", project.progress as f64, 0.0, 100.0)?;
    validate_date_order("startDate", project.start_date, "endDate", project.end_date)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::TaxRate;
    use crate::types::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cheque() -> ChequeDetails {
        ChequeDetails {
            cheque_number: "000451".to_string(),
            bank_name: "Banque Misr".to_string(),
            branch_name: "Heliopolis".to_string(),
            account_number: "22001".to_string(),
            due_date: date(2024, 6, 1),
            status: ChequeStatus::Pending,
            bank_processed_date: None,
            bounce_reason: None,
        }
    }

    fn transaction(method: PaymentMethod, cheque_details: Option<ChequeDetails>) -> Transaction {
        Transaction {
            id: "t1".to_string(),
            customer_id: "c1".to_string(),
            customer_name: "Ahmed Hassan".to_string(),
            payee_details: "Installment 3".to_string(),
            amount: 25_000.0,
            currency: "EGP".to_string(),
            unit_id: None,
            payment_method: method,
            accountant: "Nour".to_string(),
            transaction_date: date(2024, 5, 1),
            due_date: None,
            status: TransactionStatus::Pending,
            comments: None,
            attachments: vec![],
            cheque_details,
        }
    }

    fn maintenance(status: MaintenanceStatus, completed: Option<NaiveDate>) -> MaintenanceRequest {
        MaintenanceRequest {
            id: "m1".to_string(),
            title: "Elevator service".to_string(),
            description: String::new(),
            property_id: None,
            maintenance_type: MaintenanceType::Preventive,
            priority: MaintenancePriority::Medium,
            status,
            scheduled_date: date(2024, 4, 10),
            completed_date: completed,
            assigned_to: "Team B".to_string(),
            cost: 3000.0,
            actual_cost: None,
            estimated_duration: Some(4.0),
            actual_duration: None,
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Ahmed").is_ok());
        assert_eq!(
            validate_name("name", ""),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(matches!(
            validate_name("name", &"a".repeat(201)),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "ahmed@example.com").is_ok());
        assert!(validate_email("email", "ahmed@example").is_err());
        assert!(validate_email("email", "ahmed example.com").is_err());
        assert!(validate_email("email", "@example.com").is_err());
        assert!(validate_email("email", "a@b@c.com").is_err());
    }

    #[test]
    fn test_numeric_validators() {
        assert!(validate_positive("amount", 0.01).is_ok());
        assert!(validate_positive("amount", 0.0).is_err());
        assert!(validate_positive("amount", f64::NAN).is_err());
        assert!(validate_non_negative("spent", 0.0).is_ok());
        assert!(validate_non_negative("spent", -1.0).is_err());
        assert!(validate_range("taxRate", 100.0, 0.0, 100.0).is_ok());
        assert!(validate_range("taxRate", 100.5, 0.0, 100.0).is_err());
    }

    #[test]
    fn test_date_order() {
        assert!(validate_date_order("startDate", date(2024, 1, 1), "endDate", date(2024, 1, 2)).is_ok());
        assert!(validate_date_order("startDate", date(2024, 1, 1), "endDate", date(2024, 1, 1)).is_err());
        assert!(validate_not_before("issueDate", date(2024, 1, 1), "dueDate", date(2024, 1, 1)).is_ok());
    }

    #[test]
    fn test_document_numbers() {
        assert_eq!(format_document_number("INV", 2024, 42), "INV-2024-000042");
        assert_eq!(validate_document_number("INV", "INV-2024-000042"), Ok((2024, 42)));
        assert!(validate_document_number("INV", "CNT-2024-000042").is_err());
        assert!(validate_document_number("INV", "INV-2024-42").is_err());
        assert!(validate_document_number("INV", "INV-2024-00004a").is_err());
        assert!(validate_document_number("INV", "INV-2024-000042-1").is_err());
    }

    #[test]
    fn test_validate_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(validate_uuid("id", &id.to_string()), Ok(id));
        assert!(validate_uuid("id", "not-a-uuid").is_err());
    }

    #[test]
    fn test_cheque_details_iff_cheque_method() {
        assert!(validate_transaction(&transaction(PaymentMethod::Cheque, Some(cheque()))).is_ok());
        assert!(validate_transaction(&transaction(PaymentMethod::Cash, None)).is_ok());
        assert!(matches!(
            validate_transaction(&transaction(PaymentMethod::Cheque, None)),
            Err(ValidationError::Conditional { .. })
        ));
        assert!(matches!(
            validate_transaction(&transaction(PaymentMethod::Instapay, Some(cheque()))),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_cheque_side_fields_follow_status() {
        let mut bounced = cheque();
        bounced.status = ChequeStatus::Bounced;
        bounced.bank_processed_date = Some(date(2024, 6, 3));
        assert_eq!(
            validate_cheque_details(&bounced),
            Err(ValidationError::conditional("bounceReason", "the cheque bounced"))
        );

        bounced.bounce_reason = Some("Insufficient funds".to_string());
        assert!(validate_cheque_details(&bounced).is_ok());

        let mut cleared = cheque();
        cleared.status = ChequeStatus::Cleared;
        assert!(matches!(
            validate_transaction(&transaction(PaymentMethod::Cheque, Some(cleared))),
            Err(ValidationError::Conditional { ref field, .. }) if field == "bankProcessedDate"
        ));
    }

    #[test]
    fn test_transaction_amount_positive() {
        let mut tx = transaction(PaymentMethod::Cash, None);
        tx.amount = 0.0;
        assert!(matches!(
            validate_transaction(&tx),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_contract_reviewer_required() {
        let mut contract = Contract {
            id: "k1".to_string(),
            customer_id: "c1".to_string(),
            unit_id: "u1".to_string(),
            contract_number: "CNT-2024-000001".to_string(),
            signed_date: date(2024, 3, 1),
            total_value: 2_000_000.0,
            payment_terms: "10% down, 7 years".to_string(),
            status: ContractStatus::Signed,
            documents: vec![],
            legal_reviewed: true,
            reviewed_by: None,
        };
        assert!(validate_contract(&contract).is_err());

        contract.reviewed_by = Some("Counsel Office".to_string());
        assert!(validate_contract(&contract).is_ok());
    }

    #[test]
    fn test_invoice_rules() {
        let mut invoice = Invoice {
            id: "i1".to_string(),
            invoice_number: "INV-2024-000001".to_string(),
            customer_id: "c1".to_string(),
            customer_name: "Ahmed Hassan".to_string(),
            items: vec![InvoiceItem {
                description: "Service charge".to_string(),
                quantity: 1.0,
                unit_price: 500.0,
            }],
            tax_rate: TaxRate::default(),
            discount: 0.0,
            currency: "EGP".to_string(),
            issue_date: date(2024, 1, 1),
            due_date: date(2024, 1, 31),
            status: InvoiceStatus::Draft,
            payment_terms: "Net 30".to_string(),
            notes: None,
        };
        assert!(validate_invoice(&invoice).is_ok());

        invoice.due_date = date(2023, 12, 31);
        assert!(matches!(
            validate_invoice(&invoice),
            Err(ValidationError::DateOrder { .. })
        ));

        invoice.due_date = date(2024, 1, 31);
        invoice.discount = -5.0;
        assert!(validate_invoice(&invoice).is_err());

        invoice.discount = 0.0;
        invoice.items[0].quantity = 0.0;
        assert!(validate_invoice(&invoice).is_err());
    }

    #[test]
    fn test_inventory_max_at_least_min() {
        let mut item = InventoryItem {
            id: "s1".to_string(),
            item_name: "PVC pipe 4in".to_string(),
            category: "Plumbing".to_string(),
            sku: "PVC-4".to_string(),
            quantity: 10,
            min_stock: 20,
            max_stock: 100,
            unit_price: 85.0,
            supplier: "El Sewedy".to_string(),
            location: "Store 2".to_string(),
            last_updated: Utc::now(),
        };
        assert!(validate_inventory_item(&item).is_ok());

        item.max_stock = 5;
        assert!(validate_inventory_item(&item).is_err());
    }

    #[test]
    fn test_maintenance_completed_date() {
        assert!(validate_maintenance(&maintenance(MaintenanceStatus::Pending, None)).is_ok());
        assert!(validate_maintenance(&maintenance(MaintenanceStatus::Completed, None)).is_err());
        assert!(validate_maintenance(&maintenance(
            MaintenanceStatus::Completed,
            Some(date(2024, 4, 12))
        ))
        .is_ok());
        assert!(validate_maintenance(&maintenance(
            MaintenanceStatus::Completed,
            Some(date(2024, 4, 9))
        ))
        .is_err());
        assert!(validate_maintenance(&maintenance(
            MaintenanceStatus::InProgress,
            Some(date(2024, 4, 12))
        ))
        .is_err());
    }

    #[test]
    fn test_project_dates_and_progress() {
        let mut project = Project {
            id: "pr1".to_string(),
            name: "Tower B fit-out".to_string(),
            location: "New Capital".to_string(),
            status: ProjectStatus::InProgress,
            budget: 10_000_000.0,
            spent: 2_500_000.0,
            start_date: date(2024, 1, 1),
            end_date: date(2025, 1, 1),
            manager: "Eng. Tarek".to_string(),
            progress: 25,
        };
        assert!(validate_project(&project).is_ok());

        project.progress = 120;
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::OutOfRange { .. })
        ));

        project.progress = 25;
        project.end_date = date(2023, 12, 1);
        assert!(validate_project(&project).is_err());
    }
}
