//! # Sample Dataset
//!
//! The back office starts from an in-memory sample dataset. Everything is
//! created through the normal `add_*` operations, so the sample obeys the
//! same rules as operator input.
//!
//! ## What Gets Created
//! ```text
//! ┌──────────────────────┬───────────────────────────────────────────────┐
//! │ Properties (3)       │ residential compound, tower, commercial mall │
//! │ Units (8)            │ sold, reserved, available, maintenance        │
//! │ Customers (5)        │ every status, individual and corporate        │
//! │ Transactions (8)     │ cash, transfer, instapay, five cheques        │
//! │ Contracts (2)        │ one legally reviewed                          │
//! │ Invoices (3)         │ paid, sent, overdue                           │
//! │ Inventory (5)        │ in stock, low stock, out of stock             │
//! │ Maintenance (3)      │ pending, in progress, completed               │
//! │ Campaigns (2)        │ one over budget                               │
//! │ Leads (3), Projects (2)                                              │
//! └──────────────────────┴───────────────────────────────────────────────┘
//! ```
//!
//! Dates are laid out around `today` so every cheque window and the
//! overdue rules have something to show.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use estate_core::*;
use tracing::info;

use crate::error::StoreResult;
use crate::repository::contract::NewContract;
use crate::repository::customer::NewCustomer;
use crate::repository::inventory::NewInventoryItem;
use crate::repository::invoice::NewInvoice;
use crate::repository::maintenance::NewMaintenanceRequest;
use crate::repository::marketing::{NewCampaign, NewLead};
use crate::repository::project::NewProject;
use crate::repository::property::{NewProperty, NewUnit};
use crate::repository::transaction::NewTransaction;
use crate::store::EntityStore;

const CURRENCY: &str = "EGP";

/// Builds the sample store relative to `today`.
pub fn sample_store(today: NaiveDate) -> StoreResult<EntityStore> {
    let mut store = EntityStore::new().with_as_of(today);
    seed(&mut store, today)?;
    Ok(store)
}

/// Adds the sample dataset to `store`.
pub fn seed(store: &mut EntityStore, today: NaiveDate) -> StoreResult<()> {
    let day = |offset: i64| today + Duration::days(offset);

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------
    let palm = store.add_property(NewProperty {
        name: "Palm Hills Residence".to_string(),
        property_type: PropertyType::Residential,
        location: "6th of October City".to_string(),
        description: "Gated compound, phase 1".to_string(),
        total_units: 120,
        available_units: 80,
        sold_units: 25,
        reserved_units: 15,
        base_price: 2_500_000.0,
        status: PropertyStatus::Construction,
        completion_date: Some(day(540)),
        images: vec![],
        amenities: vec!["pool".to_string(), "gym".to_string(), "security".to_string()],
    })?;

    let nile = store.add_property(NewProperty {
        name: "Nile View Tower".to_string(),
        property_type: PropertyType::Residential,
        location: "Maadi, Cairo".to_string(),
        description: "22-floor tower, river side".to_string(),
        total_units: 80,
        available_units: 40,
        sold_units: 35,
        reserved_units: 5,
        base_price: 4_200_000.0,
        status: PropertyStatus::Ready,
        completion_date: Some(day(-200)),
        images: vec![],
        amenities: vec!["parking".to_string(), "concierge".to_string()],
    })?;

    let plaza = store.add_property(NewProperty {
        name: "Zayed Business Plaza".to_string(),
        property_type: PropertyType::Commercial,
        location: "Sheikh Zayed".to_string(),
        description: "Retail and offices, phase 2".to_string(),
        total_units: 40,
        available_units: 30,
        sold_units: 8,
        reserved_units: 2,
        base_price: 900_000.0,
        status: PropertyStatus::Planning,
        completion_date: None,
        images: vec![],
        amenities: vec!["parking".to_string()],
    })?;

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------
    let customer = |name: &str, email: &str, kind: CustomerType, status: CustomerStatus, spent: f64, properties: Vec<String>| {
        NewCustomer {
            name: name.to_string(),
            email: email.to_string(),
            phone: "+20 100 555 0100".to_string(),
            address: "Cairo, Egypt".to_string(),
            customer_type: kind,
            status,
            source: "referral".to_string(),
            assigned_to: "Sara Mahmoud".to_string(),
            notes: String::new(),
            last_contact: Utc.with_ymd_and_hms(2024, 5, 20, 10, 30, 0).single(),
            total_spent: spent,
            properties,
        }
    };

    let ahmed = store.add_customer(customer(
        "Ahmed Hassan",
        "ahmed.hassan@example.com",
        CustomerType::Individual,
        CustomerStatus::Customer,
        1_250_000.0,
        vec![palm.id.clone()],
    ))?;
    let mona = store.add_customer(customer(
        "Mona Adel",
        "mona.adel@example.com",
        CustomerType::Individual,
        CustomerStatus::Customer,
        850_000.0,
        vec![nile.id.clone()],
    ))?;
    let delta = store.add_customer(customer(
        "Delta Trading, Co.",
        "accounts@delta-trading.example.com",
        CustomerType::Corporate,
        CustomerStatus::Prospect,
        0.0,
        vec![plaza.id.clone()],
    ))?;
    store.add_customer(customer(
        "Omar Farouk",
        "omar.farouk@example.com",
        CustomerType::Individual,
        CustomerStatus::Lead,
        0.0,
        vec![],
    ))?;
    store.add_customer(customer(
        "Layla Said",
        "layla.said@example.com",
        CustomerType::Individual,
        CustomerStatus::Inactive,
        0.0,
        vec![],
    ))?;

    // -------------------------------------------------------------------------
    // Units
    // -------------------------------------------------------------------------
    let unit = |property: &Property, number: &str, kind: &str, size: f64, price: f64, status: UnitStatus, owner: Option<&Customer>, sold_at: Option<NaiveDate>| {
        NewUnit {
            property_id: property.id.clone(),
            unit_number: number.to_string(),
            unit_type: kind.to_string(),
            size,
            bedrooms: if kind == "shop" { 0 } else { 3 },
            bathrooms: if kind == "shop" { 1 } else { 2 },
            price,
            status,
            floor: 1,
            facing: "north".to_string(),
            customer_id: owner.map(|c| c.id.clone()),
            sold_at,
        }
    };

    let a101 = store.add_unit(unit(&palm, "A-101", "apartment", 140.0, 2_750_000.0, UnitStatus::Sold, Some(&ahmed), Some(day(-90))))?;
    store.add_unit(unit(&palm, "A-102", "apartment", 140.0, 2_750_000.0, UnitStatus::Available, None, None))?;
    store.add_unit(unit(&palm, "V-07", "villa", 320.0, 7_900_000.0, UnitStatus::Maintenance, None, None))?;
    let n1504 = store.add_unit(unit(&nile, "15-04", "apartment", 180.0, 4_600_000.0, UnitStatus::Sold, Some(&mona), Some(day(-45))))?;
    store.add_unit(unit(&nile, "16-01", "penthouse", 260.0, 6_800_000.0, UnitStatus::Reserved, Some(&mona), None))?;
    store.add_unit(unit(&nile, "09-02", "apartment", 150.0, 4_100_000.0, UnitStatus::Available, None, None))?;
    store.add_unit(unit(&plaza, "S-12", "shop", 45.0, 950_000.0, UnitStatus::Reserved, Some(&delta), None))?;
    store.add_unit(unit(&plaza, "S-14", "shop", 60.0, 1_200_000.0, UnitStatus::Available, None, None))?;

    // -------------------------------------------------------------------------
    // Transactions
    // -------------------------------------------------------------------------
    let payment = |customer: &Customer, unit_id: Option<&str>, amount: f64, method: PaymentMethod, date: NaiveDate, status: TransactionStatus| {
        NewTransaction {
            customer_id: customer.id.clone(),
            payee_details: format!("Payment from {}", customer.name),
            amount,
            currency: CURRENCY.to_string(),
            unit_id: unit_id.map(str::to_string),
            payment_method: method,
            accountant: "Nour El-Din".to_string(),
            transaction_date: date,
            due_date: None,
            status,
            comments: None,
            attachments: vec![],
            cheque_details: None,
        }
    };
    let cheque = |number: &str, due_date: NaiveDate, status: ChequeStatus| ChequeDetails {
        cheque_number: number.to_string(),
        bank_name: "National Bank of Egypt".to_string(),
        branch_name: "Mohandessin".to_string(),
        account_number: "100200300".to_string(),
        due_date,
        status,
        bank_processed_date: if status == ChequeStatus::Cleared { Some(due_date) } else { None },
        bounce_reason: None,
    };
    let cheque_payment = |customer: &Customer, unit_id: &str, amount: f64, details: ChequeDetails| {
        let mut new = payment(customer, Some(unit_id), amount, PaymentMethod::Cheque, day(-60), TransactionStatus::Pending);
        new.due_date = Some(details.due_date);
        new.cheque_details = Some(details);
        new
    };

    store.add_transaction(payment(&ahmed, Some(&a101.id), 275_000.0, PaymentMethod::BankTransfer, day(-90), TransactionStatus::Completed))?;
    store.add_transaction(payment(&mona, Some(&n1504.id), 460_000.0, PaymentMethod::Cash, day(-45), TransactionStatus::Completed))?;
    store.add_transaction(payment(&delta, None, 50_000.0, PaymentMethod::Instapay, day(-3), TransactionStatus::Pending))?;
    store.add_transaction(cheque_payment(&ahmed, &a101.id, 120_000.0, cheque("000451", day(-5), ChequeStatus::Pending)))?;
    store.add_transaction(cheque_payment(&ahmed, &a101.id, 120_000.0, cheque("000452", day(-35), ChequeStatus::Cleared)))?;
    store.add_transaction(cheque_payment(&mona, &n1504.id, 200_000.0, cheque("771203", day(0), ChequeStatus::SentToBank)))?;
    store.add_transaction(cheque_payment(&mona, &n1504.id, 200_000.0, cheque("771204", day(2), ChequeStatus::Pending)))?;
    store.add_transaction(cheque_payment(&ahmed, &a101.id, 120_000.0, cheque("000453", day(5), ChequeStatus::Pending)))?;

    // -------------------------------------------------------------------------
    // Contracts & invoices
    // -------------------------------------------------------------------------
    store.add_contract(NewContract {
        customer_id: ahmed.id.clone(),
        unit_id: a101.id.clone(),
        signed_date: day(-90),
        total_value: 2_750_000.0,
        payment_terms: "10% down payment, balance in quarterly cheques over 7 years".to_string(),
        status: ContractStatus::Signed,
        documents: vec!["contract-a101.pdf".to_string()],
        legal_reviewed: true,
        reviewed_by: Some("Hany Legal Consultants".to_string()),
    })?;
    store.add_contract(NewContract {
        customer_id: mona.id.clone(),
        unit_id: n1504.id.clone(),
        signed_date: day(-45),
        total_value: 4_600_000.0,
        payment_terms: "10% down payment, balance over 8 years".to_string(),
        status: ContractStatus::PendingSignature,
        documents: vec![],
        legal_reviewed: false,
        reviewed_by: None,
    })?;

    let invoice = |customer: &Customer, description: &str, quantity: f64, unit_price: f64, issued: NaiveDate, status: InvoiceStatus| NewInvoice {
        customer_id: customer.id.clone(),
        items: vec![InvoiceItem {
            description: description.to_string(),
            quantity,
            unit_price,
        }],
        tax_rate: None,
        discount: 0.0,
        currency: CURRENCY.to_string(),
        issue_date: issued,
        due_date: issued + Duration::days(30),
        status,
        payment_terms: "Net 30".to_string(),
        notes: None,
    };

    store.add_invoice(invoice(&ahmed, "Club membership", 1.0, 12_000.0, day(-80), InvoiceStatus::Paid))?;
    store.add_invoice(invoice(&mona, "Maintenance fee (quarter)", 3.0, 2_500.0, day(-40), InvoiceStatus::Sent))?;
    store.add_invoice(invoice(&delta, "Reservation admin fee", 2.0, 1_500.0, day(-5), InvoiceStatus::Sent))?;

    // -------------------------------------------------------------------------
    // Inventory
    // -------------------------------------------------------------------------
    let stock = |name: &str, category: &str, sku: &str, quantity: u32, min_stock: u32, max_stock: u32, unit_price: f64| NewInventoryItem {
        item_name: name.to_string(),
        category: category.to_string(),
        sku: sku.to_string(),
        quantity,
        min_stock,
        max_stock,
        unit_price,
        supplier: "Cleopatra Group".to_string(),
        location: "Warehouse A".to_string(),
    };

    store.add_inventory_item(stock("Ceramic tiles 60x60", "Finishing", "TIL-6060", 450, 100, 1000, 12.5))?;
    store.add_inventory_item(stock("Interior paint 20L", "Finishing", "PNT-20", 8, 10, 60, 900.0))?;
    store.add_inventory_item(stock("PVC pipe 4in", "Plumbing", "PVC-4", 0, 20, 200, 85.0))?;
    store.add_inventory_item(stock("LED panel 60W", "Electrical", "LED-60", 75, 25, 150, 340.0))?;
    store.add_inventory_item(stock("Elevator door sensor", "Spare parts", "ELV-DS", 2, 2, 6, 4_800.0))?;

    // -------------------------------------------------------------------------
    // Maintenance
    // -------------------------------------------------------------------------
    let request = |title: &str, property: &Property, kind: MaintenanceType, priority: MaintenancePriority, status: MaintenanceStatus, scheduled: NaiveDate| NewMaintenanceRequest {
        title: title.to_string(),
        description: String::new(),
        property_id: Some(property.id.clone()),
        maintenance_type: kind,
        priority,
        status,
        scheduled_date: scheduled,
        completed_date: None,
        assigned_to: "Facilities Team".to_string(),
        cost: 5_000.0,
        actual_cost: None,
        estimated_duration: Some(6.0),
        actual_duration: None,
    };

    store.add_maintenance_request(request("Elevator quarterly service", &nile, MaintenanceType::Preventive, MaintenancePriority::Medium, MaintenanceStatus::Pending, day(3)))?;
    store.add_maintenance_request(request("Water leak, villa V-07", &palm, MaintenanceType::Emergency, MaintenancePriority::Urgent, MaintenanceStatus::InProgress, day(-1)))?;
    let mut done = request("Generator inspection", &nile, MaintenanceType::Corrective, MaintenancePriority::High, MaintenanceStatus::Completed, day(-20));
    done.completed_date = Some(day(-18));
    done.actual_cost = Some(6_200.0);
    done.actual_duration = Some(8.0);
    store.add_maintenance_request(done)?;

    // -------------------------------------------------------------------------
    // Marketing & projects
    // -------------------------------------------------------------------------
    let spring = store.add_campaign(NewCampaign {
        name: "Palm Hills launch".to_string(),
        campaign_type: CampaignType::Digital,
        status: CampaignStatus::Active,
        budget: 150_000.0,
        spent: 60_000.0,
        start_date: day(-30),
        end_date: day(60),
        target_audience: "Young families".to_string(),
        leads: 40,
        conversions: 8,
        roi: 35.0,
        channels: vec!["facebook".to_string(), "google".to_string()],
    })?;
    store.add_campaign(NewCampaign {
        name: "Plaza print run".to_string(),
        campaign_type: CampaignType::Print,
        status: CampaignStatus::Completed,
        budget: 20_000.0,
        spent: 24_000.0,
        start_date: day(-120),
        end_date: day(-60),
        target_audience: "Retail investors".to_string(),
        leads: 0,
        conversions: 0,
        roi: 0.0,
        channels: vec!["newspaper".to_string()],
    })?;

    let lead = |name: &str, email: &str, status: LeadStatus, campaign: Option<&Campaign>, property: Option<&Property>| NewLead {
        name: name.to_string(),
        email: email.to_string(),
        phone: "+20 122 000 0000".to_string(),
        source: if campaign.is_some() { "campaign" } else { "walk-in" }.to_string(),
        status,
        campaign_id: campaign.map(|c| c.id.clone()),
        assigned_to: "Sara Mahmoud".to_string(),
        interested_in: property.map(|p| p.id.clone()),
        notes: String::new(),
    };

    store.add_lead(lead("Karim Nabil", "karim.nabil@example.com", LeadStatus::New, Some(&spring), Some(&palm)))?;
    store.add_lead(lead("Hoda Samir", "hoda.samir@example.com", LeadStatus::Qualified, Some(&spring), Some(&palm)))?;
    store.add_lead(lead("Tamer Aziz", "tamer.aziz@example.com", LeadStatus::Lost, None, Some(&plaza)))?;

    store.add_project(NewProject {
        name: "Palm Hills phase 1 construction".to_string(),
        location: "6th of October City".to_string(),
        status: ProjectStatus::InProgress,
        budget: 180_000_000.0,
        spent: 72_000_000.0,
        start_date: day(-300),
        end_date: day(540),
        manager: "Eng. Tarek Fawzy".to_string(),
        progress: 40,
    })?;
    store.add_project(NewProject {
        name: "Plaza site preparation".to_string(),
        location: "Sheikh Zayed".to_string(),
        status: ProjectStatus::Planning,
        budget: 12_000_000.0,
        spent: 0.0,
        start_date: day(30),
        end_date: day(210),
        manager: "Eng. Rania Lotfy".to_string(),
        progress: 0,
    })?;

    info!(
        customers = store.customers().len(),
        properties = store.properties().len(),
        units = store.units().len(),
        transactions = store.transactions().len(),
        "Sample data loaded"
    );
    Ok(())
}
