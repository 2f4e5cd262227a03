//! Test fixtures: valid `New*` payloads with sensible defaults.

use chrono::NaiveDate;
use estate_core::*;

use super::customer::NewCustomer;
use super::inventory::NewInventoryItem;
use super::maintenance::NewMaintenanceRequest;
use super::marketing::{NewCampaign, NewLead};
use super::project::NewProject;
use super::property::{NewProperty, NewUnit};
use super::transaction::NewTransaction;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn new_customer(name: &str) -> NewCustomer {
    let handle = name.to_lowercase().replace(' ', ".");
    NewCustomer {
        name: name.to_string(),
        email: format!("{}@example.com", handle),
        phone: "+20 100 123 4567".to_string(),
        address: "12 Tahrir St, Cairo".to_string(),
        customer_type: CustomerType::Individual,
        status: CustomerStatus::Prospect,
        source: "referral".to_string(),
        assigned_to: "Sara".to_string(),
        notes: String::new(),
        last_contact: None,
        total_spent: 0.0,
        properties: vec![],
    }
}

pub fn new_property(name: &str) -> NewProperty {
    NewProperty {
        name: name.to_string(),
        property_type: PropertyType::Residential,
        location: "New Cairo".to_string(),
        description: "Gated compound".to_string(),
        total_units: 120,
        available_units: 120,
        sold_units: 0,
        reserved_units: 0,
        base_price: 2_500_000.0,
        status: PropertyStatus::Construction,
        completion_date: None,
        images: vec![],
        amenities: vec!["pool".to_string()],
    }
}

pub fn new_unit(property_id: &str, number: &str) -> NewUnit {
    NewUnit {
        property_id: property_id.to_string(),
        unit_number: number.to_string(),
        unit_type: "apartment".to_string(),
        size: 140.0,
        bedrooms: 3,
        bathrooms: 2,
        price: 2_750_000.0,
        status: UnitStatus::Available,
        floor: 1,
        facing: "garden".to_string(),
        customer_id: None,
        sold_at: None,
    }
}

pub fn new_transaction(customer_id: &str, method: PaymentMethod) -> NewTransaction {
    NewTransaction {
        customer_id: customer_id.to_string(),
        payee_details: "Installment".to_string(),
        amount: 50_000.0,
        currency: "EGP".to_string(),
        unit_id: None,
        payment_method: method,
        accountant: "Nour".to_string(),
        transaction_date: date(2024, 6, 1),
        due_date: None,
        status: TransactionStatus::Pending,
        comments: None,
        attachments: vec![],
        cheque_details: None,
    }
}

pub fn cheque_details(due_date: NaiveDate, status: ChequeStatus) -> ChequeDetails {
    ChequeDetails {
        cheque_number: "100234".to_string(),
        bank_name: "National Bank of Egypt".to_string(),
        branch_name: "Downtown".to_string(),
        account_number: "1234567890".to_string(),
        due_date,
        status,
        bank_processed_date: None,
        bounce_reason: None,
    }
}

pub fn new_inventory_item(sku: &str) -> NewInventoryItem {
    NewInventoryItem {
        item_name: "Ceramic tiles 60x60".to_string(),
        category: "Finishing".to_string(),
        sku: sku.to_string(),
        quantity: 50,
        min_stock: 10,
        max_stock: 100,
        unit_price: 12.5,
        supplier: "Cleopatra Ceramics".to_string(),
        location: "Warehouse A".to_string(),
    }
}

pub fn new_maintenance(property_id: Option<&str>) -> NewMaintenanceRequest {
    NewMaintenanceRequest {
        title: "Elevator service".to_string(),
        description: "Quarterly inspection".to_string(),
        property_id: property_id.map(str::to_string),
        maintenance_type: MaintenanceType::Preventive,
        priority: MaintenancePriority::Medium,
        status: MaintenanceStatus::Scheduled,
        scheduled_date: date(2024, 4, 10),
        completed_date: None,
        assigned_to: "Team B".to_string(),
        cost: 3_000.0,
        actual_cost: None,
        estimated_duration: Some(4.0),
        actual_duration: None,
    }
}

pub fn new_campaign(name: &str) -> NewCampaign {
    NewCampaign {
        name: name.to_string(),
        campaign_type: CampaignType::Digital,
        status: CampaignStatus::Active,
        budget: 5_000.0,
        spent: 0.0,
        start_date: date(2024, 3, 1),
        end_date: date(2024, 5, 1),
        target_audience: "First-time buyers".to_string(),
        leads: 0,
        conversions: 0,
        roi: 0.0,
        channels: vec!["facebook".to_string()],
    }
}

pub fn new_lead(campaign_id: Option<&str>) -> NewLead {
    NewLead {
        name: "Youssef Kamal".to_string(),
        email: "youssef.kamal@example.com".to_string(),
        phone: "+20 111 222 3333".to_string(),
        source: "facebook".to_string(),
        status: LeadStatus::New,
        campaign_id: campaign_id.map(str::to_string),
        assigned_to: "Sara".to_string(),
        interested_in: None,
        notes: String::new(),
    }
}

pub fn new_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        location: "New Capital".to_string(),
        status: ProjectStatus::InProgress,
        budget: 10_000_000.0,
        spent: 0.0,
        start_date: date(2024, 1, 1),
        end_date: date(2025, 1, 1),
        manager: "Eng. Tarek".to_string(),
        progress: 25,
    }
}
