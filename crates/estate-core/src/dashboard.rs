//! # Dashboard Rollup
//!
//! The headline counters of the back-office home screen. Every figure is
//! built from the same derivers the detail views use, so the dashboard and
//! the lists can never disagree.
//!
//! ```text
//! ┌──────────────┬───────────────────────────────────────────────────────────┐
//! │ Customers    │ count per status                                          │
//! │ Portfolio    │ portfolio::portfolio_rollup                               │
//! │ Payments     │ completed revenue, pending count                          │
//! │ Cheques      │ cheque::is_overdue / is_due_today / banner / week         │
//! │ Invoices     │ Invoice::is_overdue, Invoice::outstanding                 │
//! │ Inventory    │ InventoryItem::status                                     │
//! │ Operations   │ open maintenance, active campaigns / projects, open leads │
//! │ Campaigns    │ Campaign::metrics for every active campaign               │
//! └──────────────┴───────────────────────────────────────────────────────────┘
//! ```
//!
//! Money figures are kept per currency; amounts in different currencies are
//! never added together.

use chrono::NaiveDate;
use serde::Serialize;

use crate::cheque::{is_due_soon_banner, is_due_today, is_due_within_week};
use crate::finance::CampaignMetrics;
use crate::portfolio::{portfolio_rollup, PortfolioRollup};
use crate::types::{
    Campaign, CampaignStatus, Customer, CustomerStatus, InventoryItem, Invoice, Lead,
    MaintenanceRequest, Project, ProjectStatus, Property, StockStatus, Transaction,
    TransactionStatus, Unit,
};

/// Borrowed view of every collection the dashboard reads.
#[derive(Debug, Clone, Copy)]
pub struct DashboardSource<'a> {
    pub customers: &'a [Customer],
    pub properties: &'a [Property],
    pub units: &'a [Unit],
    pub transactions: &'a [Transaction],
    pub invoices: &'a [Invoice],
    pub inventory: &'a [InventoryItem],
    pub maintenance: &'a [MaintenanceRequest],
    pub campaigns: &'a [Campaign],
    pub leads: &'a [Lead],
    pub projects: &'a [Project],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCounts {
    pub total: usize,
    pub leads: usize,
    pub prospects: usize,
    pub customers: usize,
    pub inactive: usize,
}

/// Open cheques by due window. `due_this_week` overlaps `due_soon`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChequeCounts {
    pub overdue: usize,
    pub due_today: usize,
    pub due_soon: usize,
    pub due_this_week: usize,
}

/// A money total in one currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTotal {
    pub currency: String,
    pub amount: f64,
}

/// Sums `(currency, amount)` pairs per currency, in first-seen order.
pub fn totals_by_currency<'a, I>(amounts: I) -> Vec<CurrencyTotal>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut totals: Vec<CurrencyTotal> = Vec::new();
    for (currency, amount) in amounts {
        match totals.iter_mut().find(|total| total.currency == currency) {
            Some(total) => total.amount += amount,
            None => totals.push(CurrencyTotal {
                currency: currency.to_string(),
                amount,
            }),
        }
    }
    totals
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub name: String,
    pub metrics: CampaignMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub as_of: NaiveDate,
    pub customers: CustomerCounts,
    pub portfolio: PortfolioRollup,
    pub completed_revenue: Vec<CurrencyTotal>,
    pub completed_transactions: usize,
    pub pending_transactions: usize,
    pub cheques: ChequeCounts,
    pub overdue_invoices: usize,
    pub outstanding_amount: Vec<CurrencyTotal>,
    pub low_stock_items: usize,
    pub out_of_stock_items: usize,
    pub open_maintenance: usize,
    pub active_campaigns: usize,
    pub campaigns: Vec<CampaignSummary>,
    pub active_projects: usize,
    pub open_leads: usize,
}

/// Computes the dashboard as of `today`.
pub fn dashboard(source: &DashboardSource<'_>, today: NaiveDate) -> DashboardSummary {
    let mut customers = CustomerCounts {
        total: source.customers.len(),
        ..CustomerCounts::default()
    };
    for customer in source.customers {
        match customer.status {
            CustomerStatus::Lead => customers.leads += 1,
            CustomerStatus::Prospect => customers.prospects += 1,
            CustomerStatus::Customer => customers.customers += 1,
            CustomerStatus::Inactive => customers.inactive += 1,
        }
    }

    let completed: Vec<&Transaction> = source
        .transactions
        .iter()
        .filter(|tx| tx.status == TransactionStatus::Completed)
        .collect();

    let mut cheques = ChequeCounts::default();
    for cheque in source.transactions.iter().filter_map(Transaction::cheque) {
        if cheque.is_overdue(today) {
            cheques.overdue += 1;
        }
        if cheque.status.is_settled() {
            continue;
        }
        if is_due_today(cheque.due_date, today) {
            cheques.due_today += 1;
        }
        if is_due_soon_banner(cheque.due_date, today) {
            cheques.due_soon += 1;
        }
        if is_due_within_week(cheque.due_date, today) {
            cheques.due_this_week += 1;
        }
    }

    let stock = |status: StockStatus| {
        source
            .inventory
            .iter()
            .filter(|item| item.status() == status)
            .count()
    };

    let campaigns: Vec<CampaignSummary> = source
        .campaigns
        .iter()
        .filter(|campaign| campaign.status == CampaignStatus::Active)
        .map(|campaign| CampaignSummary {
            name: campaign.name.clone(),
            metrics: campaign.metrics(),
        })
        .collect();

    DashboardSummary {
        as_of: today,
        customers,
        portfolio: portfolio_rollup(source.properties, source.units),
        completed_revenue: totals_by_currency(
            completed.iter().map(|tx| (tx.currency.as_str(), tx.amount)),
        ),
        completed_transactions: completed.len(),
        pending_transactions: source
            .transactions
            .iter()
            .filter(|tx| tx.status == TransactionStatus::Pending)
            .count(),
        cheques,
        overdue_invoices: source
            .invoices
            .iter()
            .filter(|invoice| invoice.is_overdue(today))
            .count(),
        outstanding_amount: totals_by_currency(
            source
                .invoices
                .iter()
                .filter(|invoice| !invoice.status.is_closed())
                .map(|invoice| (invoice.currency.as_str(), invoice.outstanding())),
        ),
        low_stock_items: stock(StockStatus::LowStock),
        out_of_stock_items: stock(StockStatus::OutOfStock),
        open_maintenance: source
            .maintenance
            .iter()
            .filter(|request| request.status.is_open())
            .count(),
        active_campaigns: campaigns.len(),
        campaigns,
        active_projects: source
            .projects
            .iter()
            .filter(|project| project.status == ProjectStatus::InProgress)
            .count(),
        open_leads: source.leads.iter().filter(|lead| lead.status.is_open()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChequeDetails, ChequeStatus, PaymentMethod};
    use chrono::{Duration, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn cheque_tx(id: &str, offset: i64, status: ChequeStatus) -> Transaction {
        Transaction {
            id: id.to_string(),
            customer_id: "c1".to_string(),
            customer_name: "Ahmed Hassan".to_string(),
            payee_details: "Installment".to_string(),
            amount: 10_000.0,
            currency: "EGP".to_string(),
            unit_id: None,
            payment_method: PaymentMethod::Cheque,
            accountant: "Nour".to_string(),
            transaction_date: today() - Duration::days(30),
            due_date: None,
            status: TransactionStatus::Pending,
            comments: None,
            attachments: vec![],
            cheque_details: Some(ChequeDetails {
                cheque_number: id.to_string(),
                bank_name: "CIB".to_string(),
                branch_name: "Maadi".to_string(),
                account_number: "001".to_string(),
                due_date: today() + Duration::days(offset),
                status,
                bank_processed_date: None,
                bounce_reason: None,
            }),
        }
    }

    fn stock_item(quantity: u32) -> InventoryItem {
        InventoryItem {
            id: format!("s{}", quantity),
            item_name: "Paint 20L".to_string(),
            category: "Finishing".to_string(),
            sku: "PNT-20".to_string(),
            quantity,
            min_stock: 5,
            max_stock: 50,
            unit_price: 900.0,
            supplier: "Sipes".to_string(),
            location: "Warehouse A".to_string(),
            last_updated: Utc::now(),
        }
    }

    fn empty() -> DashboardSource<'static> {
        DashboardSource {
            customers: &[],
            properties: &[],
            units: &[],
            transactions: &[],
            invoices: &[],
            inventory: &[],
            maintenance: &[],
            campaigns: &[],
            leads: &[],
            projects: &[],
        }
    }

    #[test]
    fn test_empty_dashboard() {
        let summary = dashboard(&empty(), today());
        assert_eq!(summary.customers.total, 0);
        assert!(summary.completed_revenue.is_empty());
        assert!(summary.outstanding_amount.is_empty());
        assert_eq!(summary.portfolio, PortfolioRollup::default());
    }

    #[test]
    fn test_cheque_windows() {
        let transactions = vec![
            cheque_tx("a", -1, ChequeStatus::Pending),
            cheque_tx("b", -1, ChequeStatus::Cleared),
            cheque_tx("c", 0, ChequeStatus::SentToBank),
            cheque_tx("d", 2, ChequeStatus::Pending),
            cheque_tx("e", 5, ChequeStatus::Pending),
            cheque_tx("f", 5, ChequeStatus::Cancelled),
        ];
        let source = DashboardSource {
            transactions: &transactions,
            ..empty()
        };

        let summary = dashboard(&source, today());
        assert_eq!(summary.cheques.overdue, 1);
        assert_eq!(summary.cheques.due_today, 1);
        assert_eq!(summary.cheques.due_soon, 1);
        assert_eq!(summary.cheques.due_this_week, 2);
        assert_eq!(summary.pending_transactions, 6);
    }

    #[test]
    fn test_stock_counts() {
        let inventory = vec![stock_item(0), stock_item(3), stock_item(5), stock_item(40)];
        let source = DashboardSource {
            inventory: &inventory,
            ..empty()
        };

        let summary = dashboard(&source, today());
        assert_eq!(summary.out_of_stock_items, 1);
        assert_eq!(summary.low_stock_items, 2);
    }

    #[test]
    fn test_revenue_split_by_currency() {
        let mut transactions = vec![
            cheque_tx("a", -10, ChequeStatus::Cleared),
            cheque_tx("b", -5, ChequeStatus::Cleared),
            cheque_tx("c", -3, ChequeStatus::Cleared),
            cheque_tx("d", -1, ChequeStatus::Pending),
        ];
        transactions[1].currency = "USD".to_string();
        transactions[1].amount = 2_500.0;
        for tx in &mut transactions[..3] {
            tx.status = TransactionStatus::Completed;
        }
        let source = DashboardSource {
            transactions: &transactions,
            ..empty()
        };

        let summary = dashboard(&source, today());
        assert_eq!(summary.completed_transactions, 3);
        assert_eq!(
            summary.completed_revenue,
            vec![
                CurrencyTotal {
                    currency: "EGP".to_string(),
                    amount: 20_000.0
                },
                CurrencyTotal {
                    currency: "USD".to_string(),
                    amount: 2_500.0
                },
            ]
        );
    }
}
