//! # Financial Rollup Deriver
//!
//! Invoice totals, budget utilization and marketing cost ratios.
//!
//! ## Invoice Totals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items ──► line total = qty × price   (negative / NaN inputs → 0)      │
//! │              │                                                          │
//! │              ▼                                                          │
//! │          subtotal = Σ line totals                                       │
//! │              │                                                          │
//! │              ├──► tax = subtotal × taxRate / 100                        │
//! │              ▼                                                          │
//! │          total = subtotal + tax − discount     (no floor at zero)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Budgets
//! Campaigns and projects share one rule: `remaining = max(0, budget − spent)`
//! and `utilization = spent / budget × 100` (0 when the budget is 0). Over
//! spending shows up as utilization above 100%, never as negative remaining.

use chrono::NaiveDate;
use serde::Serialize;

use crate::money::{coerce_amount, percentage, ratio, TaxRate};
use crate::types::{Campaign, Invoice, InvoiceItem, Project};

// =============================================================================
// Invoice Totals
// =============================================================================

/// The derived money figures of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub total: f64,
}

impl InvoiceItem {
    /// `quantity × unit_price`, with both inputs coerced to ≥ 0.
    ///
    /// ## Example
    /// ```rust
    /// use estate_core::InvoiceItem;
    ///
    /// let item = InvoiceItem {
    ///     description: "Maintenance fee".to_string(),
    ///     quantity: 2.0,
    ///     unit_price: 100.0,
    /// };
    /// assert_eq!(item.total(), 200.0);
    /// ```
    #[inline]
    pub fn total(&self) -> f64 {
        coerce_amount(self.quantity) * coerce_amount(self.unit_price)
    }
}

/// Computes invoice totals from its lines, tax rate and discount.
///
/// ## Example
/// ```rust
/// use estate_core::finance::invoice_totals;
/// use estate_core::money::TaxRate;
/// use estate_core::InvoiceItem;
///
/// let items = vec![InvoiceItem {
///     description: "Installment".to_string(),
///     quantity: 2.0,
///     unit_price: 100.0,
/// }];
/// let totals = invoice_totals(&items, TaxRate::new(15.0).unwrap(), 10.0);
/// assert_eq!(totals.subtotal, 200.0);
/// assert_eq!(totals.tax, 30.0);
/// assert_eq!(totals.total, 220.0);
/// ```
pub fn invoice_totals(items: &[InvoiceItem], tax_rate: TaxRate, discount: f64) -> InvoiceTotals {
    let subtotal: f64 = items.iter().map(InvoiceItem::total).sum();
    let tax = tax_rate.tax_on(subtotal);
    let discount = coerce_amount(discount);

    InvoiceTotals {
        subtotal,
        tax,
        discount,
        total: subtotal + tax - discount,
    }
}

impl Invoice {
    /// Current totals of this invoice.
    #[inline]
    pub fn totals(&self) -> InvoiceTotals {
        invoice_totals(&self.items, self.tax_rate, self.discount)
    }

    /// Past its due date and still expecting payment.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today && !self.status.is_closed()
    }

    /// Amount still expected: the total for open invoices, 0 once closed.
    pub fn outstanding(&self) -> f64 {
        if self.status.is_closed() {
            0.0
        } else {
            self.totals().total
        }
    }
}

// =============================================================================
// Budget Rollup
// =============================================================================

/// Spend against a budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRollup {
    pub budget: f64,
    pub spent: f64,
    /// `max(0, budget − spent)`
    pub remaining: f64,
    /// `spent / budget × 100`, 0 when the budget is 0.
    pub utilization_percent: f64,
}

impl BudgetRollup {
    /// Computes the rollup for a budget and the amount spent so far.
    ///
    /// ## Example
    /// ```rust
    /// use estate_core::finance::BudgetRollup;
    ///
    /// let rollup = BudgetRollup::new(1000.0, 1200.0);
    /// assert_eq!(rollup.remaining, 0.0);
    /// assert_eq!(rollup.utilization_percent, 120.0);
    /// assert!(rollup.is_over_budget());
    /// ```
    pub fn new(budget: f64, spent: f64) -> Self {
        BudgetRollup {
            budget,
            spent,
            remaining: (budget - spent).max(0.0),
            utilization_percent: percentage(spent, budget),
        }
    }

    #[inline]
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }
}

// =============================================================================
// Campaign Metrics
// =============================================================================

/// Marketing figures derived from a campaign's raw counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignMetrics {
    pub budget: BudgetRollup,
    /// `None` when the campaign has no leads yet.
    pub cost_per_lead: Option<f64>,
    /// `None` when the campaign has no conversions yet.
    pub cost_per_conversion: Option<f64>,
    /// `conversions / leads × 100`, `None` without leads.
    pub conversion_rate: Option<f64>,
}

impl Campaign {
    pub fn budget_rollup(&self) -> BudgetRollup {
        BudgetRollup::new(self.budget, self.spent)
    }

    pub fn metrics(&self) -> CampaignMetrics {
        CampaignMetrics {
            budget: self.budget_rollup(),
            cost_per_lead: ratio(self.spent, self.leads as f64),
            cost_per_conversion: ratio(self.spent, self.conversions as f64),
            conversion_rate: ratio(self.conversions as f64, self.leads as f64).map(|r| r * 100.0),
        }
    }
}

impl Project {
    pub fn budget_rollup(&self) -> BudgetRollup {
        BudgetRollup::new(self.budget, self.spent)
    }
}

/// Formats an optional ratio the way reports show it ("N/A" when undefined).
pub fn display_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CampaignStatus, CampaignType, InvoiceStatus};

    fn line(quantity: f64, unit_price: f64) -> InvoiceItem {
        InvoiceItem {
            description: "Line".to_string(),
            quantity,
            unit_price,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(items: Vec<InvoiceItem>, status: InvoiceStatus) -> Invoice {
        Invoice {
            id: "inv".to_string(),
            invoice_number: "INV-2024-000001".to_string(),
            customer_id: "c1".to_string(),
            customer_name: "Ahmed Hassan".to_string(),
            items,
            tax_rate: TaxRate::default(),
            discount: 10.0,
            currency: "EGP".to_string(),
            issue_date: date(2024, 1, 1),
            due_date: date(2024, 1, 31),
            status,
            payment_terms: "Net 30".to_string(),
            notes: None,
        }
    }

    fn campaign(budget: f64, spent: f64, leads: u32, conversions: u32) -> Campaign {
        Campaign {
            id: "cmp".to_string(),
            name: "Spring launch".to_string(),
            campaign_type: CampaignType::Digital,
            status: CampaignStatus::Active,
            budget,
            spent,
            start_date: date(2024, 3, 1),
            end_date: date(2024, 5, 1),
            target_audience: "First-time buyers".to_string(),
            leads,
            conversions,
            roi: 0.0,
            channels: vec!["facebook".to_string()],
        }
    }

    #[test]
    fn test_invoice_scenario() {
        let totals = invoice(vec![line(2.0, 100.0)], InvoiceStatus::Sent).totals();
        assert_eq!(totals.subtotal, 200.0);
        assert_eq!(totals.tax, 30.0);
        assert_eq!(totals.total, 220.0);
    }

    #[test]
    fn test_invoice_total_formula() {
        let items = vec![line(3.0, 19.99), line(1.5, 200.0), line(7.0, 0.35)];
        for rate in [0.0, 5.0, 14.0, 15.0, 100.0] {
            for discount in [0.0, 10.0, 1_000.0] {
                let totals = invoice_totals(&items, TaxRate::new(rate).unwrap(), discount);
                let sum: f64 = items.iter().map(|i| i.quantity * i.unit_price).sum();
                let expected = sum + sum * (rate / 100.0) - discount;
                assert!((totals.total - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_invalid_line_inputs_coerce_to_zero() {
        assert_eq!(line(-2.0, 100.0).total(), 0.0);
        assert_eq!(line(2.0, -100.0).total(), 0.0);
        assert_eq!(line(f64::NAN, 100.0).total(), 0.0);
    }

    #[test]
    fn test_total_may_go_negative() {
        let totals = invoice_totals(&[line(1.0, 10.0)], TaxRate::zero(), 50.0);
        assert_eq!(totals.total, -40.0);
    }

    #[test]
    fn test_empty_invoice() {
        let totals = invoice_totals(&[], TaxRate::default(), 0.0);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_invoice_overdue_and_outstanding() {
        let today = date(2024, 2, 15);
        let sent = invoice(vec![line(2.0, 100.0)], InvoiceStatus::Sent);
        assert!(sent.is_overdue(today));
        assert_eq!(sent.outstanding(), 220.0);

        let paid = invoice(vec![line(2.0, 100.0)], InvoiceStatus::Paid);
        assert!(!paid.is_overdue(today));
        assert_eq!(paid.outstanding(), 0.0);

        assert!(!sent.is_overdue(date(2024, 1, 31)));
    }

    #[test]
    fn test_campaign_over_budget() {
        let rollup = campaign(1000.0, 1200.0, 0, 0).budget_rollup();
        assert_eq!(rollup.remaining, 0.0);
        assert_eq!(rollup.utilization_percent, 120.0);
        assert!(rollup.is_over_budget());
    }

    #[test]
    fn test_zero_budget_utilization() {
        let rollup = BudgetRollup::new(0.0, 50.0);
        assert_eq!(rollup.utilization_percent, 0.0);
        assert_eq!(rollup.remaining, 0.0);
    }

    #[test]
    fn test_campaign_cost_ratios() {
        let metrics = campaign(5000.0, 2000.0, 40, 8).metrics();
        assert_eq!(metrics.cost_per_lead, Some(50.0));
        assert_eq!(metrics.cost_per_conversion, Some(250.0));
        assert_eq!(metrics.conversion_rate, Some(20.0));

        let fresh = campaign(5000.0, 0.0, 0, 0).metrics();
        assert_eq!(fresh.cost_per_lead, None);
        assert_eq!(fresh.cost_per_conversion, None);
        assert_eq!(display_ratio(fresh.cost_per_lead), "N/A");
        assert_eq!(display_ratio(metrics.cost_per_lead), "50.00");
    }
}
