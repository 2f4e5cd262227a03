//! # Dashboard Command

use std::io::Write;

use estate_core::dashboard::{dashboard, CurrencyTotal, DashboardSummary};
use estate_core::finance::display_ratio;
use estate_core::money::format_amount;

use crate::error::AppResult;
use crate::state::AppState;

pub fn show_dashboard(state: &AppState, json: bool, out: &mut dyn Write) -> AppResult<()> {
    let summary = state
        .store
        .with_store(|store| dashboard(&store.dashboard_source(), state.today));

    if json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
    } else {
        write_summary(state, &summary, out)?;
    }
    Ok(())
}

fn write_summary(state: &AppState, s: &DashboardSummary, out: &mut dyn Write) -> AppResult<()> {
    let finance = &state.config.finance;
    let money = |amount: f64| format_amount(amount, &finance.currency, finance.decimals);
    let totals = |totals: &[CurrencyTotal]| {
        if totals.is_empty() {
            return money(0.0);
        }
        totals
            .iter()
            .map(|total| format_amount(total.amount, &total.currency, finance.decimals))
            .collect::<Vec<_>>()
            .join(" + ")
    };

    writeln!(out, "{} dashboard as of {}", state.config.company.name, s.as_of)?;
    writeln!(out)?;

    writeln!(out, "CUSTOMERS")?;
    writeln!(
        out,
        "  {} total: {} leads, {} prospects, {} customers, {} inactive",
        s.customers.total, s.customers.leads, s.customers.prospects, s.customers.customers, s.customers.inactive
    )?;
    writeln!(out, "  {} open leads in the pipeline", s.open_leads)?;

    writeln!(out, "PORTFOLIO")?;
    writeln!(
        out,
        "  {} properties, {} units: {} sold ({:.1}%), {} available ({:.1}%), {} reserved ({:.1}%)",
        s.portfolio.property_count,
        s.portfolio.total_units,
        s.portfolio.sold_units,
        s.portfolio.sold_percentage,
        s.portfolio.available_units,
        s.portfolio.available_percentage,
        s.portfolio.reserved_units,
        s.portfolio.reserved_percentage,
    )?;
    writeln!(out, "  Listed value: {}", money(s.portfolio.total_value))?;

    writeln!(out, "FINANCE")?;
    writeln!(
        out,
        "  Revenue: {} from {} completed transactions ({} pending)",
        totals(&s.completed_revenue),
        s.completed_transactions,
        s.pending_transactions
    )?;
    writeln!(
        out,
        "  Invoices: {} overdue, {} outstanding",
        s.overdue_invoices,
        totals(&s.outstanding_amount)
    )?;
    writeln!(
        out,
        "  Cheques: {} overdue, {} due today, {} due soon, {} this week",
        s.cheques.overdue, s.cheques.due_today, s.cheques.due_soon, s.cheques.due_this_week
    )?;

    writeln!(out, "OPERATIONS")?;
    writeln!(
        out,
        "  Stock: {} low, {} out of stock",
        s.low_stock_items, s.out_of_stock_items
    )?;
    writeln!(out, "  Maintenance: {} open requests", s.open_maintenance)?;
    writeln!(
        out,
        "  {} active campaigns, {} projects in progress",
        s.active_campaigns, s.active_projects
    )?;
    for campaign in &s.campaigns {
        let metrics = &campaign.metrics;
        writeln!(
            out,
            "    {}: {:.1}% of budget, cost per lead {}, cost per conversion {}, conversion rate {}%",
            campaign.name,
            metrics.budget.utilization_percent,
            display_ratio(metrics.cost_per_lead),
            display_ratio(metrics.cost_per_conversion),
            display_ratio(metrics.conversion_rate)
        )?;
    }
    Ok(())
}
