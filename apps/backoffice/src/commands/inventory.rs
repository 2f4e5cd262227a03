//! # Inventory Command

use std::io::Write;

use estate_core::money::format_amount;
use estate_core::StockStatus;

use crate::error::AppResult;
use crate::state::AppState;

pub fn show_inventory(state: &AppState, out: &mut dyn Write) -> AppResult<()> {
    let finance = &state.config.finance;

    state.store.with_store(|store| -> AppResult<()> {
        let items = store.inventory();

        writeln!(
            out,
            "{:<10} {:<24} {:>6} {:>5} {:>5}  {:<12} {:>7} {:>18}",
            "SKU", "Item", "Qty", "Min", "Max", "Status", "Reorder", "Value"
        )?;
        for item in items {
            writeln!(
                out,
                "{:<10} {:<24} {:>6} {:>5} {:>5}  {:<12} {:>7} {:>18}",
                item.sku,
                item.item_name,
                item.quantity,
                item.min_stock,
                item.max_stock,
                item.status().as_str(),
                item.reorder_quantity(),
                format_amount(item.stock_value(), &finance.currency, finance.decimals)
            )?;
        }

        let attention = items
            .iter()
            .filter(|item| item.status() != StockStatus::InStock)
            .count();
        let total: f64 = items.iter().map(|item| item.stock_value()).sum();

        writeln!(out)?;
        writeln!(
            out,
            "{} items, {} need reordering, stock value {}",
            items.len(),
            attention,
            format_amount(total, &finance.currency, finance.decimals)
        )?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{output, state};

    #[test]
    fn test_inventory_listing() {
        let state = state();
        let text = output(|buf| show_inventory(&state, buf).unwrap());

        let pvc = text.lines().find(|line| line.starts_with("PVC-4")).unwrap();
        assert!(pvc.contains("out_of_stock"));
        assert!(pvc.contains(" 200 "));

        let paint = text.lines().find(|line| line.starts_with("PNT-20")).unwrap();
        assert!(paint.contains("low_stock"));

        assert!(text.contains("5 items, 3 need reordering"));
    }
}
