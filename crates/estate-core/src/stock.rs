//! # Stock-Status Deriver
//!
//! ```text
//! quantity:   0        1 ........ min_stock     min_stock+1 ......
//!             │        │               │        │
//!             ▼        └───────┬───────┘        └──────┬──────────
//!        out_of_stock      low_stock                in_stock
//! ```
//!
//! The status is a read-time projection of `quantity` and `min_stock`.
//! It is never stored, so restocking or consuming an item is reflected
//! the next time anyone looks.

use crate::money::coerce_amount;
use crate::types::{InventoryItem, StockStatus};

/// Derives the stock status from a quantity and its reorder threshold.
///
/// ## Example
/// ```rust
/// use estate_core::stock::stock_status;
/// use estate_core::StockStatus;
///
/// assert_eq!(stock_status(0, 10), StockStatus::OutOfStock);
/// assert_eq!(stock_status(10, 10), StockStatus::LowStock);
/// assert_eq!(stock_status(11, 10), StockStatus::InStock);
/// ```
pub fn stock_status(quantity: u32, min_stock: u32) -> StockStatus {
    if quantity == 0 {
        StockStatus::OutOfStock
    } else if quantity <= min_stock {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

impl InventoryItem {
    /// Current stock status.
    #[inline]
    pub fn status(&self) -> StockStatus {
        stock_status(self.quantity, self.min_stock)
    }

    /// How many units to order to get back to `max_stock`.
    ///
    /// Zero while the item is in stock.
    pub fn reorder_quantity(&self) -> u32 {
        match self.status() {
            StockStatus::InStock => 0,
            _ => self.max_stock.saturating_sub(self.quantity),
        }
    }

    /// Value of the stock on hand.
    pub fn stock_value(&self) -> f64 {
        self.quantity as f64 * coerce_amount(self.unit_price)
    }
}
