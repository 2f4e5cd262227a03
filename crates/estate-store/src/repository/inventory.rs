//! # Inventory Repository
//!
//! Stock status is not a field here; it is read through
//! [`InventoryItem::status`](estate_core::InventoryItem::status), so a quantity
//! change is all it takes to move an item between in, low and out of stock.

use chrono::Utc;
use estate_core::validation::validate_inventory_item;
use estate_core::InventoryItem;
use serde::Deserialize;
use tracing::{debug, warn};

use super::merge_patch;
use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub item_name: String,
    pub category: String,
    pub sku: String,
    pub quantity: u32,
    pub min_stock: u32,
    pub max_stock: u32,
    pub unit_price: f64,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPatch {
    pub item_name: Option<String>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<u32>,
    pub min_stock: Option<u32>,
    pub max_stock: Option<u32>,
    pub unit_price: Option<f64>,
    pub supplier: Option<String>,
    pub location: Option<String>,
}

impl EntityStore {
    pub fn add_inventory_item(&mut self, new: NewInventoryItem) -> StoreResult<InventoryItem> {
        let item = InventoryItem {
            id: Self::next_id(),
            item_name: new.item_name,
            category: new.category,
            sku: new.sku,
            quantity: new.quantity,
            min_stock: new.min_stock,
            max_stock: new.max_stock,
            unit_price: new.unit_price,
            supplier: new.supplier,
            location: new.location,
            last_updated: Utc::now(),
        };

        check_item(&item)?;

        debug!(id = %item.id, sku = %item.sku, status = %item.status(), "Adding inventory item");
        self.inventory.push(item.clone());
        Ok(item)
    }

    /// Shallow-merges `patch`; `lastUpdated` is refreshed on any change.
    pub fn update_inventory_item(
        &mut self,
        id: &str,
        patch: InventoryPatch,
    ) -> StoreResult<InventoryItem> {
        let current = self.inventory.require(id)?;
        let mut item = current.clone();

        merge_patch!(item <- patch {
            item_name, category, sku, quantity, min_stock, max_stock,
            unit_price, supplier, location,
        });

        if item == *current {
            return Ok(item);
        }
        item.last_updated = Utc::now();

        check_item(&item)?;

        debug!(id = %item.id, quantity = item.quantity, status = %item.status(), "Updating inventory item");
        self.inventory.replace(item.clone())?;
        Ok(item)
    }
}

fn check_item(item: &InventoryItem) -> StoreResult<()> {
    validate_inventory_item(item).map_err(|err| {
        warn!(id = %item.id, error = %err, "Inventory item rejected");
        StoreError::from(err)
    })
}
