//! # Property & Unit Repository
//!
//! Property unit counters are stored figures maintained by the office; adding
//! or selling a unit does not touch them. They are still checked on every
//! write: `available + sold + reserved ≤ total`.

use chrono::NaiveDate;
use estate_core::validation::{validate_property, validate_unit};
use estate_core::{Property, PropertyStatus, PropertyType, Unit, UnitStatus};
use serde::Deserialize;
use tracing::{debug, warn};

use super::merge_patch;
use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;

// =============================================================================
// Property
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub total_units: u32,
    pub available_units: u32,
    pub sold_units: u32,
    pub reserved_units: u32,
    pub base_price: f64,
    pub status: PropertyStatus,
    #[serde(default)]
    pub completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub total_units: Option<u32>,
    pub available_units: Option<u32>,
    pub sold_units: Option<u32>,
    pub reserved_units: Option<u32>,
    pub base_price: Option<f64>,
    pub status: Option<PropertyStatus>,
    pub completion_date: Option<Option<NaiveDate>>,
    pub images: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
}

impl EntityStore {
    pub fn add_property(&mut self, new: NewProperty) -> StoreResult<Property> {
        let property = Property {
            id: Self::next_id(),
            name: new.name,
            property_type: new.property_type,
            location: new.location,
            description: new.description,
            total_units: new.total_units,
            available_units: new.available_units,
            sold_units: new.sold_units,
            reserved_units: new.reserved_units,
            base_price: new.base_price,
            status: new.status,
            completion_date: new.completion_date,
            images: new.images,
            amenities: new.amenities,
        };

        check_property(&property)?;

        debug!(id = %property.id, name = %property.name, units = property.total_units, "Adding property");
        self.properties.push(property.clone());
        Ok(property)
    }

    pub fn update_property(&mut self, id: &str, patch: PropertyPatch) -> StoreResult<Property> {
        let current = self.properties.require(id)?;
        let mut property = current.clone();

        merge_patch!(property <- patch {
            name, property_type, location, description, total_units,
            available_units, sold_units, reserved_units, base_price, status,
            completion_date, images, amenities,
        });

        if property == *current {
            return Ok(property);
        }

        check_property(&property)?;

        debug!(id = %property.id, "Updating property");
        self.properties.replace(property.clone())?;
        Ok(property)
    }
}

fn check_property(property: &Property) -> StoreResult<()> {
    validate_property(property).map_err(|err| {
        warn!(id = %property.id, error = %err, "Property rejected");
        StoreError::from(err)
    })
}

// =============================================================================
// Unit
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUnit {
    pub property_id: String,
    pub unit_number: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    pub size: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub price: f64,
    pub status: UnitStatus,
    #[serde(default)]
    pub floor: i32,
    #[serde(default)]
    pub facing: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub sold_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPatch {
    pub property_id: Option<String>,
    pub unit_number: Option<String>,
    #[serde(rename = "type")]
    pub unit_type: Option<String>,
    pub size: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub price: Option<f64>,
    pub status: Option<UnitStatus>,
    pub floor: Option<i32>,
    pub facing: Option<String>,
    pub customer_id: Option<Option<String>>,
    pub sold_at: Option<Option<NaiveDate>>,
}

impl EntityStore {
    /// Adds a unit to an existing property.
    ///
    /// A unit added as sold without a `soldAt` date gets the store's
    /// business date ([`EntityStore::as_of`]).
    pub fn add_unit(&mut self, new: NewUnit) -> StoreResult<Unit> {
        let mut unit = Unit {
            id: Self::next_id(),
            property_id: new.property_id,
            unit_number: new.unit_number,
            unit_type: new.unit_type,
            size: new.size,
            bedrooms: new.bedrooms,
            bathrooms: new.bathrooms,
            price: new.price,
            status: new.status,
            floor: new.floor,
            facing: new.facing,
            customer_id: new.customer_id,
            sold_at: new.sold_at,
        };
        self.stamp_sold_at(&mut unit);

        self.check_unit(&unit)?;

        debug!(id = %unit.id, property_id = %unit.property_id, number = %unit.unit_number, "Adding unit");
        self.units.push(unit.clone());
        Ok(unit)
    }

    /// Shallow-merges `patch` into the unit with `id`.
    ///
    /// Moving a unit to sold or reserved needs a customer in the same patch
    /// (or already on the unit).
    pub fn update_unit(&mut self, id: &str, patch: UnitPatch) -> StoreResult<Unit> {
        let current = self.units.require(id)?;
        let mut unit = current.clone();

        merge_patch!(unit <- patch {
            property_id, unit_number, unit_type, size, bedrooms, bathrooms,
            price, status, floor, facing, customer_id, sold_at,
        });
        self.stamp_sold_at(&mut unit);

        if unit == *current {
            return Ok(unit);
        }

        self.check_unit(&unit)?;

        debug!(id = %unit.id, status = %unit.status, "Updating unit");
        self.units.replace(unit.clone())?;
        Ok(unit)
    }

    fn check_unit(&self, unit: &Unit) -> StoreResult<()> {
        let result = validate_unit(unit)
            .map_err(StoreError::from)
            .and_then(|()| self.require_property(&unit.property_id).map(|_| ()))
            .and_then(|()| match unit.customer_id.as_deref() {
                Some(customer_id) => self.require_customer(customer_id).map(|_| ()),
                None => Ok(()),
            });

        if let Err(err) = &result {
            warn!(id = %unit.id, error = %err, "Unit rejected");
        }
        result
    }

    fn stamp_sold_at(&self, unit: &mut Unit) {
        if unit.status == UnitStatus::Sold && unit.sold_at.is_none() {
            unit.sold_at = Some(self.as_of());
        }
    }
}
