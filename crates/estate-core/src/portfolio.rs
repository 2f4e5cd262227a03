//! # Portfolio Rollup Deriver
//!
//! Property-level and portfolio-level sales figures.
//!
//! ## Where the Numbers Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Property counters (stored)          Unit collection                    │
//! │  ──────────────────────────          ───────────────                    │
//! │  total / sold / available /          price of every unit                │
//! │  reserved units                            │                            │
//! │        │                                   │                            │
//! │        ▼                                   ▼                            │
//! │  percentages, unit totals           total_value = Σ unit.price          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `total_value` is summed over units, not `base_price × total_units`;
//! existing report figures depend on that.

use serde::Serialize;

use crate::money::percentage;
use crate::types::{Property, Unit};

// =============================================================================
// Property Rollup
// =============================================================================

/// Sales progress of a single property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRollup {
    pub property_id: String,
    pub name: String,
    pub total_units: u32,
    pub sold_percentage: f64,
    pub available_percentage: f64,
    pub reserved_percentage: f64,
}

impl Property {
    /// `sold_units / total_units × 100`, 0 for a property with no units.
    ///
    /// ## Example
    /// ```rust,ignore
    /// // 25 of 120 units sold
    /// assert!((property.sold_percentage() - 20.83).abs() < 0.01);
    /// ```
    #[inline]
    pub fn sold_percentage(&self) -> f64 {
        percentage(self.sold_units as f64, self.total_units as f64)
    }

    #[inline]
    pub fn available_percentage(&self) -> f64 {
        percentage(self.available_units as f64, self.total_units as f64)
    }

    #[inline]
    pub fn reserved_percentage(&self) -> f64 {
        percentage(self.reserved_units as f64, self.total_units as f64)
    }

    pub fn rollup(&self) -> PropertyRollup {
        PropertyRollup {
            property_id: self.id.clone(),
            name: self.name.clone(),
            total_units: self.total_units,
            sold_percentage: self.sold_percentage(),
            available_percentage: self.available_percentage(),
            reserved_percentage: self.reserved_percentage(),
        }
    }
}

// =============================================================================
// Portfolio Rollup
// =============================================================================

/// Figures across every property and unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRollup {
    pub property_count: usize,
    pub total_units: u64,
    pub sold_units: u64,
    pub available_units: u64,
    pub reserved_units: u64,
    /// Σ price over the unit collection.
    pub total_value: f64,
    pub sold_percentage: f64,
    pub available_percentage: f64,
    pub reserved_percentage: f64,
}

/// Rolls up the whole portfolio.
pub fn portfolio_rollup(properties: &[Property], units: &[Unit]) -> PortfolioRollup {
    let mut rollup = PortfolioRollup {
        property_count: properties.len(),
        ..PortfolioRollup::default()
    };

    for property in properties {
        rollup.total_units += property.total_units as u64;
        rollup.sold_units += property.sold_units as u64;
        rollup.available_units += property.available_units as u64;
        rollup.reserved_units += property.reserved_units as u64;
    }

    rollup.total_value = units.iter().map(|unit| unit.price).sum();

    let total = rollup.total_units as f64;
    rollup.sold_percentage = percentage(rollup.sold_units as f64, total);
    rollup.available_percentage = percentage(rollup.available_units as f64, total);
    rollup.reserved_percentage = percentage(rollup.reserved_units as f64, total);
    rollup
}

// =============================================================================
// Invariant Check
// =============================================================================

/// A property whose counters add up to more than its unit count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitCountViolation {
    pub property_id: String,
    pub total_units: u32,
    pub allocated_units: u64,
}

/// Result of checking the unit-count invariants. Reported, never enforced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvariantReport {
    /// Σ sold_units ≤ Σ total_units across the portfolio.
    pub sold_within_total: bool,
    pub violations: Vec<UnitCountViolation>,
}

impl InvariantReport {
    pub fn is_consistent(&self) -> bool {
        self.sold_within_total && self.violations.is_empty()
    }
}

/// Checks available + sold + reserved ≤ total for each property.
pub fn check_unit_counts(properties: &[Property]) -> InvariantReport {
    let violations = properties
        .iter()
        .filter(|p| p.allocated_units() > p.total_units as u64)
        .map(|p| UnitCountViolation {
            property_id: p.id.clone(),
            total_units: p.total_units,
            allocated_units: p.allocated_units(),
        })
        .collect();

    let sold: u64 = properties.iter().map(|p| p.sold_units as u64).sum();
    let total: u64 = properties.iter().map(|p| p.total_units as u64).sum();

    InvariantReport {
        sold_within_total: sold <= total,
        violations,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
