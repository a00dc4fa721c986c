//! Stores and stock levels.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A stocked material or consumable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Surrogate id.
    pub id: i32,
    /// Item name (required).
    pub name: String,
    /// Grouping, e.g. "Raw Material".
    pub category: Option<String>,
    /// Quantity on hand. Never negative.
    pub current_stock: f64,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Reorder threshold; at or below it the item counts as low stock.
    pub min_stock_alert: f64,
    /// Storage location.
    pub location: Option<String>,
    /// Stamped on every stock movement.
    pub last_updated: NaiveDateTime,
}

impl InventoryItem {
    /// Whether the item sits at or below its reorder threshold.
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock_alert
    }
}

/// Input for registering an inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    /// Item name (required).
    pub name: String,
    /// Grouping, e.g. "Raw Material".
    pub category: Option<String>,
    /// Opening quantity. Must not be negative.
    pub current_stock: f64,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Reorder threshold.
    pub min_stock_alert: f64,
    /// Storage location.
    pub location: Option<String>,
}

impl NewInventoryItem {
    /// An empty-stock item with the default reorder threshold.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            current_stock: 0.0,
            unit: None,
            min_stock_alert: 10.0,
            location: None,
        }
    }
}

/// Master-data update for an item; stock moves only through adjustments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItemChanges {
    /// New item name.
    pub name: Option<String>,
    /// New grouping.
    pub category: Option<String>,
    /// New unit of measure.
    pub unit: Option<String>,
    /// New reorder threshold.
    pub min_stock_alert: Option<f64>,
    /// New storage location.
    pub location: Option<String>,
}

/// Result of a signed stock adjustment executed inside one transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum StockAdjustOutcome {
    /// The delta was applied; the item reflects the new quantity.
    Adjusted(InventoryItem),
    /// The delta would have driven stock negative; nothing was written.
    Rejected {
        /// Quantity on hand at the time of the attempt.
        current_stock: f64,
    },
}
