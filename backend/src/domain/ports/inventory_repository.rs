//! Port for stock storage and transactional adjustments.

use std::sync::{Mutex, PoisonError};

use chrono::NaiveDateTime;

use super::RepositoryError;
use crate::domain::inventory::{
    InventoryItem, InventoryItemChanges, NewInventoryItem, StockAdjustOutcome,
};

/// Port for reading and mutating stock.
///
/// `adjust_stock` is the only path that moves quantities, and adapters run
/// it read-modify-write inside one store transaction so a rejected delta
/// leaves the row untouched.
#[cfg_attr(test, mockall::automock)]
pub trait InventoryRepository: Send + Sync {
    /// Register an item and return it with its assigned id.
    fn insert(
        &self,
        item: &NewInventoryItem,
        last_updated: NaiveDateTime,
    ) -> Result<InventoryItem, RepositoryError>;

    /// All items, oldest first.
    fn list(&self) -> Result<Vec<InventoryItem>, RepositoryError>;

    /// Apply a signed stock delta inside one transaction.
    ///
    /// A delta that would drive stock negative is rejected without writing;
    /// an applied delta also stamps `last_updated` to `at`.
    fn adjust_stock(
        &self,
        item_id: i32,
        delta: f64,
        at: NaiveDateTime,
    ) -> Result<StockAdjustOutcome, RepositoryError>;

    /// Update master-data fields and return the stored row.
    fn update(
        &self,
        item_id: i32,
        changes: &InventoryItemChanges,
    ) -> Result<InventoryItem, RepositoryError>;

    /// Remove an item permanently.
    fn delete(&self, item_id: i32) -> Result<(), RepositoryError>;
}

/// In-memory store for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemoryInventoryRepository {
    rows: Mutex<Vec<InventoryItem>>,
}

impl MemoryInventoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, body: impl FnOnce(&mut Vec<InventoryItem>) -> T) -> T {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        body(&mut rows)
    }
}

impl InventoryRepository for MemoryInventoryRepository {
    fn insert(
        &self,
        item: &NewInventoryItem,
        last_updated: NaiveDateTime,
    ) -> Result<InventoryItem, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.iter().map(|i| i.id).max().unwrap_or(0) + 1;
            let item = InventoryItem {
                id,
                name: item.name.clone(),
                category: item.category.clone(),
                current_stock: item.current_stock,
                unit: item.unit.clone(),
                min_stock_alert: item.min_stock_alert,
                location: item.location.clone(),
                last_updated,
            };
            rows.push(item.clone());
            item
        }))
    }

    fn list(&self) -> Result<Vec<InventoryItem>, RepositoryError> {
        Ok(self.with_rows(|rows| rows.clone()))
    }

    fn adjust_stock(
        &self,
        item_id: i32,
        delta: f64,
        at: NaiveDateTime,
    ) -> Result<StockAdjustOutcome, RepositoryError> {
        self.with_rows(|rows| {
            let item = rows
                .iter_mut()
                .find(|i| i.id == item_id)
                .ok_or_else(|| RepositoryError::missing("inventory item", item_id))?;
            let next = item.current_stock + delta;
            if next < 0.0 {
                return Ok(StockAdjustOutcome::Rejected {
                    current_stock: item.current_stock,
                });
            }
            item.current_stock = next;
            item.last_updated = at;
            Ok(StockAdjustOutcome::Adjusted(item.clone()))
        })
    }

    fn update(
        &self,
        item_id: i32,
        changes: &InventoryItemChanges,
    ) -> Result<InventoryItem, RepositoryError> {
        self.with_rows(|rows| {
            let item = rows
                .iter_mut()
                .find(|i| i.id == item_id)
                .ok_or_else(|| RepositoryError::missing("inventory item", item_id))?;
            if let Some(name) = &changes.name {
                item.name = name.clone();
            }
            if let Some(category) = &changes.category {
                item.category = Some(category.clone());
            }
            if let Some(unit) = &changes.unit {
                item.unit = Some(unit.clone());
            }
            if let Some(alert) = changes.min_stock_alert {
                item.min_stock_alert = alert;
            }
            if let Some(location) = &changes.location {
                item.location = Some(location.clone());
            }
            Ok(item.clone())
        })
    }

    fn delete(&self, item_id: i32) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let before = rows.len();
            rows.retain(|i| i.id != item_id);
            if rows.len() == before {
                return Err(RepositoryError::missing("inventory item", item_id));
            }
            Ok(())
        })
    }
}
