//! Database-backed `InventoryRepository` implementation using Diesel.
//!
//! Stock adjustments run read-modify-write inside one transaction so a
//! rejected delta never writes.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::inventory::{
    InventoryItem, InventoryItemChanges, NewInventoryItem, StockAdjustOutcome,
};
use crate::domain::ports::{InventoryRepository, RepositoryError};

use super::diesel_helpers::{last_insert_id, map_diesel_error, map_pool_error};
use super::models::{InventoryItemRow, InventoryItemRowChanges, NewInventoryItemRow};
use super::pool::DbPool;
use super::schema::inventory_items;

/// Diesel-backed implementation of the stock repository port.
#[derive(Clone)]
pub struct DieselInventoryRepository {
    pool: DbPool,
}

impl DieselInventoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_item(row: InventoryItemRow) -> InventoryItem {
    InventoryItem {
        id: row.id,
        name: row.name,
        category: row.category,
        current_stock: row.current_stock,
        unit: row.unit,
        min_stock_alert: row.min_stock_alert,
        location: row.location,
        last_updated: row.last_updated,
    }
}

impl InventoryRepository for DieselInventoryRepository {
    fn insert(
        &self,
        item: &NewInventoryItem,
        last_updated: NaiveDateTime,
    ) -> Result<InventoryItem, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewInventoryItemRow {
                    name: &item.name,
                    category: item.category.as_deref(),
                    current_stock: item.current_stock,
                    unit: item.unit.as_deref(),
                    min_stock_alert: item.min_stock_alert,
                    location: item.location.as_deref(),
                    last_updated,
                };
                diesel::insert_into(inventory_items::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                inventory_items::table
                    .find(id)
                    .select(InventoryItemRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        Ok(row_to_item(row))
    }

    fn list(&self) -> Result<Vec<InventoryItem>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<InventoryItemRow> = inventory_items::table
            .order(inventory_items::id.asc())
            .select(InventoryItemRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_item).collect())
    }

    fn adjust_stock(
        &self,
        item_id: i32,
        delta: f64,
        at: NaiveDateTime,
    ) -> Result<StockAdjustOutcome, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let outcome = conn
            .transaction(|conn| {
                let row: Option<InventoryItemRow> = inventory_items::table
                    .find(item_id)
                    .select(InventoryItemRow::as_select())
                    .first(conn)
                    .optional()?;
                let mut item = match row {
                    Some(row) => row,
                    None => return Ok(None),
                };
                let next = item.current_stock + delta;
                if next < 0.0 {
                    return Ok(Some(StockAdjustOutcome::Rejected {
                        current_stock: item.current_stock,
                    }));
                }
                diesel::update(inventory_items::table.find(item_id))
                    .set((
                        inventory_items::current_stock.eq(next),
                        inventory_items::last_updated.eq(at),
                    ))
                    .execute(conn)?;
                item.current_stock = next;
                item.last_updated = at;
                Ok(Some(StockAdjustOutcome::Adjusted(row_to_item(item))))
            })
            .map_err(map_diesel_error)?;
        outcome.ok_or_else(|| RepositoryError::missing("inventory item", item_id))
    }

    fn update(
        &self,
        item_id: i32,
        changes: &InventoryItemChanges,
    ) -> Result<InventoryItem, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        // Diesel rejects an empty changeset, so skip the UPDATE when every
        // field is None and fall through to the re-read.
        let has_changes = changes.name.is_some()
            || changes.category.is_some()
            || changes.unit.is_some()
            || changes.min_stock_alert.is_some()
            || changes.location.is_some();
        if has_changes {
            let row_changes = InventoryItemRowChanges {
                name: changes.name.as_deref(),
                category: changes.category.as_deref(),
                unit: changes.unit.as_deref(),
                min_stock_alert: changes.min_stock_alert,
                location: changes.location.as_deref(),
            };
            let affected = diesel::update(inventory_items::table.find(item_id))
                .set(&row_changes)
                .execute(&mut conn)
                .map_err(map_diesel_error)?;
            if affected == 0 {
                return Err(RepositoryError::missing("inventory item", item_id));
            }
        }
        let row = inventory_items::table
            .find(item_id)
            .select(InventoryItemRow::as_select())
            .first::<InventoryItemRow>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| RepositoryError::missing("inventory item", item_id))?;
        Ok(row_to_item(row))
    }

    fn delete(&self, item_id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::delete(inventory_items::table.find(item_id))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("inventory item", item_id));
        }
        Ok(())
    }
}
