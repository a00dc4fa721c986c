//! Database-backed `SettingsRepository` implementation using Diesel.

use diesel::prelude::*;

use crate::domain::ports::{RepositoryError, SettingsRepository};
use crate::domain::settings::{SettingEntry, SettingUpsert};

use super::diesel_helpers::{last_insert_id, map_diesel_error, map_pool_error};
use super::models::{NewSettingRow, SettingRow};
use super::pool::DbPool;
use super::schema::system_settings;

/// Diesel-backed implementation of the settings store port.
#[derive(Clone)]
pub struct DieselSettingsRepository {
    pool: DbPool,
}

impl DieselSettingsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_entry(row: SettingRow) -> SettingEntry {
    SettingEntry {
        id: row.id,
        category: row.category,
        key: row.key,
        value: row.value,
        description: row.description,
    }
}

impl SettingsRepository for DieselSettingsRepository {
    fn upsert(&self, entry: &SettingUpsert) -> Result<SettingEntry, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let existing: Option<i32> = system_settings::table
                    .filter(system_settings::key.eq(&entry.key))
                    .select(system_settings::id)
                    .first(conn)
                    .optional()?;
                let id = match existing {
                    // Overwrite semantics: a None in the upsert clears the
                    // stored column rather than preserving it.
                    Some(id) => {
                        diesel::update(system_settings::table.find(id))
                            .set((
                                system_settings::category.eq(entry.category.as_deref()),
                                system_settings::value.eq(entry.value.as_deref()),
                                system_settings::description.eq(entry.description.as_deref()),
                            ))
                            .execute(conn)?;
                        id
                    }
                    None => {
                        let new_row = NewSettingRow {
                            category: entry.category.as_deref(),
                            key: &entry.key,
                            value: entry.value.as_deref(),
                            description: entry.description.as_deref(),
                        };
                        diesel::insert_into(system_settings::table)
                            .values(&new_row)
                            .execute(conn)?;
                        last_insert_id(conn)?
                    }
                };
                system_settings::table
                    .find(id)
                    .select(SettingRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        Ok(row_to_entry(row))
    }

    fn list(&self) -> Result<Vec<SettingEntry>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<SettingRow> = system_settings::table
            .order(system_settings::key.asc())
            .select(SettingRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_entry).collect())
    }
}
