//! Database-backed `MachineryRepository` implementation using Diesel.
//!
//! `complete_task` touches both the task and its asset, so it runs inside
//! one transaction.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::machinery::{
    Asset, AssetKind, AssetLog, AssetStatus, MaintenanceStatus, MaintenanceTask, NewAsset,
    NewAssetLog, NewMaintenanceTask,
};
use crate::domain::ports::{MachineryRepository, RepositoryError};

use super::diesel_helpers::{
    last_insert_id, map_diesel_error, map_pool_error, parse_label, parse_optional_label,
};
use super::models::{
    AssetLogRow, AssetRow, MaintenanceTaskRow, NewAssetLogRow, NewAssetRow, NewMaintenanceTaskRow,
};
use super::pool::DbPool;
use super::schema::{asset_logs, assets, maintenance_schedules};

/// Diesel-backed implementation of the asset register port.
#[derive(Clone)]
pub struct DieselMachineryRepository {
    pool: DbPool,
}

impl DieselMachineryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_asset(row: AssetRow) -> Result<Asset, RepositoryError> {
    Ok(Asset {
        id: row.id,
        name: row.name,
        kind: parse_optional_label(row.kind.as_deref())?,
        purchase_date: row.purchase_date,
        last_service_date: row.last_service_date,
        next_service_due: row.next_service_due,
        status: parse_label(&row.status)?,
    })
}

fn row_to_usage_log(row: AssetLogRow) -> AssetLog {
    AssetLog {
        id: row.id,
        asset_id: row.asset_id,
        date: row.date,
        hours_used: row.hours_used,
        fuel_consumed: row.fuel_consumed,
        notes: row.notes,
    }
}

fn row_to_task(row: MaintenanceTaskRow) -> Result<MaintenanceTask, RepositoryError> {
    Ok(MaintenanceTask {
        id: row.id,
        asset_id: row.asset_id,
        task_name: row.task_name,
        scheduled_date: row.scheduled_date,
        performed_date: row.performed_date,
        status: parse_label(&row.status)?,
        cost: row.cost,
        technician: row.technician,
    })
}

/// Existence check shared by the operations that reference an asset.
fn asset_exists(conn: &mut super::pool::AnyConnection, asset_id: i32) -> QueryResult<bool> {
    let found: Option<i32> = assets::table
        .find(asset_id)
        .select(assets::id)
        .first(conn)
        .optional()?;
    Ok(found.is_some())
}

impl MachineryRepository for DieselMachineryRepository {
    fn insert_asset(&self, asset: &NewAsset) -> Result<Asset, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewAssetRow {
                    name: &asset.name,
                    kind: asset.kind.map(AssetKind::as_str),
                    purchase_date: asset.purchase_date,
                    last_service_date: asset.last_service_date,
                    next_service_due: asset.next_service_due,
                    status: asset.status.as_str(),
                };
                diesel::insert_into(assets::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                assets::table.find(id).select(AssetRow::as_select()).first(conn)
            })
            .map_err(map_diesel_error)?;
        row_to_asset(row)
    }

    fn list_assets(&self) -> Result<Vec<Asset>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<AssetRow> = assets::table
            .order(assets::id.asc())
            .select(AssetRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_asset).collect()
    }

    fn set_asset_status(
        &self,
        asset_id: i32,
        status: AssetStatus,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::update(assets::table.find(asset_id))
            .set(assets::status.eq(status.as_str()))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("asset", asset_id));
        }
        Ok(())
    }

    fn insert_usage_log(&self, log: &NewAssetLog) -> Result<AssetLog, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        if !asset_exists(&mut conn, log.asset_id).map_err(map_diesel_error)? {
            return Err(RepositoryError::missing("asset", log.asset_id));
        }
        let row = conn
            .transaction(|conn| {
                let new_row = NewAssetLogRow {
                    asset_id: Some(log.asset_id),
                    date: log.date,
                    hours_used: log.hours_used,
                    fuel_consumed: log.fuel_consumed,
                    notes: log.notes.as_deref(),
                };
                diesel::insert_into(asset_logs::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                asset_logs::table
                    .find(id)
                    .select(AssetLogRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        Ok(row_to_usage_log(row))
    }

    fn list_usage_logs(&self) -> Result<Vec<AssetLog>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<AssetLogRow> = asset_logs::table
            .order(asset_logs::id.desc())
            .select(AssetLogRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_usage_log).collect())
    }

    fn schedule_task(
        &self,
        task: &NewMaintenanceTask,
    ) -> Result<MaintenanceTask, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        if !asset_exists(&mut conn, task.asset_id).map_err(map_diesel_error)? {
            return Err(RepositoryError::missing("asset", task.asset_id));
        }
        let row = conn
            .transaction(|conn| {
                let new_row = NewMaintenanceTaskRow {
                    asset_id: Some(task.asset_id),
                    task_name: &task.task_name,
                    scheduled_date: task.scheduled_date,
                    performed_date: None,
                    status: MaintenanceStatus::Scheduled.as_str(),
                    cost: 0.0,
                    technician: task.technician.as_deref(),
                };
                diesel::insert_into(maintenance_schedules::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                maintenance_schedules::table
                    .find(id)
                    .select(MaintenanceTaskRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        row_to_task(row)
    }

    fn list_tasks(&self) -> Result<Vec<MaintenanceTask>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<MaintenanceTaskRow> = maintenance_schedules::table
            .order(maintenance_schedules::id.desc())
            .select(MaintenanceTaskRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_task).collect()
    }

    fn complete_task(
        &self,
        task_id: i32,
        cost: f64,
        performed_on: NaiveDate,
    ) -> Result<MaintenanceTask, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let task: Option<MaintenanceTaskRow> = maintenance_schedules::table
                    .find(task_id)
                    .select(MaintenanceTaskRow::as_select())
                    .first(conn)
                    .optional()?;
                let task = match task {
                    Some(task) => task,
                    None => return Ok(None),
                };
                diesel::update(maintenance_schedules::table.find(task_id))
                    .set((
                        maintenance_schedules::status.eq(MaintenanceStatus::Completed.as_str()),
                        maintenance_schedules::performed_date.eq(Some(performed_on)),
                        maintenance_schedules::cost.eq(cost),
                    ))
                    .execute(conn)?;
                if let Some(asset_id) = task.asset_id {
                    diesel::update(assets::table.find(asset_id))
                        .set(assets::status.eq(AssetStatus::Active.as_str()))
                        .execute(conn)?;
                }
                maintenance_schedules::table
                    .find(task_id)
                    .select(MaintenanceTaskRow::as_select())
                    .first(conn)
                    .map(Some)
            })
            .map_err(map_diesel_error)?
            .ok_or_else(|| RepositoryError::missing("maintenance task", task_id))?;
        row_to_task(row)
    }
}
