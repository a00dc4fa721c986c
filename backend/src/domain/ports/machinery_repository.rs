//! Port for plant assets, usage logs, and maintenance tasks.

use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;

use super::RepositoryError;
use crate::domain::machinery::{
    Asset, AssetLog, AssetStatus, MaintenanceStatus, MaintenanceTask, NewAsset, NewAssetLog,
    NewMaintenanceTask,
};

/// Port for the asset register and its maintenance trail.
///
/// `complete_task` spans two tables — the task flips to Completed and its
/// asset returns to Active — so adapters run it inside one transaction.
#[cfg_attr(test, mockall::automock)]
pub trait MachineryRepository: Send + Sync {
    /// Register an asset and return it with its assigned id.
    fn insert_asset(&self, asset: &NewAsset) -> Result<Asset, RepositoryError>;

    /// All assets, oldest first.
    fn list_assets(&self) -> Result<Vec<Asset>, RepositoryError>;

    /// Move an asset to a new operational state.
    fn set_asset_status(&self, asset_id: i32, status: AssetStatus)
    -> Result<(), RepositoryError>;

    /// Record a day's usage of an asset.
    fn insert_usage_log(&self, log: &NewAssetLog) -> Result<AssetLog, RepositoryError>;

    /// All usage logs, newest first.
    fn list_usage_logs(&self) -> Result<Vec<AssetLog>, RepositoryError>;

    /// Schedule a maintenance task against an asset.
    fn schedule_task(&self, task: &NewMaintenanceTask)
    -> Result<MaintenanceTask, RepositoryError>;

    /// All maintenance tasks, newest first.
    fn list_tasks(&self) -> Result<Vec<MaintenanceTask>, RepositoryError>;

    /// Complete a task inside one transaction.
    ///
    /// The task becomes Completed with `performed_on` and `cost` recorded,
    /// and its asset (when linked) returns to Active.
    fn complete_task(
        &self,
        task_id: i32,
        cost: f64,
        performed_on: NaiveDate,
    ) -> Result<MaintenanceTask, RepositoryError>;
}

#[derive(Debug, Default)]
struct MachineryRows {
    assets: Vec<Asset>,
    usage: Vec<AssetLog>,
    tasks: Vec<MaintenanceTask>,
}

/// In-memory store for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemoryMachineryRepository {
    rows: Mutex<MachineryRows>,
}

impl MemoryMachineryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, body: impl FnOnce(&mut MachineryRows) -> T) -> T {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        body(&mut rows)
    }
}

impl MachineryRepository for MemoryMachineryRepository {
    fn insert_asset(&self, asset: &NewAsset) -> Result<Asset, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.assets.iter().map(|a| a.id).max().unwrap_or(0) + 1;
            let asset = Asset {
                id,
                name: asset.name.clone(),
                kind: asset.kind,
                purchase_date: asset.purchase_date,
                last_service_date: asset.last_service_date,
                next_service_due: asset.next_service_due,
                status: asset.status,
            };
            rows.assets.push(asset.clone());
            asset
        }))
    }

    fn list_assets(&self) -> Result<Vec<Asset>, RepositoryError> {
        Ok(self.with_rows(|rows| rows.assets.clone()))
    }

    fn set_asset_status(
        &self,
        asset_id: i32,
        status: AssetStatus,
    ) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let asset = rows
                .assets
                .iter_mut()
                .find(|a| a.id == asset_id)
                .ok_or_else(|| RepositoryError::missing("asset", asset_id))?;
            asset.status = status;
            Ok(())
        })
    }

    fn insert_usage_log(&self, log: &NewAssetLog) -> Result<AssetLog, RepositoryError> {
        self.with_rows(|rows| {
            if !rows.assets.iter().any(|a| a.id == log.asset_id) {
                return Err(RepositoryError::missing("asset", log.asset_id));
            }
            let id = rows.usage.iter().map(|l| l.id).max().unwrap_or(0) + 1;
            let log = AssetLog {
                id,
                asset_id: Some(log.asset_id),
                date: log.date,
                hours_used: log.hours_used,
                fuel_consumed: log.fuel_consumed,
                notes: log.notes.clone(),
            };
            rows.usage.push(log.clone());
            Ok(log)
        })
    }

    fn list_usage_logs(&self) -> Result<Vec<AssetLog>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut usage = rows.usage.clone();
            usage.sort_by_key(|l| std::cmp::Reverse(l.id));
            usage
        }))
    }

    fn schedule_task(
        &self,
        task: &NewMaintenanceTask,
    ) -> Result<MaintenanceTask, RepositoryError> {
        self.with_rows(|rows| {
            if !rows.assets.iter().any(|a| a.id == task.asset_id) {
                return Err(RepositoryError::missing("asset", task.asset_id));
            }
            let id = rows.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            let task = MaintenanceTask {
                id,
                asset_id: Some(task.asset_id),
                task_name: task.task_name.clone(),
                scheduled_date: task.scheduled_date,
                performed_date: None,
                status: MaintenanceStatus::Scheduled,
                cost: 0.0,
                technician: task.technician.clone(),
            };
            rows.tasks.push(task.clone());
            Ok(task)
        })
    }

    fn list_tasks(&self) -> Result<Vec<MaintenanceTask>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut tasks = rows.tasks.clone();
            tasks.sort_by_key(|t| std::cmp::Reverse(t.id));
            tasks
        }))
    }

    fn complete_task(
        &self,
        task_id: i32,
        cost: f64,
        performed_on: NaiveDate,
    ) -> Result<MaintenanceTask, RepositoryError> {
        self.with_rows(|rows| {
            let task = rows
                .tasks
                .iter_mut()
                .find(|t| t.id == task_id)
                .ok_or_else(|| RepositoryError::missing("maintenance task", task_id))?;
            task.status = MaintenanceStatus::Completed;
            task.performed_date = Some(performed_on);
            task.cost = cost;
            let task = task.clone();
            if let Some(asset_id) = task.asset_id {
                if let Some(asset) = rows.assets.iter_mut().find(|a| a.id == asset_id) {
                    asset.status = AssetStatus::Active;
                }
            }
            Ok(task)
        })
    }
}
