//! Plant assets, usage logs, and maintenance scheduling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::labels::define_label_enum;

define_label_enum! {
    /// What kind of plant an asset is.
    pub enum AssetKind as "asset kind" {
        Machinery => "Machinery",
        Vehicle => "Vehicle",
    }
}

define_label_enum! {
    /// Operational state of an asset.
    pub enum AssetStatus as "asset status" {
        Active => "Active",
        Maintenance => "Maintenance",
        Retired => "Retired",
    }
}

define_label_enum! {
    /// Lifecycle of a maintenance task.
    pub enum MaintenanceStatus as "maintenance status" {
        Scheduled => "Scheduled",
        Completed => "Completed",
        Overdue => "Overdue",
    }
}

/// A machine or vehicle on the asset register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Surrogate id.
    pub id: i32,
    /// Asset name (required).
    pub name: String,
    /// Machinery or vehicle, when classified.
    pub kind: Option<AssetKind>,
    /// Acquired on.
    pub purchase_date: Option<NaiveDate>,
    /// Most recent service.
    pub last_service_date: Option<NaiveDate>,
    /// Next planned service.
    pub next_service_due: Option<NaiveDate>,
    /// Operational state.
    pub status: AssetStatus,
}

/// Input for registering an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAsset {
    /// Asset name (required).
    pub name: String,
    /// Machinery or vehicle.
    pub kind: Option<AssetKind>,
    /// Acquired on.
    pub purchase_date: Option<NaiveDate>,
    /// Most recent service.
    pub last_service_date: Option<NaiveDate>,
    /// Next planned service.
    pub next_service_due: Option<NaiveDate>,
    /// Operational state.
    pub status: AssetStatus,
}

impl NewAsset {
    /// An active asset with only the name filled in.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            purchase_date: None,
            last_service_date: None,
            next_service_due: None,
            status: AssetStatus::Active,
        }
    }
}

/// One day's usage of an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetLog {
    /// Surrogate id.
    pub id: i32,
    /// The used asset.
    pub asset_id: Option<i32>,
    /// Usage date.
    pub date: NaiveDate,
    /// Operating hours. Never negative.
    pub hours_used: f64,
    /// Fuel drawn. Never negative.
    pub fuel_consumed: f64,
    /// Free-text remarks.
    pub notes: Option<String>,
}

/// Input for recording asset usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssetLog {
    /// The used asset.
    pub asset_id: i32,
    /// Usage date.
    pub date: NaiveDate,
    /// Operating hours.
    pub hours_used: f64,
    /// Fuel drawn.
    pub fuel_consumed: f64,
    /// Free-text remarks.
    pub notes: Option<String>,
}

/// A planned or executed maintenance task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceTask {
    /// Surrogate id.
    pub id: i32,
    /// The maintained asset.
    pub asset_id: Option<i32>,
    /// Task description (required).
    pub task_name: String,
    /// Planned date.
    pub scheduled_date: Option<NaiveDate>,
    /// Actual completion date.
    pub performed_date: Option<NaiveDate>,
    /// Lifecycle state.
    pub status: MaintenanceStatus,
    /// Cost once known.
    pub cost: f64,
    /// Assigned technician.
    pub technician: Option<String>,
}

impl MaintenanceTask {
    /// Whether the task has slipped past its planned date without completing.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != MaintenanceStatus::Completed
            && self.scheduled_date.is_some_and(|planned| planned < today)
    }
}

/// Input for scheduling a maintenance task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMaintenanceTask {
    /// The maintained asset.
    pub asset_id: i32,
    /// Task description (required).
    pub task_name: String,
    /// Planned date.
    pub scheduled_date: Option<NaiveDate>,
    /// Assigned technician.
    pub technician: Option<String>,
}
