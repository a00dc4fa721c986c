//! Plant output logs and quality checks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::labels::define_label_enum;

define_label_enum! {
    /// Outcome of a quality check.
    pub enum QualityResult as "quality result" {
        Pass => "Pass",
        Fail => "Fail",
    }
}

/// One day's production on a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLog {
    /// Surrogate id.
    pub id: i32,
    /// Production date.
    pub date: NaiveDate,
    /// Producing project.
    pub project_id: Option<i32>,
    /// Output quantity. Never negative.
    pub quantity_produced: f64,
    /// Capacity utilisation percentage, 0 to 100 when recorded.
    pub efficiency: Option<f64>,
    /// Waste quantity.
    pub waste_generated: f64,
    /// Free-text remarks.
    pub notes: Option<String>,
}

/// Input for recording a day's production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProductionLog {
    /// Production date.
    pub date: NaiveDate,
    /// Producing project.
    pub project_id: Option<i32>,
    /// Output quantity.
    pub quantity_produced: f64,
    /// Capacity utilisation percentage.
    pub efficiency: Option<f64>,
    /// Waste quantity.
    pub waste_generated: f64,
    /// Free-text remarks.
    pub notes: Option<String>,
}

/// A quality check recorded against a production log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityCheck {
    /// Surrogate id.
    pub id: i32,
    /// Check date.
    pub date: NaiveDate,
    /// The inspected production log.
    pub production_id: Option<i32>,
    /// What was measured.
    pub parameter: Option<String>,
    /// Pass or fail, once judged.
    pub result: Option<QualityResult>,
    /// Free-text remarks.
    pub remarks: Option<String>,
}

/// Input for recording a quality check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQualityCheck {
    /// Check date.
    pub date: NaiveDate,
    /// The inspected production log.
    pub production_id: Option<i32>,
    /// What was measured.
    pub parameter: Option<String>,
    /// Pass or fail.
    pub result: QualityResult,
    /// Free-text remarks.
    pub remarks: Option<String>,
}
