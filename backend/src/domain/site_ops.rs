//! Site safety incidents and document registry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::labels::define_label_enum;

define_label_enum! {
    /// Classification of an HSE event.
    pub enum IncidentKind as "incident type" {
        NearMiss => "Near Miss",
        Injury => "Injury",
        Inspection => "Inspection",
    }
}

define_label_enum! {
    /// Whether an HSE record still needs action.
    pub enum HseStatus as "HSE status" {
        Open => "Open",
        Closed => "Closed",
    }
}

/// A health, safety, and environment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HseRecord {
    /// Surrogate id.
    pub id: i32,
    /// Event date.
    pub date: NaiveDate,
    /// Affected project.
    pub project_id: Option<i32>,
    /// Event classification.
    pub incident_type: Option<IncidentKind>,
    /// What happened.
    pub description: Option<String>,
    /// Remediation taken.
    pub action_taken: Option<String>,
    /// Who raised it.
    pub reported_by: Option<String>,
    /// Open until resolved.
    pub status: HseStatus,
}

/// Input for reporting an HSE event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHseRecord {
    /// Event date.
    pub date: NaiveDate,
    /// Affected project.
    pub project_id: Option<i32>,
    /// Event classification (required).
    pub incident_type: IncidentKind,
    /// What happened.
    pub description: Option<String>,
    /// Remediation taken.
    pub action_taken: Option<String>,
    /// Who raised it.
    pub reported_by: Option<String>,
}

/// A filed site document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAsset {
    /// Surrogate id.
    pub id: i32,
    /// Document title (required).
    pub title: String,
    /// Grouping, e.g. "Drawings".
    pub category: Option<String>,
    /// Where the file lives.
    pub file_path: Option<String>,
    /// Filed on.
    pub upload_date: NaiveDate,
    /// Related project.
    pub project_id: Option<i32>,
}

/// Input for filing a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocumentAsset {
    /// Document title (required).
    pub title: String,
    /// Grouping.
    pub category: Option<String>,
    /// Where the file lives.
    pub file_path: Option<String>,
    /// Filed on.
    pub upload_date: NaiveDate,
    /// Related project.
    pub project_id: Option<i32>,
}
