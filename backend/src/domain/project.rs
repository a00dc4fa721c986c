//! Construction projects and their lifecycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::finance::DEFAULT_CURRENCY;
use crate::domain::labels::define_label_enum;

define_label_enum! {
    /// Project lifecycle states.
    pub enum ProjectStatus as "project status" {
        Planned => "Planned",
        Active => "Active",
        Completed => "Completed",
        OnHold => "On Hold",
    }
}

/// A construction project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Surrogate id.
    pub id: i32,
    /// Project name.
    pub name: String,
    /// Legacy free-text client reference; `client_id` supersedes it.
    pub client: Option<String>,
    /// Planned start.
    pub start_date: Option<NaiveDate>,
    /// Planned completion.
    pub end_date: Option<NaiveDate>,
    /// Lifecycle state.
    pub status: ProjectStatus,
    /// Target budget in `currency`.
    pub total_budget: f64,
    /// Budget currency code.
    pub currency: String,
    /// Owning company.
    pub company_id: Option<i32>,
    /// Owning branch.
    pub branch_id: Option<i32>,
    /// Linked CRM client.
    pub client_id: Option<i32>,
    /// Free-text scope description.
    pub description: Option<String>,
    /// Completion percentage, 0 to 100.
    pub progress: i32,
}

/// Input for creating a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    /// Project name (required).
    pub name: String,
    /// Legacy free-text client reference.
    pub client: Option<String>,
    /// Planned start.
    pub start_date: Option<NaiveDate>,
    /// Planned completion.
    pub end_date: Option<NaiveDate>,
    /// Lifecycle state.
    pub status: ProjectStatus,
    /// Target budget.
    pub total_budget: f64,
    /// Budget currency code.
    pub currency: String,
    /// Linked CRM client.
    pub client_id: Option<i32>,
    /// Free-text scope description.
    pub description: Option<String>,
    /// Completion percentage, 0 to 100.
    pub progress: i32,
}

impl NewProject {
    /// A planned project with a zero budget in the default currency.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            client: None,
            start_date: None,
            end_date: None,
            status: ProjectStatus::Planned,
            total_budget: 0.0,
            currency: DEFAULT_CURRENCY.to_string(),
            client_id: None,
            description: None,
            progress: 0,
        }
    }
}

/// Partial update applied to an existing project. `None` leaves the stored
/// value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectChanges {
    /// New lifecycle state.
    pub status: Option<ProjectStatus>,
    /// New completion percentage, 0 to 100.
    pub progress: Option<i32>,
    /// New target budget.
    pub total_budget: Option<f64>,
}

/// Project tally for one lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStatusCount {
    /// The counted state.
    pub status: ProjectStatus,
    /// Projects currently in it.
    pub count: i64,
}
