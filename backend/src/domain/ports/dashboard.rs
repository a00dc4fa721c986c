//! Port for the dashboard's cross-module gauges.

use serde::{Deserialize, Serialize};

use super::RepositoryError;

/// Headline figures shown when a session lands on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Projects currently in the Active state.
    pub active_projects: i64,
    /// Projects in any state.
    pub total_projects: i64,
    /// Sum of all income postings.
    pub income: f64,
    /// Sum of all expense postings.
    pub expense: f64,
    /// Employees who have not been deactivated.
    pub active_employees: i64,
    /// Purchase orders still in the Pending state.
    pub pending_orders: i64,
    /// Stock items at or below their alert level.
    pub low_stock_items: i64,
    /// Clients in any state.
    pub clients: i64,
}

impl DashboardSnapshot {
    /// Income minus expense.
    #[must_use]
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Port for the aggregate queries behind the dashboard.
///
/// This is a read model over several stores at once, so it gets its own
/// port rather than fanning out over every repository.
#[cfg_attr(test, mockall::automock)]
pub trait DashboardGauges: Send + Sync {
    /// Compute the current figures.
    fn snapshot(&self) -> Result<DashboardSnapshot, RepositoryError>;
}
