//! Role-gated services behind the menu screens.
//!
//! One service per screen. Every operation takes the caller's [`Session`]
//! and re-checks the screen's role list before touching a store, so a
//! handler reached through a stale or forged link still cannot read or
//! mutate anything. The gate mirrors the menu: whatever a role can see it
//! can use, and nothing else.

mod admin;
mod compliance;
mod crm;
mod dashboard;
mod finance;
mod hr;
mod inventory;
mod machinery;
mod mis;
mod planning;
mod production;
mod projects;
mod purchasing;
mod site_ops;
mod software;
mod system_config;
mod workforce;

pub use admin::AdminService;
pub use compliance::{ComplianceService, SecurityOverview};
pub use crm::CrmService;
pub use dashboard::DashboardService;
pub use finance::FinanceService;
pub use hr::HrService;
pub use inventory::InventoryService;
pub use machinery::MachineryService;
pub use mis::{MisService, ProjectProgress, RECENT_ACTIVITY_LIMIT};
pub use planning::PlanningService;
pub use production::ProductionService;
pub use projects::ProjectService;
pub use purchasing::PurchasingService;
pub use site_ops::SiteOpsService;
pub use software::{EXPIRY_WINDOW_DAYS, SoftwareService};
pub use system_config::SystemConfigService;
pub use workforce::{Recruit, WorkforceService};

use crate::domain::error::{ModuleError, ValidationError};
use crate::domain::menu::{Screen, check_access};
use crate::domain::session::Session;

/// Gate an operation on `screen`'s role list.
fn authorize(session: &Session, screen: Screen) -> Result<(), ModuleError> {
    if check_access(Some(session), screen.allowed_roles()) {
        Ok(())
    } else {
        Err(ModuleError::access_denied(screen.label()))
    }
}

/// Reject a blank or whitespace-only mandatory text field.
fn require_text(field: &'static str, value: &str) -> Result<(), ModuleError> {
    if value.trim().is_empty() {
        Err(ValidationError::required(field).into())
    } else {
        Ok(())
    }
}
