//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Each port pairs a trait with an in-memory implementation so services can
//! be exercised without a database. Diesel-backed adapters live under
//! `crate::outbound::persistence`.

mod macros;
pub(crate) use macros::define_port_error;

mod audit_log;
mod crm_repository;
mod dashboard;
mod error;
mod finance_repository;
mod inventory_repository;
mod machinery_repository;
mod org_repository;
mod principal_repository;
mod procurement_repository;
mod production_repository;
mod project_repository;
mod settings_repository;
mod site_ops_repository;
mod software_repository;
mod workforce_repository;

#[cfg(test)]
pub use audit_log::MockAuditLog;
pub use audit_log::{AuditLog, MemoryAuditLog, NewAuditRecord};
#[cfg(test)]
pub use crm_repository::MockCrmRepository;
pub use crm_repository::{CrmRepository, MemoryCrmRepository};
#[cfg(test)]
pub use dashboard::MockDashboardGauges;
pub use dashboard::{DashboardGauges, DashboardSnapshot};
pub use error::RepositoryError;
#[cfg(test)]
pub use finance_repository::MockFinanceRepository;
pub use finance_repository::{FinanceRepository, MemoryFinanceRepository};
#[cfg(test)]
pub use inventory_repository::MockInventoryRepository;
pub use inventory_repository::{InventoryRepository, MemoryInventoryRepository};
#[cfg(test)]
pub use machinery_repository::MockMachineryRepository;
pub use machinery_repository::{MachineryRepository, MemoryMachineryRepository};
#[cfg(test)]
pub use org_repository::MockOrgRepository;
pub use org_repository::{MemoryOrgRepository, OrgRepository};
#[cfg(test)]
pub use principal_repository::MockPrincipalRepository;
pub use principal_repository::{
    MemoryPrincipalRepository, NewPrincipal, PrincipalRecord, PrincipalRepository, RoleCount,
};
#[cfg(test)]
pub use procurement_repository::MockProcurementRepository;
pub use procurement_repository::{MemoryProcurementRepository, ProcurementRepository};
#[cfg(test)]
pub use production_repository::MockProductionRepository;
pub use production_repository::{MemoryProductionRepository, ProductionRepository};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{MemoryProjectRepository, ProjectRepository};
#[cfg(test)]
pub use settings_repository::MockSettingsRepository;
pub use settings_repository::{MemorySettingsRepository, SettingsRepository};
#[cfg(test)]
pub use site_ops_repository::MockSiteOpsRepository;
pub use site_ops_repository::{MemorySiteOpsRepository, SiteOpsRepository};
#[cfg(test)]
pub use software_repository::MockSoftwareRepository;
pub use software_repository::{MemorySoftwareRepository, SoftwareRepository};
#[cfg(test)]
pub use workforce_repository::MockWorkforceRepository;
pub use workforce_repository::{MemoryWorkforceRepository, WorkforceRepository};
