//! Database persistence adapters using Diesel.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL or SQLite through a shared `MultiConnection` and r2d2
//! pooling.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **One SQL dialect**: Everything queries through the multi-backend, so
//!   the same adapter code serves both stores. The few statements that do
//!   differ (id columns, `lastval()`) live in `migrations` and
//!   `diesel_helpers`.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   `RepositoryError` values.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, PoolConfig, DieselPrincipalRepository};
//!
//! let pool = DbPool::new(PoolConfig::new("erp.db"))?;
//! migrations::run(&pool)?;
//! let accounts = DieselPrincipalRepository::new(pool);
//! ```

pub(crate) mod diesel_helpers;
pub mod migrations;
mod models;
mod pool;
mod schema;

mod diesel_audit_log;
mod diesel_crm_repository;
mod diesel_dashboard_gauges;
mod diesel_finance_repository;
mod diesel_inventory_repository;
mod diesel_machinery_repository;
mod diesel_org_repository;
mod diesel_principal_repository;
mod diesel_procurement_repository;
mod diesel_production_repository;
mod diesel_project_repository;
mod diesel_settings_repository;
mod diesel_site_ops_repository;
mod diesel_software_repository;
mod diesel_workforce_repository;

pub use diesel_audit_log::DieselAuditLog;
pub use diesel_crm_repository::DieselCrmRepository;
pub use diesel_dashboard_gauges::DieselDashboardGauges;
pub use diesel_finance_repository::DieselFinanceRepository;
pub use diesel_inventory_repository::DieselInventoryRepository;
pub use diesel_machinery_repository::DieselMachineryRepository;
pub use diesel_org_repository::DieselOrgRepository;
pub use diesel_principal_repository::DieselPrincipalRepository;
pub use diesel_procurement_repository::DieselProcurementRepository;
pub use diesel_production_repository::DieselProductionRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_settings_repository::DieselSettingsRepository;
pub use diesel_site_ops_repository::DieselSiteOpsRepository;
pub use diesel_software_repository::DieselSoftwareRepository;
pub use diesel_workforce_repository::DieselWorkforceRepository;
pub use migrations::MigrationError;
pub use pool::{DbPool, PoolConfig, PoolError};
