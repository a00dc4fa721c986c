//! Demonstration data seeding, compiled behind the `example-data` feature.
//!
//! Converts a deterministic generated dataset into domain entities and loads
//! them through the repository ports. Seeding is skip-if-populated: when any
//! account row already exists the seeder exits without writing, so pointing
//! it at a live store is harmless. Passwords arrive in plain text from the
//! generator and are hashed here, at insert time.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use example_data::{
    ClientStatusSeed, GenerationError, ProjectStatusSeed, RegistryError, RoleSeed, SeedRegistry,
    TransactionTypeSeed, generate_demo_dataset,
};
use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tracing::info;

use crate::domain::crm::{ClientStatus, NewClient};
use crate::domain::error::StorageError;
use crate::domain::finance::{NewFinanceRecord, TransactionKind};
use crate::domain::inventory::NewInventoryItem;
use crate::domain::ports::{
    CrmRepository, FinanceRepository, InventoryRepository, NewPrincipal, PrincipalRepository,
    ProcurementRepository, ProjectRepository, RepositoryError, WorkforceRepository,
};
use crate::domain::procurement::NewVendor;
use crate::domain::project::{NewProject, ProjectStatus};
use crate::domain::user::{DisplayName, EmailAddress, Role};
use crate::domain::workforce::NewEmployee;
use crate::outbound::persistence::{
    DbPool, DieselCrmRepository, DieselFinanceRepository, DieselInventoryRepository,
    DieselPrincipalRepository, DieselProcurementRepository, DieselProjectRepository,
    DieselWorkforceRepository,
};

/// What a seeding run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The dataset was written.
    Applied {
        /// Login accounts inserted.
        accounts: usize,
        /// Non-account rows inserted across all stores.
        rows: usize,
    },
    /// The store already held accounts, so nothing was written.
    SkippedPopulated {
        /// How many accounts were already present.
        existing_accounts: i64,
    },
}

/// Failures raised while generating or loading a demo dataset.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed registry could not be parsed or the name is unknown.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Dataset generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// A generated account failed identity validation or hashing.
    #[error("generated account rejected: {message}")]
    Account {
        /// What the account failed on.
        message: String,
    },
    /// A store rejected a write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<RepositoryError> for SeedError {
    fn from(error: RepositoryError) -> Self {
        Self::Storage(error.into())
    }
}

/// Loads generated datasets into the stores behind the repository ports.
#[derive(Clone)]
pub struct DemoSeeder {
    principals: Arc<dyn PrincipalRepository>,
    projects: Arc<dyn ProjectRepository>,
    crm: Arc<dyn CrmRepository>,
    procurement: Arc<dyn ProcurementRepository>,
    inventory: Arc<dyn InventoryRepository>,
    workforce: Arc<dyn WorkforceRepository>,
    finance: Arc<dyn FinanceRepository>,
    clock: Arc<dyn Clock>,
}

impl DemoSeeder {
    /// Create a seeder over every target store.
    #[expect(clippy::too_many_arguments, reason = "one handle per seeded store")]
    pub fn new(
        principals: Arc<dyn PrincipalRepository>,
        projects: Arc<dyn ProjectRepository>,
        crm: Arc<dyn CrmRepository>,
        procurement: Arc<dyn ProcurementRepository>,
        inventory: Arc<dyn InventoryRepository>,
        workforce: Arc<dyn WorkforceRepository>,
        finance: Arc<dyn FinanceRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            principals,
            projects,
            crm,
            procurement,
            inventory,
            workforce,
            finance,
            clock,
        }
    }

    /// Generate the named dataset and load it, unless accounts already exist.
    pub fn seed(&self, registry: &SeedRegistry, seed_name: &str) -> Result<SeedOutcome, SeedError> {
        let seed_def = registry.find_seed(seed_name)?;

        let existing_accounts = self.principals.count()?;
        if existing_accounts > 0 {
            info!(
                existing_accounts,
                seed = seed_def.name(),
                "store already populated; demo seeding skipped"
            );
            return Ok(SeedOutcome::SkippedPopulated { existing_accounts });
        }

        let dataset = generate_demo_dataset(seed_def)?;
        let now = self.clock.local().naive_local();
        let today = now.date();

        let accounts = dataset.accounts.len();
        for account in dataset.accounts {
            let hash = bcrypt::hash(&account.password, bcrypt::DEFAULT_COST).map_err(|error| {
                SeedError::Account {
                    message: format!("credential hashing failed: {error}"),
                }
            })?;
            let new_account = NewPrincipal {
                display_name: DisplayName::new(account.display_name).map_err(account_error)?,
                email: EmailAddress::new(account.email).map_err(account_error)?,
                credential_hash: hash,
                role: role_from_seed(account.role),
                company_id: None,
                branch_id: None,
                active: true,
                created_at: now,
            };
            self.principals.insert(&new_account)?;
        }

        let mut rows = 0_usize;
        for seed in dataset.projects {
            let start = offset_date(today, seed.start_offset_days);
            let mut project = NewProject::new(seed.name);
            project.client = Some(seed.client);
            project.start_date = Some(start);
            project.end_date = Some(offset_date(start, seed.duration_days));
            project.status = project_status_from_seed(seed.status);
            project.total_budget = seed.total_budget;
            project.description = Some(seed.description);
            project.progress = seed.progress;
            self.projects.insert(&project)?;
            rows += 1;
        }
        for seed in dataset.clients {
            let mut client = NewClient::new(seed.name);
            client.company = Some(seed.company);
            client.email = Some(seed.email);
            client.phone = Some(seed.phone);
            client.status = client_status_from_seed(seed.status);
            self.crm.insert_client(&client, now)?;
            rows += 1;
        }
        for seed in dataset.vendors {
            let mut vendor = NewVendor::new(seed.name);
            vendor.contact_person = Some(seed.contact_person);
            vendor.phone = Some(seed.phone);
            vendor.email = Some(seed.email);
            vendor.rating = seed.rating;
            self.procurement.insert_vendor(&vendor)?;
            rows += 1;
        }
        for seed in dataset.inventory_items {
            let mut item = NewInventoryItem::new(seed.name);
            item.category = Some(seed.category);
            item.current_stock = f64::from(seed.current_stock);
            item.unit = Some(seed.unit);
            item.min_stock_alert = f64::from(seed.min_stock_alert);
            item.location = Some(seed.location);
            self.inventory.insert(&item, now)?;
            rows += 1;
        }
        for seed in dataset.employees {
            let mut employee = NewEmployee::new(seed.name);
            employee.role = Some(seed.role);
            employee.department = Some(seed.department);
            employee.joining_date = Some(offset_date(today, seed.joining_offset_days));
            employee.salary = seed.salary;
            self.workforce.insert_employee(&employee)?;
            rows += 1;
        }
        for seed in dataset.finance_records {
            let mut entry = NewFinanceRecord::new(
                offset_date(today, seed.date_offset_days),
                kind_from_seed(seed.transaction_type),
                seed.amount,
            );
            entry.category = Some(seed.category);
            entry.description = Some(seed.description);
            entry.payment_method = Some(seed.payment_method);
            self.finance.post_entry(&entry)?;
            rows += 1;
        }

        info!(seed = seed_def.name(), accounts, rows, "demo dataset applied");
        Ok(SeedOutcome::Applied { accounts, rows })
    }
}

/// Seed the named dataset from the embedded registry into the pooled store.
pub fn seed_from_embedded_registry(
    pool: &DbPool,
    seed_name: &str,
) -> Result<SeedOutcome, SeedError> {
    let registry = SeedRegistry::embedded()?;
    let seeder = DemoSeeder::new(
        Arc::new(DieselPrincipalRepository::new(pool.clone())),
        Arc::new(DieselProjectRepository::new(pool.clone())),
        Arc::new(DieselCrmRepository::new(pool.clone())),
        Arc::new(DieselProcurementRepository::new(pool.clone())),
        Arc::new(DieselInventoryRepository::new(pool.clone())),
        Arc::new(DieselWorkforceRepository::new(pool.clone())),
        Arc::new(DieselFinanceRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    );
    seeder.seed(&registry, seed_name)
}

fn account_error(error: crate::domain::user::IdentityFieldError) -> SeedError {
    SeedError::Account {
        message: error.to_string(),
    }
}

/// Resolve a signed day offset against a base date, saturating at the base
/// when the offset cannot be represented.
fn offset_date(base: NaiveDate, offset_days: i64) -> NaiveDate {
    let magnitude = Days::new(offset_days.unsigned_abs());
    let resolved = if offset_days < 0 {
        base.checked_sub_days(magnitude)
    } else {
        base.checked_add_days(magnitude)
    };
    resolved.unwrap_or(base)
}

fn role_from_seed(role: RoleSeed) -> Role {
    match role {
        RoleSeed::Owner => Role::Owner,
        RoleSeed::Director => Role::Director,
        RoleSeed::AccountingStaff => Role::AccountingStaff,
    }
}

fn project_status_from_seed(status: ProjectStatusSeed) -> ProjectStatus {
    match status {
        ProjectStatusSeed::Planned => ProjectStatus::Planned,
        ProjectStatusSeed::Active => ProjectStatus::Active,
        ProjectStatusSeed::Completed => ProjectStatus::Completed,
        ProjectStatusSeed::OnHold => ProjectStatus::OnHold,
    }
}

fn client_status_from_seed(status: ClientStatusSeed) -> ClientStatus {
    match status {
        ClientStatusSeed::Lead => ClientStatus::Lead,
        ClientStatusSeed::Active => ClientStatus::Active,
        ClientStatusSeed::Inactive => ClientStatus::Inactive,
    }
}

fn kind_from_seed(kind: TransactionTypeSeed) -> TransactionKind {
    match kind {
        TransactionTypeSeed::Income => TransactionKind::Income,
        TransactionTypeSeed::Expense => TransactionKind::Expense,
    }
}
