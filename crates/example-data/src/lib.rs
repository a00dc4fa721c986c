//! Deterministic demonstration dataset generation for the Groundwork ERP.
//!
//! This crate produces believable, reproducible construction-company data
//! (login accounts, projects, clients, vendors, inventory, employees, and
//! ledger entries) from a JSON seed registry. It is independent of backend
//! domain types to avoid circular dependencies; the backend converts seed
//! records into its own entities at the point of use.
//!
//! Dates are expressed as signed day offsets from "today" so the dataset
//! stays deterministic regardless of when it is materialized. Passwords are
//! carried in plain text and hashed by the consumer at insert time.
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_demo_dataset};
//!
//! let registry = SeedRegistry::embedded().expect("bundled registry is valid");
//! let seed_def = registry.find_seed("smoke").expect("seed exists");
//! let dataset = generate_demo_dataset(seed_def).expect("generation succeeds");
//!
//! assert_eq!(dataset.accounts.len(), 3);
//! assert_eq!(dataset.projects.len(), 2);
//!
//! let again = generate_demo_dataset(seed_def).expect("generation succeeds");
//! assert_eq!(dataset, again);
//! ```

mod error;
mod generator;
mod registry;
mod seed;

pub use error::{GenerationError, RegistryError};
pub use generator::{DEMO_PASSWORD, generate_demo_dataset};
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::{
    ClientSeed, ClientStatusSeed, DemoAccountSeed, DemoDataset, EmployeeSeed, FinanceRecordSeed,
    InventoryItemSeed, ProjectSeed, ProjectStatusSeed, RoleSeed, TransactionTypeSeed, VendorSeed,
};
