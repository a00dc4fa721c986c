//! Deterministic dataset generation from seed definitions.
//!
//! The same seed definition always produces an identical dataset: the RNG is
//! a ChaCha8 stream seeded from the definition's seed value, and every
//! generation step draws from it in a fixed order.

use fake::Fake;
use fake::faker::address::raw::CityName;
use fake::faker::company::raw::CompanyName;
use fake::faker::internet::raw::FreeEmail;
use fake::faker::lorem::raw::Sentence;
use fake::faker::name::raw::Name;
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::EN;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::registry::SeedDefinition;
use crate::seed::{
    ClientSeed, ClientStatusSeed, DemoAccountSeed, DemoDataset, EmployeeSeed, FinanceRecordSeed,
    InventoryItemSeed, ProjectSeed, ProjectStatusSeed, RoleSeed, TransactionTypeSeed, VendorSeed,
};

/// Password shared by the fixed demonstration accounts.
pub const DEMO_PASSWORD: &str = "admin123";

/// Construction materials the inventory generator draws names from.
const INVENTORY_CATALOGUE: [&str; 10] = [
    "Cement",
    "Steel Rods",
    "Bricks",
    "Sand",
    "Paint",
    "Tiles",
    "Glass",
    "Wood",
    "Pipes",
    "Wires",
];

const PROJECT_STATUSES: [ProjectStatusSeed; 4] = [
    ProjectStatusSeed::Planned,
    ProjectStatusSeed::Active,
    ProjectStatusSeed::Completed,
    ProjectStatusSeed::OnHold,
];

const CLIENT_STATUSES: [ClientStatusSeed; 3] = [
    ClientStatusSeed::Lead,
    ClientStatusSeed::Active,
    ClientStatusSeed::Inactive,
];

const TRANSACTION_TYPES: [TransactionTypeSeed; 2] =
    [TransactionTypeSeed::Income, TransactionTypeSeed::Expense];

const EMPLOYEE_ROLES: [&str; 4] = ["Manager", "Engineer", "Laborer", "Driver"];

const DEPARTMENTS: [&str; 3] = ["Civil", "Electrical", "Admin"];

const FINANCE_CATEGORIES: [&str; 4] = ["Sales", "Materials", "Service", "Labour"];

const PAYMENT_METHODS: [&str; 2] = ["Cash", "Bank Transfer"];

const WAREHOUSES: [&str; 2] = ["Warehouse A", "Warehouse B"];

/// Generates a complete demonstration dataset from a seed definition.
///
/// The fixed login accounts (one per role, password [`DEMO_PASSWORD`]) are
/// always present; the remaining collections honour the definition's counts.
/// Identical input always yields an identical dataset.
///
/// # Errors
///
/// Returns [`GenerationError::InventoryCatalogueExhausted`] when the
/// definition requests more inventory items than the catalogue has distinct
/// names for.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_demo_dataset};
///
/// let registry = SeedRegistry::embedded().expect("valid");
/// let seed_def = registry.find_seed("showcase").expect("found");
/// let dataset = generate_demo_dataset(seed_def).expect("generated");
/// assert_eq!(dataset.projects.len(), 5);
/// ```
pub fn generate_demo_dataset(seed_def: &SeedDefinition) -> Result<DemoDataset, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());

    let projects = (0..seed_def.project_count())
        .map(|_| generate_project(&mut rng))
        .collect();
    let clients = (0..seed_def.client_count())
        .map(|_| generate_client(&mut rng))
        .collect();
    let vendors = (0..seed_def.vendor_count())
        .map(|_| generate_vendor(&mut rng))
        .collect();
    let inventory_items = generate_inventory(&mut rng, seed_def.inventory_count())?;
    let employees = (0..seed_def.employee_count())
        .map(|_| generate_employee(&mut rng))
        .collect();
    let finance_records = (0..seed_def.finance_count())
        .map(|_| generate_finance_record(&mut rng))
        .collect();

    Ok(DemoDataset {
        accounts: demo_accounts(),
        projects,
        clients,
        vendors,
        inventory_items,
        employees,
        finance_records,
    })
}

/// The three fixed demonstration accounts, one per role.
fn demo_accounts() -> Vec<DemoAccountSeed> {
    vec![
        DemoAccountSeed {
            display_name: "System Owner".to_owned(),
            email: "owner@company.com".to_owned(),
            role: RoleSeed::Owner,
            password: DEMO_PASSWORD.to_owned(),
        },
        DemoAccountSeed {
            display_name: "Operations Director".to_owned(),
            email: "director@company.com".to_owned(),
            role: RoleSeed::Director,
            password: DEMO_PASSWORD.to_owned(),
        },
        DemoAccountSeed {
            display_name: "Senior Accountant".to_owned(),
            email: "accounts@company.com".to_owned(),
            role: RoleSeed::AccountingStaff,
            password: DEMO_PASSWORD.to_owned(),
        },
    ]
}

fn generate_project(rng: &mut ChaCha8Rng) -> ProjectSeed {
    let city: String = CityName(EN).fake_with_rng(rng);
    ProjectSeed {
        name: format!("{city} Construction"),
        client: CompanyName(EN).fake_with_rng(rng),
        start_offset_days: rng.random_range(-365..=0),
        duration_days: rng.random_range(30..=365),
        status: pick(rng, &PROJECT_STATUSES, ProjectStatusSeed::Planned),
        total_budget: rng.random_range(50_000.0..=500_000.0),
        progress: rng.random_range(0..=100),
        description: Sentence(EN, 3..6).fake_with_rng(rng),
    }
}

fn generate_client(rng: &mut ChaCha8Rng) -> ClientSeed {
    ClientSeed {
        name: Name(EN).fake_with_rng(rng),
        company: CompanyName(EN).fake_with_rng(rng),
        email: FreeEmail(EN).fake_with_rng(rng),
        phone: PhoneNumber(EN).fake_with_rng(rng),
        status: pick(rng, &CLIENT_STATUSES, ClientStatusSeed::Lead),
    }
}

fn generate_vendor(rng: &mut ChaCha8Rng) -> VendorSeed {
    VendorSeed {
        name: CompanyName(EN).fake_with_rng(rng),
        contact_person: Name(EN).fake_with_rng(rng),
        phone: PhoneNumber(EN).fake_with_rng(rng),
        email: FreeEmail(EN).fake_with_rng(rng),
        rating: rng.random_range(1..=5),
    }
}

/// Draws item names from the catalogue without replacement so names stay
/// unique within one dataset.
fn generate_inventory(
    rng: &mut ChaCha8Rng,
    count: usize,
) -> Result<Vec<InventoryItemSeed>, GenerationError> {
    if count > INVENTORY_CATALOGUE.len() {
        return Err(GenerationError::InventoryCatalogueExhausted {
            requested: count,
            available: INVENTORY_CATALOGUE.len(),
        });
    }

    let mut names = INVENTORY_CATALOGUE.to_vec();
    names.shuffle(rng);
    names.truncate(count);

    Ok(names
        .into_iter()
        .map(|name| InventoryItemSeed {
            name: name.to_owned(),
            category: "Raw Material".to_owned(),
            current_stock: rng.random_range(0..=500),
            unit: "units".to_owned(),
            min_stock_alert: 50,
            location: pick(rng, &WAREHOUSES, "Warehouse A").to_owned(),
        })
        .collect())
}

fn generate_employee(rng: &mut ChaCha8Rng) -> EmployeeSeed {
    EmployeeSeed {
        name: Name(EN).fake_with_rng(rng),
        role: pick(rng, &EMPLOYEE_ROLES, "Laborer").to_owned(),
        department: pick(rng, &DEPARTMENTS, "Civil").to_owned(),
        salary: rng.random_range(2_000.0..=8_000.0),
        joining_offset_days: rng.random_range(-730..=0),
    }
}

fn generate_finance_record(rng: &mut ChaCha8Rng) -> FinanceRecordSeed {
    FinanceRecordSeed {
        date_offset_days: rng.random_range(-90..=0),
        transaction_type: pick(rng, &TRANSACTION_TYPES, TransactionTypeSeed::Expense),
        category: pick(rng, &FINANCE_CATEGORIES, "Materials").to_owned(),
        amount: rng.random_range(100.0..=5_000.0),
        description: Sentence(EN, 4..8).fake_with_rng(rng),
        payment_method: pick(rng, &PAYMENT_METHODS, "Cash").to_owned(),
    }
}

/// Picks one element; the fallback only applies to an empty slice, which the
/// fixed option arrays never are.
fn pick<T: Copy>(rng: &mut ChaCha8Rng, options: &[T], fallback: T) -> T {
    options.choose(rng).copied().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::registry::SeedRegistry;

    #[fixture]
    fn registry() -> SeedRegistry {
        SeedRegistry::embedded().expect("bundled registry is valid")
    }

    #[rstest]
    fn honours_seed_counts(registry: SeedRegistry) {
        let seed_def = registry.find_seed("showcase").expect("seed found");
        let dataset = generate_demo_dataset(seed_def).expect("generated");

        assert_eq!(dataset.accounts.len(), 3);
        assert_eq!(dataset.projects.len(), seed_def.project_count());
        assert_eq!(dataset.clients.len(), seed_def.client_count());
        assert_eq!(dataset.vendors.len(), seed_def.vendor_count());
        assert_eq!(dataset.inventory_items.len(), seed_def.inventory_count());
        assert_eq!(dataset.employees.len(), seed_def.employee_count());
        assert_eq!(dataset.finance_records.len(), seed_def.finance_count());
    }

    #[rstest]
    fn same_seed_produces_identical_datasets(registry: SeedRegistry) {
        let seed_def = registry.find_seed("showcase").expect("seed found");
        let first = generate_demo_dataset(seed_def).expect("generated");
        let second = generate_demo_dataset(seed_def).expect("generated");
        assert_eq!(first, second);
    }

    #[rstest]
    fn different_seeds_produce_different_datasets(registry: SeedRegistry) {
        let showcase = registry.find_seed("showcase").expect("seed found");
        let smoke = registry.find_seed("smoke").expect("seed found");
        let first = generate_demo_dataset(showcase).expect("generated");
        let second = generate_demo_dataset(smoke).expect("generated");
        assert_ne!(first.projects, second.projects);
    }

    #[rstest]
    fn accounts_cover_every_role(registry: SeedRegistry) {
        let seed_def = registry.find_seed("smoke").expect("seed found");
        let dataset = generate_demo_dataset(seed_def).expect("generated");
        let roles: Vec<RoleSeed> = dataset.accounts.iter().map(|a| a.role).collect();
        assert!(roles.contains(&RoleSeed::Owner));
        assert!(roles.contains(&RoleSeed::Director));
        assert!(roles.contains(&RoleSeed::AccountingStaff));
        assert!(dataset.accounts.iter().all(|a| a.password == DEMO_PASSWORD));
    }

    #[rstest]
    fn inventory_names_are_unique(registry: SeedRegistry) {
        let seed_def = registry.find_seed("showcase").expect("seed found");
        let dataset = generate_demo_dataset(seed_def).expect("generated");
        let mut names: Vec<&str> = dataset
            .inventory_items
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), dataset.inventory_items.len());
    }

    #[test]
    fn rejects_inventory_counts_beyond_catalogue() {
        let json = r#"{
            "version": 1,
            "seeds": [{
                "name": "greedy", "seed": 3,
                "projectCount": 0, "clientCount": 0, "vendorCount": 0,
                "inventoryCount": 99, "employeeCount": 0, "financeCount": 0
            }]
        }"#;
        let greedy = SeedRegistry::from_json(json).expect("valid registry");
        let seed_def = greedy.find_seed("greedy").expect("seed found");
        let err = generate_demo_dataset(seed_def).unwrap_err();
        assert_eq!(
            err,
            GenerationError::InventoryCatalogueExhausted {
                requested: 99,
                available: 10
            }
        );
    }

    #[rstest]
    fn generated_values_respect_ranges(registry: SeedRegistry) {
        let seed_def = registry.find_seed("showcase").expect("seed found");
        let dataset = generate_demo_dataset(seed_def).expect("generated");

        for project in &dataset.projects {
            assert!((0..=100).contains(&project.progress));
            assert!(project.start_offset_days <= 0);
            assert!((30..=365).contains(&project.duration_days));
        }
        for vendor in &dataset.vendors {
            assert!((1..=5).contains(&vendor.rating));
        }
        for record in &dataset.finance_records {
            assert!(record.amount >= 100.0);
            assert!(record.date_offset_days <= 0);
        }
    }
}
