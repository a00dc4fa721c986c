//! Seed registry types and JSON parsing.
//!
//! The registry holds named seed definitions: an RNG seed plus per-entity
//! row counts. A copy ships embedded in the crate so consumers need no file
//! access to obtain the default seeds.

use serde::Deserialize;

use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// Registry JSON bundled with the crate.
const EMBEDDED_REGISTRY_JSON: &str = include_str!("../fixtures/seeds.json");

/// A seed registry containing named seed definitions.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{
///         "name": "test", "seed": 42,
///         "projectCount": 1, "clientCount": 1, "vendorCount": 1,
///         "inventoryCount": 2, "employeeCount": 1, "financeCount": 3
///     }]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the JSON is malformed, the version is
    /// unsupported, the seeds array is empty, or two seeds share a name.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let mut names: Vec<&str> = raw.seeds.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|pair| pair.first() == pair.last()) {
            return Err(RegistryError::DuplicateSeedName {
                name: pair.first().copied().unwrap_or_default().to_owned(),
            });
        }

        Ok(Self {
            version: raw.version,
            seeds: raw.seeds,
        })
    }

    /// Parses the registry bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the bundled JSON fails validation; this
    /// indicates a packaging defect rather than a caller mistake.
    pub fn embedded() -> Result<Self, RegistryError> {
        Self::from_json(EMBEDDED_REGISTRY_JSON)
    }

    /// The registry format version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// All seed definitions, in declaration order.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Looks up a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] when no seed carries `name`.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|seed| seed.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

/// One named seed: an RNG seed value plus per-entity row counts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    project_count: usize,
    client_count: usize,
    vendor_count: usize,
    inventory_count: usize,
    employee_count: usize,
    finance_count: usize,
}

impl SeedDefinition {
    /// The seed's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of projects to generate.
    #[must_use]
    pub const fn project_count(&self) -> usize {
        self.project_count
    }

    /// Number of clients to generate.
    #[must_use]
    pub const fn client_count(&self) -> usize {
        self.client_count
    }

    /// Number of vendors to generate.
    #[must_use]
    pub const fn vendor_count(&self) -> usize {
        self.vendor_count
    }

    /// Number of inventory items to generate.
    #[must_use]
    pub const fn inventory_count(&self) -> usize {
        self.inventory_count
    }

    /// Number of employees to generate.
    #[must_use]
    pub const fn employee_count(&self) -> usize {
        self.employee_count
    }

    /// Number of finance ledger entries to generate.
    #[must_use]
    pub const fn finance_count(&self) -> usize {
        self.finance_count
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSeedRegistry {
    version: u32,
    seeds: Vec<SeedDefinition>,
}
