//! Error types for the example-data crate.
//!
//! This module defines semantic error enums for registry parsing and dataset
//! generation, following the project's error handling conventions with
//! `thiserror`.

use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// Two seed definitions share the same name.
    #[error("duplicate seed name '{name}' in registry")]
    DuplicateSeedName {
        /// The name that appears more than once.
        name: String,
    },

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur during dataset generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// More inventory items were requested than the fixed catalogue holds.
    ///
    /// Inventory names are drawn without replacement from a fixed catalogue
    /// of construction materials so that item names stay unique.
    #[error("inventory catalogue exhausted: requested {requested}, available {available}")]
    InventoryCatalogueExhausted {
        /// Number of inventory items requested by the seed definition.
        requested: usize,
        /// Number of distinct names the catalogue offers.
        available: usize,
    },
}
