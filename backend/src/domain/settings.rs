//! Key-value system settings.

use serde::{Deserialize, Serialize};

/// One stored configuration entry, unique by `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingEntry {
    /// Surrogate id.
    pub id: i32,
    /// Grouping, e.g. "Branding".
    pub category: Option<String>,
    /// Unique lookup key.
    pub key: String,
    /// Stored value.
    pub value: Option<String>,
    /// What this setting controls.
    pub description: Option<String>,
}

/// Upsert input: inserts when the key is new, otherwise overwrites value and
/// description in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingUpsert {
    /// Grouping.
    pub category: Option<String>,
    /// Unique lookup key (required).
    pub key: String,
    /// New value.
    pub value: Option<String>,
    /// New description.
    pub description: Option<String>,
}
