//! Licensed software registry.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::labels::define_label_enum;

define_label_enum! {
    /// Lifecycle of a software licence.
    pub enum SoftwareStatus as "software status" {
        Active => "Active",
        Expired => "Expired",
        PendingUpdate => "Pending Update",
    }
}

/// A licensed software product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareAsset {
    /// Surrogate id.
    pub id: i32,
    /// Product name (required).
    pub name: String,
    /// Installed version.
    pub version: Option<String>,
    /// Licence key.
    pub license_key: Option<String>,
    /// Licence lapses on.
    pub expiry_date: Option<NaiveDate>,
    /// Lifecycle state.
    pub status: SoftwareStatus,
    /// Person or team using it.
    pub assigned_to: Option<String>,
}

impl SoftwareAsset {
    /// Whether the licence lapses within `days` of `today` (and has not
    /// already lapsed).
    #[must_use]
    pub fn expires_within(&self, today: NaiveDate, days: u64) -> bool {
        self.expiry_date.is_some_and(|expiry| {
            expiry >= today
                && today
                    .checked_add_days(Days::new(days))
                    .is_some_and(|horizon| expiry <= horizon)
        })
    }
}

/// Input for registering a software asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSoftwareAsset {
    /// Product name (required).
    pub name: String,
    /// Installed version.
    pub version: Option<String>,
    /// Licence key.
    pub license_key: Option<String>,
    /// Licence lapses on.
    pub expiry_date: Option<NaiveDate>,
    /// Lifecycle state.
    pub status: SoftwareStatus,
    /// Person or team using it.
    pub assigned_to: Option<String>,
}

impl NewSoftwareAsset {
    /// An active licence with only the name filled in.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            license_key: None,
            expiry_date: None,
            status: SoftwareStatus::Active,
            assigned_to: None,
        }
    }
}
