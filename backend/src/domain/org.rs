//! Organisational structure: companies and their branches.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::finance::DEFAULT_CURRENCY;

/// A legal entity that owns projects, users, and ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Surrogate id.
    pub id: i32,
    /// Registered name.
    pub name: String,
    /// First day of the fiscal year, when configured.
    pub fiscal_year_start: Option<NaiveDate>,
    /// Ledger currency code.
    pub base_currency: String,
    /// Statutory registration number.
    pub registration_number: Option<String>,
    /// Registered address.
    pub address: Option<String>,
}

/// Input for creating a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCompany {
    /// Registered name (required).
    pub name: String,
    /// First day of the fiscal year.
    pub fiscal_year_start: Option<NaiveDate>,
    /// Ledger currency code.
    pub base_currency: String,
    /// Statutory registration number.
    pub registration_number: Option<String>,
    /// Registered address.
    pub address: Option<String>,
}

impl NewCompany {
    /// A company with the default currency and nothing else filled in.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fiscal_year_start: None,
            base_currency: DEFAULT_CURRENCY.to_string(),
            registration_number: None,
            address: None,
        }
    }
}

/// An operating location under a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Surrogate id.
    pub id: i32,
    /// Owning company.
    pub company_id: Option<i32>,
    /// Branch name.
    pub name: String,
    /// Free-text location.
    pub location: Option<String>,
}

/// Input for creating a branch under a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBranch {
    /// Owning company.
    pub company_id: i32,
    /// Branch name (required).
    pub name: String,
    /// Free-text location.
    pub location: Option<String>,
}
