//! Clients and contracts.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::labels::define_label_enum;

define_label_enum! {
    /// Client relationship states.
    pub enum ClientStatus as "client status" {
        Lead => "Lead",
        Active => "Active",
        Inactive => "Inactive",
    }
}

define_label_enum! {
    /// Contract lifecycle states.
    pub enum ContractStatus as "contract status" {
        Draft => "Draft",
        Signed => "Signed",
        Terminated => "Terminated",
        Completed => "Completed",
    }
}

/// A customer or prospect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Surrogate id.
    pub id: i32,
    /// Contact name (required).
    pub name: String,
    /// Their organisation.
    pub company: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Relationship state.
    pub status: ClientStatus,
    /// Stamped at creation.
    pub created_at: NaiveDateTime,
}

/// Input for creating a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    /// Contact name (required).
    pub name: String,
    /// Their organisation.
    pub company: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Relationship state.
    pub status: ClientStatus,
}

impl NewClient {
    /// A fresh lead with only the name filled in.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: None,
            email: None,
            phone: None,
            address: None,
            status: ClientStatus::Lead,
        }
    }
}

/// A commercial agreement, optionally tied to a client and a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Surrogate id.
    pub id: i32,
    /// Contract title (required).
    pub title: String,
    /// Counterparty client.
    pub client_id: Option<i32>,
    /// Delivering project.
    pub project_id: Option<i32>,
    /// Agreed value.
    pub contract_value: f64,
    /// Effective from.
    pub start_date: Option<NaiveDate>,
    /// Effective until.
    pub end_date: Option<NaiveDate>,
    /// Lifecycle state.
    pub status: ContractStatus,
    /// Free-text terms.
    pub terms: Option<String>,
}

/// Input for creating a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContract {
    /// Contract title (required).
    pub title: String,
    /// Counterparty client.
    pub client_id: Option<i32>,
    /// Delivering project.
    pub project_id: Option<i32>,
    /// Agreed value.
    pub contract_value: f64,
    /// Effective from.
    pub start_date: Option<NaiveDate>,
    /// Effective until.
    pub end_date: Option<NaiveDate>,
    /// Lifecycle state.
    pub status: ContractStatus,
    /// Free-text terms.
    pub terms: Option<String>,
}

impl NewContract {
    /// A zero-value draft with only the title filled in.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            client_id: None,
            project_id: None,
            contract_value: 0.0,
            start_date: None,
            end_date: None,
            status: ContractStatus::Draft,
            terms: None,
        }
    }
}
