//! Port for clients and contracts.

use std::sync::{Mutex, PoisonError};

use chrono::NaiveDateTime;

use super::RepositoryError;
use crate::domain::crm::{Client, ClientStatus, Contract, ContractStatus, NewClient, NewContract};

/// Port for the customer-relationship store.
#[cfg_attr(test, mockall::automock)]
pub trait CrmRepository: Send + Sync {
    /// Create a client and return it with its assigned id.
    fn insert_client(
        &self,
        client: &NewClient,
        created_at: NaiveDateTime,
    ) -> Result<Client, RepositoryError>;

    /// All clients, newest first.
    fn list_clients(&self) -> Result<Vec<Client>, RepositoryError>;

    /// Move a client to a new relationship state.
    fn set_client_status(
        &self,
        client_id: i32,
        status: ClientStatus,
    ) -> Result<(), RepositoryError>;

    /// Create a contract and return it with its assigned id.
    fn insert_contract(&self, contract: &NewContract) -> Result<Contract, RepositoryError>;

    /// All contracts, newest first.
    fn list_contracts(&self) -> Result<Vec<Contract>, RepositoryError>;

    /// Move a contract to a new lifecycle state.
    fn set_contract_status(
        &self,
        contract_id: i32,
        status: ContractStatus,
    ) -> Result<(), RepositoryError>;

    /// Point a contract at the project delivering it.
    fn link_contract_to_project(
        &self,
        contract_id: i32,
        project_id: i32,
    ) -> Result<(), RepositoryError>;
}

#[derive(Debug, Default)]
struct CrmRows {
    clients: Vec<Client>,
    contracts: Vec<Contract>,
}

/// In-memory store for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemoryCrmRepository {
    rows: Mutex<CrmRows>,
}

impl MemoryCrmRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, body: impl FnOnce(&mut CrmRows) -> T) -> T {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        body(&mut rows)
    }
}

impl CrmRepository for MemoryCrmRepository {
    fn insert_client(
        &self,
        client: &NewClient,
        created_at: NaiveDateTime,
    ) -> Result<Client, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.clients.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            let client = Client {
                id,
                name: client.name.clone(),
                company: client.company.clone(),
                email: client.email.clone(),
                phone: client.phone.clone(),
                address: client.address.clone(),
                status: client.status,
                created_at,
            };
            rows.clients.push(client.clone());
            client
        }))
    }

    fn list_clients(&self) -> Result<Vec<Client>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut clients = rows.clients.clone();
            clients.sort_by_key(|c| std::cmp::Reverse(c.id));
            clients
        }))
    }

    fn set_client_status(
        &self,
        client_id: i32,
        status: ClientStatus,
    ) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let client = rows
                .clients
                .iter_mut()
                .find(|c| c.id == client_id)
                .ok_or_else(|| RepositoryError::missing("client", client_id))?;
            client.status = status;
            Ok(())
        })
    }

    fn insert_contract(&self, contract: &NewContract) -> Result<Contract, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.contracts.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            let contract = Contract {
                id,
                title: contract.title.clone(),
                client_id: contract.client_id,
                project_id: contract.project_id,
                contract_value: contract.contract_value,
                start_date: contract.start_date,
                end_date: contract.end_date,
                status: contract.status,
                terms: contract.terms.clone(),
            };
            rows.contracts.push(contract.clone());
            contract
        }))
    }

    fn list_contracts(&self) -> Result<Vec<Contract>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut contracts = rows.contracts.clone();
            contracts.sort_by_key(|c| std::cmp::Reverse(c.id));
            contracts
        }))
    }

    fn set_contract_status(
        &self,
        contract_id: i32,
        status: ContractStatus,
    ) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let contract = rows
                .contracts
                .iter_mut()
                .find(|c| c.id == contract_id)
                .ok_or_else(|| RepositoryError::missing("contract", contract_id))?;
            contract.status = status;
            Ok(())
        })
    }

    fn link_contract_to_project(
        &self,
        contract_id: i32,
        project_id: i32,
    ) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let contract = rows
                .contracts
                .iter_mut()
                .find(|c| c.id == contract_id)
                .ok_or_else(|| RepositoryError::missing("contract", contract_id))?;
            contract.project_id = Some(project_id);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    fn stamp() -> NaiveDateTime {
        NaiveDateTime::default()
    }

    #[rstest]
    fn new_clients_start_as_leads() {
        let repo = MemoryCrmRepository::new();
        let client = repo
            .insert_client(&NewClient::new("Meridian Housing"), stamp())
            .unwrap();
        assert_eq!(client.status, ClientStatus::Lead);

        repo.set_client_status(client.id, ClientStatus::Active)
            .unwrap();
        assert_eq!(repo.list_clients().unwrap()[0].status, ClientStatus::Active);
    }

    #[rstest]
    fn linking_a_contract_sets_its_project() {
        let repo = MemoryCrmRepository::new();
        let contract = repo
            .insert_contract(&NewContract::new("Tower B shell works"))
            .unwrap();
        assert_eq!(contract.project_id, None);

        repo.link_contract_to_project(contract.id, 7).unwrap();
        assert_eq!(repo.list_contracts().unwrap()[0].project_id, Some(7));
    }

    #[rstest]
    fn status_changes_on_missing_rows_report_missing() {
        let repo = MemoryCrmRepository::new();

        let err = repo
            .set_contract_status(5, ContractStatus::Signed)
            .unwrap_err();
        assert_eq!(err, RepositoryError::missing("contract", 5_i32));
    }
}
