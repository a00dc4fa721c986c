//! Database-backed `CrmRepository` implementation using Diesel.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::crm::{Client, ClientStatus, Contract, ContractStatus, NewClient, NewContract};
use crate::domain::ports::{CrmRepository, RepositoryError};

use super::diesel_helpers::{last_insert_id, map_diesel_error, map_pool_error, parse_label};
use super::models::{ClientRow, ContractRow, NewClientRow, NewContractRow};
use super::pool::DbPool;
use super::schema::{clients, contracts};

/// Diesel-backed implementation of the customer-relationship port.
#[derive(Clone)]
pub struct DieselCrmRepository {
    pool: DbPool,
}

impl DieselCrmRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_client(row: ClientRow) -> Result<Client, RepositoryError> {
    Ok(Client {
        id: row.id,
        name: row.name,
        company: row.company,
        email: row.email,
        phone: row.phone,
        address: row.address,
        status: parse_label(&row.status)?,
        created_at: row.created_at,
    })
}

fn row_to_contract(row: ContractRow) -> Result<Contract, RepositoryError> {
    Ok(Contract {
        id: row.id,
        title: row.title,
        client_id: row.client_id,
        project_id: row.project_id,
        contract_value: row.contract_value,
        start_date: row.start_date,
        end_date: row.end_date,
        status: parse_label(&row.status)?,
        terms: row.terms,
    })
}

impl CrmRepository for DieselCrmRepository {
    fn insert_client(
        &self,
        client: &NewClient,
        created_at: NaiveDateTime,
    ) -> Result<Client, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewClientRow {
                    name: &client.name,
                    company: client.company.as_deref(),
                    email: client.email.as_deref(),
                    phone: client.phone.as_deref(),
                    address: client.address.as_deref(),
                    status: client.status.as_str(),
                    created_at,
                };
                diesel::insert_into(clients::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                clients::table
                    .find(id)
                    .select(ClientRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        row_to_client(row)
    }

    fn list_clients(&self) -> Result<Vec<Client>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<ClientRow> = clients::table
            .order(clients::id.desc())
            .select(ClientRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_client).collect()
    }

    fn set_client_status(
        &self,
        client_id: i32,
        status: ClientStatus,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::update(clients::table.find(client_id))
            .set(clients::status.eq(status.as_str()))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("client", client_id));
        }
        Ok(())
    }

    fn insert_contract(&self, contract: &NewContract) -> Result<Contract, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewContractRow {
                    title: &contract.title,
                    client_id: contract.client_id,
                    project_id: contract.project_id,
                    contract_value: contract.contract_value,
                    start_date: contract.start_date,
                    end_date: contract.end_date,
                    status: contract.status.as_str(),
                    terms: contract.terms.as_deref(),
                };
                diesel::insert_into(contracts::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                contracts::table
                    .find(id)
                    .select(ContractRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        row_to_contract(row)
    }

    fn list_contracts(&self) -> Result<Vec<Contract>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<ContractRow> = contracts::table
            .order(contracts::id.desc())
            .select(ContractRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_contract).collect()
    }

    fn set_contract_status(
        &self,
        contract_id: i32,
        status: ContractStatus,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::update(contracts::table.find(contract_id))
            .set(contracts::status.eq(status.as_str()))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("contract", contract_id));
        }
        Ok(())
    }

    fn link_contract_to_project(
        &self,
        contract_id: i32,
        project_id: i32,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::update(contracts::table.find(contract_id))
            .set(contracts::project_id.eq(Some(project_id)))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("contract", contract_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion.

    use chrono::NaiveDateTime;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn client_rows_decode_their_status() {
        let row = ClientRow {
            id: 4,
            name: "Meridian Housing".into(),
            company: None,
            email: Some("office@meridian.test".into()),
            phone: None,
            address: None,
            status: "Active".into(),
            created_at: NaiveDateTime::default(),
        };

        let client = row_to_client(row).unwrap();
        assert_eq!(client.status, ClientStatus::Active);
    }

    #[rstest]
    fn unknown_contract_status_is_reported() {
        let row = ContractRow {
            id: 9,
            title: "Tower B shell works".into(),
            client_id: Some(4),
            project_id: None,
            contract_value: 2_000_000.0,
            start_date: None,
            end_date: None,
            status: "Shredded".into(),
            terms: None,
        };

        let error = row_to_contract(row).unwrap_err();
        assert_eq!(
            error,
            RepositoryError::query("unknown contract status: Shredded")
        );
    }
}
