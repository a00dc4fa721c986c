//! CRM and contracts screen: client book and commercial agreements.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::crm::{
    Client, ClientStatus, Contract, ContractStatus, NewClient, NewContract,
};
use crate::domain::error::{ModuleError, ValidationError};
use crate::domain::menu::Screen;
use crate::domain::modules::{authorize, require_text};
use crate::domain::ports::CrmRepository;
use crate::domain::session::Session;

/// Service behind the CRM and contracts screen.
#[derive(Clone)]
pub struct CrmService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CrmService<R>
where
    R: CrmRepository,
{
    /// Create a CRM service over the given store.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Add a client, stamped with the current local time.
    pub fn add_client(&self, session: &Session, client: NewClient) -> Result<Client, ModuleError> {
        authorize(session, Screen::Crm)?;
        require_text("name", &client.name)?;
        Ok(self
            .repo
            .insert_client(&client, self.clock.local().naive_local())?)
    }

    /// The client book, newest first.
    pub fn clients(&self, session: &Session) -> Result<Vec<Client>, ModuleError> {
        authorize(session, Screen::Crm)?;
        Ok(self.repo.list_clients()?)
    }

    /// Move a client along the relationship lifecycle.
    pub fn set_client_status(
        &self,
        session: &Session,
        client_id: i32,
        status: ClientStatus,
    ) -> Result<(), ModuleError> {
        authorize(session, Screen::Crm)?;
        Ok(self.repo.set_client_status(client_id, status)?)
    }

    /// Create a contract.
    pub fn add_contract(
        &self,
        session: &Session,
        contract: NewContract,
    ) -> Result<Contract, ModuleError> {
        authorize(session, Screen::Crm)?;
        require_text("title", &contract.title)?;
        if contract.contract_value < 0.0 {
            return Err(
                ValidationError::out_of_range("contract_value", "must not be negative").into(),
            );
        }
        Ok(self.repo.insert_contract(&contract)?)
    }

    /// Contracts, newest first.
    pub fn contracts(&self, session: &Session) -> Result<Vec<Contract>, ModuleError> {
        authorize(session, Screen::Crm)?;
        Ok(self.repo.list_contracts()?)
    }

    /// Move a contract along its lifecycle.
    pub fn set_contract_status(
        &self,
        session: &Session,
        contract_id: i32,
        status: ContractStatus,
    ) -> Result<(), ModuleError> {
        authorize(session, Screen::Crm)?;
        Ok(self.repo.set_contract_status(contract_id, status)?)
    }

    /// Tie a contract to the project delivering it.
    pub fn link_to_project(
        &self,
        session: &Session,
        contract_id: i32,
        project_id: i32,
    ) -> Result<(), ModuleError> {
        authorize(session, Screen::Crm)?;
        Ok(self.repo.link_contract_to_project(contract_id, project_id)?)
    }
}
