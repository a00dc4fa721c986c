//! Management console: account administration for the owner.
//!
//! Registration itself lives with the authentication service; this console
//! covers everything after an account exists.

use std::sync::Arc;

use crate::domain::error::ModuleError;
use crate::domain::menu::Screen;
use crate::domain::modules::authorize;
use crate::domain::ports::{PrincipalRepository, RoleCount};
use crate::domain::session::Session;
use crate::domain::user::{Principal, Role};

/// Service behind the management console screen.
#[derive(Clone)]
pub struct AdminService<R> {
    repo: Arc<R>,
}

impl<R> AdminService<R>
where
    R: PrincipalRepository,
{
    /// Create an admin service over the account store.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every registered account, newest first.
    pub fn accounts(&self, session: &Session) -> Result<Vec<Principal>, ModuleError> {
        authorize(session, Screen::AdminConsole)?;
        Ok(self.repo.list()?)
    }

    /// Reassign an account's role.
    pub fn set_role(
        &self,
        session: &Session,
        principal_id: i32,
        role: Role,
    ) -> Result<(), ModuleError> {
        authorize(session, Screen::AdminConsole)?;
        Ok(self.repo.set_role(principal_id, role)?)
    }

    /// Enable or disable an account. Disabled accounts cannot sign in but
    /// keep their trail records.
    pub fn set_active(
        &self,
        session: &Session,
        principal_id: i32,
        active: bool,
    ) -> Result<(), ModuleError> {
        authorize(session, Screen::AdminConsole)?;
        Ok(self.repo.set_active(principal_id, active)?)
    }

    /// Remove an account permanently. Trail records it produced survive
    /// with their `user_id` intact.
    pub fn remove(&self, session: &Session, principal_id: i32) -> Result<(), ModuleError> {
        authorize(session, Screen::AdminConsole)?;
        Ok(self.repo.delete(principal_id)?)
    }

    /// Account tallies per role, in canonical role order.
    pub fn role_summary(&self, session: &Session) -> Result<Vec<RoleCount>, ModuleError> {
        authorize(session, Screen::AdminConsole)?;
        Ok(self.repo.count_by_role()?)
    }

    /// Total number of accounts.
    pub fn total_accounts(&self, session: &Session) -> Result<i64, ModuleError> {
        authorize(session, Screen::AdminConsole)?;
        Ok(self.repo.count()?)
    }
}
