//! Port for account storage and credential lookups.

use std::sync::{Mutex, PoisonError};

use chrono::NaiveDateTime;

use super::RepositoryError;
use crate::domain::user::{DisplayName, EmailAddress, Principal, Role};

/// A stored account paired with its credential hash.
///
/// The hash never leaves the authentication service; [`Principal`] alone is
/// what circulates through the rest of the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalRecord {
    /// The account as the domain sees it.
    pub principal: Principal,
    /// Salted bcrypt hash of the account secret.
    pub credential_hash: String,
}

/// Input for inserting a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrincipal {
    pub display_name: DisplayName,
    pub email: EmailAddress,
    pub credential_hash: String,
    pub role: Role,
    pub company_id: Option<i32>,
    pub branch_id: Option<i32>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

/// How many accounts hold a given role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCount {
    pub role: Role,
    pub count: i64,
}

/// Port for reading and mutating stored accounts.
#[cfg_attr(test, mockall::automock)]
pub trait PrincipalRepository: Send + Sync {
    /// Look up an account by its unique email.
    fn find_by_email(&self, email: &str) -> Result<Option<PrincipalRecord>, RepositoryError>;

    /// Insert a new account and return it with its assigned id.
    fn insert(&self, account: &NewPrincipal) -> Result<Principal, RepositoryError>;

    /// Replace the stored credential hash for an account.
    fn update_credential_hash(
        &self,
        principal_id: i32,
        credential_hash: &str,
    ) -> Result<(), RepositoryError>;

    /// All accounts, newest first.
    fn list(&self) -> Result<Vec<Principal>, RepositoryError>;

    /// Reassign an account's role.
    fn set_role(&self, principal_id: i32, role: Role) -> Result<(), RepositoryError>;

    /// Enable or disable an account.
    fn set_active(&self, principal_id: i32, active: bool) -> Result<(), RepositoryError>;

    /// Remove an account permanently.
    fn delete(&self, principal_id: i32) -> Result<(), RepositoryError>;

    /// Total number of accounts.
    fn count(&self) -> Result<i64, RepositoryError>;

    /// Account tallies per role, in canonical role order.
    fn count_by_role(&self) -> Result<Vec<RoleCount>, RepositoryError>;
}

/// In-memory store for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemoryPrincipalRepository {
    rows: Mutex<Vec<PrincipalRecord>>,
}

impl MemoryPrincipalRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, body: impl FnOnce(&mut Vec<PrincipalRecord>) -> T) -> T {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        body(&mut rows)
    }
}

impl PrincipalRepository for MemoryPrincipalRepository {
    fn find_by_email(&self, email: &str) -> Result<Option<PrincipalRecord>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            rows.iter()
                .find(|record| record.principal.email.as_str() == email)
                .cloned()
        }))
    }

    fn insert(&self, account: &NewPrincipal) -> Result<Principal, RepositoryError> {
        self.with_rows(|rows| {
            if rows
                .iter()
                .any(|record| record.principal.email == account.email)
            {
                return Err(RepositoryError::constraint(format!(
                    "email {} already registered",
                    account.email
                )));
            }
            let id = rows
                .iter()
                .map(|record| record.principal.id)
                .max()
                .unwrap_or(0)
                + 1;
            let principal = Principal {
                id,
                display_name: account.display_name.clone(),
                email: account.email.clone(),
                role: account.role,
                company_id: account.company_id,
                branch_id: account.branch_id,
                active: account.active,
                created_at: account.created_at,
            };
            rows.push(PrincipalRecord {
                principal: principal.clone(),
                credential_hash: account.credential_hash.clone(),
            });
            Ok(principal)
        })
    }

    fn update_credential_hash(
        &self,
        principal_id: i32,
        credential_hash: &str,
    ) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let record = rows
                .iter_mut()
                .find(|record| record.principal.id == principal_id)
                .ok_or_else(|| RepositoryError::missing("user", principal_id))?;
            record.credential_hash = credential_hash.to_owned();
            Ok(())
        })
    }

    fn list(&self) -> Result<Vec<Principal>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut principals: Vec<_> = rows.iter().map(|record| record.principal.clone()).collect();
            principals.sort_by_key(|principal| std::cmp::Reverse(principal.id));
            principals
        }))
    }

    fn set_role(&self, principal_id: i32, role: Role) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let record = rows
                .iter_mut()
                .find(|record| record.principal.id == principal_id)
                .ok_or_else(|| RepositoryError::missing("user", principal_id))?;
            record.principal.role = role;
            Ok(())
        })
    }

    fn set_active(&self, principal_id: i32, active: bool) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let record = rows
                .iter_mut()
                .find(|record| record.principal.id == principal_id)
                .ok_or_else(|| RepositoryError::missing("user", principal_id))?;
            record.principal.active = active;
            Ok(())
        })
    }

    fn delete(&self, principal_id: i32) -> Result<(), RepositoryError> {
        self.with_rows(|rows| {
            let before = rows.len();
            rows.retain(|record| record.principal.id != principal_id);
            if rows.len() == before {
                return Err(RepositoryError::missing("user", principal_id));
            }
            Ok(())
        })
    }

    fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.with_rows(|rows| rows.len() as i64))
    }

    fn count_by_role(&self) -> Result<Vec<RoleCount>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            Role::ALL
                .iter()
                .map(|role| RoleCount {
                    role: *role,
                    count: rows
                        .iter()
                        .filter(|record| record.principal.role == *role)
                        .count() as i64,
                })
                .collect()
        }))
    }
}
