//! Database-backed `PrincipalRepository` implementation using Diesel.
//!
//! Rows convert through the validated identity constructors, so a corrupted
//! username, email, or role label surfaces as a query error rather than an
//! invalid domain value.

use diesel::prelude::*;

use crate::domain::ports::{
    NewPrincipal, PrincipalRecord, PrincipalRepository, RepositoryError, RoleCount,
};
use crate::domain::user::{DisplayName, EmailAddress, Principal, Role};

use super::diesel_helpers::{last_insert_id, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the principal repository port.
#[derive(Clone)]
pub struct DieselPrincipalRepository {
    pool: DbPool,
}

impl DieselPrincipalRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a stored row into an account record.
fn row_to_record(row: UserRow) -> Result<PrincipalRecord, RepositoryError> {
    let UserRow {
        id,
        username,
        email,
        password_hash,
        role,
        company_id,
        branch_id,
        is_active,
        created_at,
    } = row;

    let display_name =
        DisplayName::new(username).map_err(|error| RepositoryError::query(error.to_string()))?;
    let email =
        EmailAddress::new(email).map_err(|error| RepositoryError::query(error.to_string()))?;
    let role = role
        .parse::<Role>()
        .map_err(|error| RepositoryError::query(error.to_string()))?;

    Ok(PrincipalRecord {
        principal: Principal {
            id,
            display_name,
            email,
            role,
            company_id,
            branch_id,
            active: is_active,
            created_at,
        },
        credential_hash: password_hash,
    })
}

impl PrincipalRepository for DieselPrincipalRepository {
    fn find_by_email(&self, email: &str) -> Result<Option<PrincipalRecord>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_record).transpose()
    }

    fn insert(&self, account: &NewPrincipal) -> Result<Principal, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        // The unique index is the enforcement; this lookup supplies the
        // domain-facing message.
        let duplicate = users::table
            .filter(users::email.eq(account.email.as_str()))
            .select(users::id)
            .first::<i32>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?;
        if duplicate.is_some() {
            return Err(RepositoryError::constraint(format!(
                "email {} already registered",
                account.email
            )));
        }
        let row = conn
            .transaction(|conn| {
                let new_row = NewUserRow {
                    username: account.display_name.as_str(),
                    email: account.email.as_str(),
                    password_hash: &account.credential_hash,
                    role: account.role.as_str(),
                    company_id: account.company_id,
                    branch_id: account.branch_id,
                    is_active: account.active,
                    created_at: account.created_at,
                };
                diesel::insert_into(users::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                users::table.find(id).select(UserRow::as_select()).first(conn)
            })
            .map_err(map_diesel_error)?;
        row_to_record(row).map(|record| record.principal)
    }

    fn update_credential_hash(
        &self,
        principal_id: i32,
        credential_hash: &str,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::update(users::table.find(principal_id))
            .set(users::password_hash.eq(credential_hash))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("user", principal_id));
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<Principal>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::id.desc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| row_to_record(row).map(|record| record.principal))
            .collect()
    }

    fn set_role(&self, principal_id: i32, role: Role) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::update(users::table.find(principal_id))
            .set(users::role.eq(role.as_str()))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("user", principal_id));
        }
        Ok(())
    }

    fn set_active(&self, principal_id: i32, active: bool) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::update(users::table.find(principal_id))
            .set(users::is_active.eq(active))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("user", principal_id));
        }
        Ok(())
    }

    fn delete(&self, principal_id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::delete(users::table.find(principal_id))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("user", principal_id));
        }
        Ok(())
    }

    fn count(&self) -> Result<i64, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        users::table
            .count()
            .get_result(&mut conn)
            .map_err(map_diesel_error)
    }

    fn count_by_role(&self) -> Result<Vec<RoleCount>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let labels: Vec<String> = users::table
            .select(users::role)
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        Ok(Role::ALL
            .iter()
            .map(|role| RoleCount {
                role: *role,
                count: labels.iter().filter(|label| *label == role.as_str()).count() as i64,
            })
            .collect())
    }
}
