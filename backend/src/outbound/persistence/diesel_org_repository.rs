//! Database-backed `OrgRepository` implementation using Diesel.

use diesel::prelude::*;

use crate::domain::org::{Branch, Company, NewBranch, NewCompany};
use crate::domain::ports::{OrgRepository, RepositoryError};

use super::diesel_helpers::{last_insert_id, map_diesel_error, map_pool_error};
use super::models::{BranchRow, CompanyRow, NewBranchRow, NewCompanyRow};
use super::pool::DbPool;
use super::schema::{branches, companies};

/// Diesel-backed implementation of the organisational registry port.
#[derive(Clone)]
pub struct DieselOrgRepository {
    pool: DbPool,
}

impl DieselOrgRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_company(row: CompanyRow) -> Company {
    Company {
        id: row.id,
        name: row.name,
        fiscal_year_start: row.fiscal_year_start,
        base_currency: row.base_currency,
        registration_number: row.registration_number,
        address: row.address,
    }
}

fn row_to_branch(row: BranchRow) -> Branch {
    Branch {
        id: row.id,
        company_id: row.company_id,
        name: row.name,
        location: row.location,
    }
}

impl OrgRepository for DieselOrgRepository {
    fn insert_company(&self, company: &NewCompany) -> Result<Company, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewCompanyRow {
                    name: &company.name,
                    fiscal_year_start: company.fiscal_year_start,
                    base_currency: &company.base_currency,
                    registration_number: company.registration_number.as_deref(),
                    address: company.address.as_deref(),
                };
                diesel::insert_into(companies::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                companies::table
                    .find(id)
                    .select(CompanyRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        Ok(row_to_company(row))
    }

    fn list_companies(&self) -> Result<Vec<Company>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<CompanyRow> = companies::table
            .order(companies::id.asc())
            .select(CompanyRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_company).collect())
    }

    fn insert_branch(&self, branch: &NewBranch) -> Result<Branch, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let company = companies::table
            .find(branch.company_id)
            .select(companies::id)
            .first::<i32>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?;
        if company.is_none() {
            return Err(RepositoryError::missing("company", branch.company_id));
        }
        let row = conn
            .transaction(|conn| {
                let new_row = NewBranchRow {
                    company_id: Some(branch.company_id),
                    name: &branch.name,
                    location: branch.location.as_deref(),
                };
                diesel::insert_into(branches::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                branches::table
                    .find(id)
                    .select(BranchRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        Ok(row_to_branch(row))
    }

    fn list_branches(&self) -> Result<Vec<Branch>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<BranchRow> = branches::table
            .order(branches::id.asc())
            .select(BranchRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_branch).collect())
    }
}
