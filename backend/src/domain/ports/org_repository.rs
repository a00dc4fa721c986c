//! Port for companies and their branches.

use std::sync::{Mutex, PoisonError};

use super::RepositoryError;
use crate::domain::org::{Branch, Company, NewBranch, NewCompany};

/// Port for the organisational registry behind the configuration screen.
#[cfg_attr(test, mockall::automock)]
pub trait OrgRepository: Send + Sync {
    /// Register a company and return it with its assigned id.
    fn insert_company(&self, company: &NewCompany) -> Result<Company, RepositoryError>;

    /// All companies, oldest first.
    fn list_companies(&self) -> Result<Vec<Company>, RepositoryError>;

    /// Register a branch under an existing company.
    fn insert_branch(&self, branch: &NewBranch) -> Result<Branch, RepositoryError>;

    /// All branches, oldest first.
    fn list_branches(&self) -> Result<Vec<Branch>, RepositoryError>;
}

#[derive(Debug, Default)]
struct OrgRows {
    companies: Vec<Company>,
    branches: Vec<Branch>,
}

/// In-memory registry for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemoryOrgRepository {
    rows: Mutex<OrgRows>,
}

impl MemoryOrgRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, body: impl FnOnce(&mut OrgRows) -> T) -> T {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        body(&mut rows)
    }
}

impl OrgRepository for MemoryOrgRepository {
    fn insert_company(&self, company: &NewCompany) -> Result<Company, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.companies.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            let company = Company {
                id,
                name: company.name.clone(),
                fiscal_year_start: company.fiscal_year_start,
                base_currency: company.base_currency.clone(),
                registration_number: company.registration_number.clone(),
                address: company.address.clone(),
            };
            rows.companies.push(company.clone());
            company
        }))
    }

    fn list_companies(&self) -> Result<Vec<Company>, RepositoryError> {
        Ok(self.with_rows(|rows| rows.companies.clone()))
    }

    fn insert_branch(&self, branch: &NewBranch) -> Result<Branch, RepositoryError> {
        self.with_rows(|rows| {
            if !rows.companies.iter().any(|c| c.id == branch.company_id) {
                return Err(RepositoryError::missing("company", branch.company_id));
            }
            let id = rows.branches.iter().map(|b| b.id).max().unwrap_or(0) + 1;
            let branch = Branch {
                id,
                company_id: Some(branch.company_id),
                name: branch.name.clone(),
                location: branch.location.clone(),
            };
            rows.branches.push(branch.clone());
            Ok(branch)
        })
    }

    fn list_branches(&self) -> Result<Vec<Branch>, RepositoryError> {
        Ok(self.with_rows(|rows| rows.branches.clone()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn branches_require_an_existing_company() {
        let repo = MemoryOrgRepository::new();
        let company = repo
            .insert_company(&NewCompany::new("Groundwork Constructions"))
            .unwrap();

        let branch = repo
            .insert_branch(&NewBranch {
                company_id: company.id,
                name: "Pune Site Office".to_owned(),
                location: Some("Pune".to_owned()),
            })
            .unwrap();
        assert_eq!(branch.company_id, Some(company.id));

        let err = repo
            .insert_branch(&NewBranch {
                company_id: 99,
                name: "Orphan".to_owned(),
                location: None,
            })
            .unwrap_err();
        assert_eq!(err, RepositoryError::missing("company", 99_i32));
    }

    #[rstest]
    fn companies_default_to_the_ledger_currency() {
        let repo = MemoryOrgRepository::new();
        repo.insert_company(&NewCompany::new("Groundwork Constructions"))
            .unwrap();

        let companies = repo.list_companies().unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].base_currency, "INR");
    }
}
