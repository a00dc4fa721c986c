//! System configuration screen: companies, branches, and settings.

use std::sync::Arc;

use crate::domain::error::ModuleError;
use crate::domain::menu::Screen;
use crate::domain::modules::{authorize, require_text};
use crate::domain::org::{Branch, Company, NewBranch, NewCompany};
use crate::domain::ports::{OrgRepository, SettingsRepository};
use crate::domain::session::Session;
use crate::domain::settings::{SettingEntry, SettingUpsert};

/// Service behind the system configuration screen.
#[derive(Clone)]
pub struct SystemConfigService<O, S> {
    orgs: Arc<O>,
    settings: Arc<S>,
}

impl<O, S> SystemConfigService<O, S>
where
    O: OrgRepository,
    S: SettingsRepository,
{
    /// Create a configuration service over the org registry and the
    /// settings store.
    pub fn new(orgs: Arc<O>, settings: Arc<S>) -> Self {
        Self { orgs, settings }
    }

    /// Register a company.
    pub fn add_company(
        &self,
        session: &Session,
        company: NewCompany,
    ) -> Result<Company, ModuleError> {
        authorize(session, Screen::SystemConfiguration)?;
        require_text("name", &company.name)?;
        Ok(self.orgs.insert_company(&company)?)
    }

    /// All companies, oldest first.
    pub fn companies(&self, session: &Session) -> Result<Vec<Company>, ModuleError> {
        authorize(session, Screen::SystemConfiguration)?;
        Ok(self.orgs.list_companies()?)
    }

    /// Register a branch under an existing company.
    pub fn add_branch(&self, session: &Session, branch: NewBranch) -> Result<Branch, ModuleError> {
        authorize(session, Screen::SystemConfiguration)?;
        require_text("name", &branch.name)?;
        Ok(self.orgs.insert_branch(&branch)?)
    }

    /// All branches, oldest first.
    pub fn branches(&self, session: &Session) -> Result<Vec<Branch>, ModuleError> {
        authorize(session, Screen::SystemConfiguration)?;
        Ok(self.orgs.list_branches()?)
    }

    /// Store a setting, overwriting any previous value under the same key.
    pub fn upsert_setting(
        &self,
        session: &Session,
        entry: SettingUpsert,
    ) -> Result<SettingEntry, ModuleError> {
        authorize(session, Screen::SystemConfiguration)?;
        require_text("key", &entry.key)?;
        Ok(self.settings.upsert(&entry)?)
    }

    /// All settings in key order.
    pub fn settings(&self, session: &Session) -> Result<Vec<SettingEntry>, ModuleError> {
        authorize(session, Screen::SystemConfiguration)?;
        Ok(self.settings.list()?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::error::ValidationError;
    use crate::domain::ports::{MemoryOrgRepository, MemorySettingsRepository};
    use crate::domain::user::Role;
    use crate::test_support::session_as;

    #[fixture]
    fn service() -> SystemConfigService<MemoryOrgRepository, MemorySettingsRepository> {
        SystemConfigService::new(
            Arc::new(MemoryOrgRepository::new()),
            Arc::new(MemorySettingsRepository::new()),
        )
    }

    #[rstest]
    fn new_companies_carry_the_ledger_currency(
        service: SystemConfigService<MemoryOrgRepository, MemorySettingsRepository>,
    ) {
        let session = session_as(Role::Owner);

        let company = service
            .add_company(&session, NewCompany::new("Groundwork Constructions"))
            .unwrap();

        assert_eq!(company.base_currency, "INR");
        assert_eq!(service.companies(&session).unwrap().len(), 1);
    }

    #[rstest]
    fn blank_company_names_are_rejected(
        service: SystemConfigService<MemoryOrgRepository, MemorySettingsRepository>,
    ) {
        let session = session_as(Role::Owner);
        let error = service
            .add_company(&session, NewCompany::new("   "))
            .unwrap_err();
        assert_eq!(error, ValidationError::required("name").into());
    }

    #[rstest]
    fn branches_need_a_registered_company(
        service: SystemConfigService<MemoryOrgRepository, MemorySettingsRepository>,
    ) {
        let session = session_as(Role::Owner);

        let error = service
            .add_branch(
                &session,
                NewBranch {
                    company_id: 99,
                    name: "Orphan Office".to_owned(),
                    location: None,
                },
            )
            .unwrap_err();
        assert_eq!(error, ModuleError::not_found("company", 99));

        let company = service
            .add_company(&session, NewCompany::new("Groundwork Constructions"))
            .unwrap();
        let branch = service
            .add_branch(
                &session,
                NewBranch {
                    company_id: company.id,
                    name: "Pune Site Office".to_owned(),
                    location: Some("Pune".to_owned()),
                },
            )
            .unwrap();
        assert_eq!(branch.company_id, Some(company.id));
    }

    #[rstest]
    fn settings_overwrite_by_key(
        service: SystemConfigService<MemoryOrgRepository, MemorySettingsRepository>,
    ) {
        let session = session_as(Role::Owner);
        let entry = |value: &str| SettingUpsert {
            category: Some("Branding".to_owned()),
            key: "company_name".to_owned(),
            value: Some(value.to_owned()),
            description: None,
        };

        service.upsert_setting(&session, entry("Groundwork")).unwrap();
        service
            .upsert_setting(&session, entry("Groundwork Constructions"))
            .unwrap();

        let settings = service.settings(&session).unwrap();
        assert_eq!(settings.len(), 1);
        assert_eq!(
            settings[0].value.as_deref(),
            Some("Groundwork Constructions")
        );
    }

    #[rstest]
    fn settings_require_a_key(
        service: SystemConfigService<MemoryOrgRepository, MemorySettingsRepository>,
    ) {
        let session = session_as(Role::Owner);
        let error = service
            .upsert_setting(
                &session,
                SettingUpsert {
                    category: None,
                    key: String::new(),
                    value: Some("orphan".to_owned()),
                    description: None,
                },
            )
            .unwrap_err();
        assert_eq!(error, ValidationError::required("key").into());
    }

    #[rstest]
    #[case::director(Role::Director)]
    #[case::accounting(Role::AccountingStaff)]
    fn configuration_is_owner_only(
        service: SystemConfigService<MemoryOrgRepository, MemorySettingsRepository>,
        #[case] role: Role,
    ) {
        let session = session_as(role);
        let error = service.companies(&session).unwrap_err();
        assert_eq!(error, ModuleError::access_denied("System Configuration"));
    }
}
