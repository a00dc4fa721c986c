//! System compliance screen: trail inspection and the security overview.
//!
//! This screen only ever reads the trail; the shell is the sole writer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::audit::{AuditQuery, AuditRecord};
use crate::domain::audit_trail::AuditTrail;
use crate::domain::error::ModuleError;
use crate::domain::menu::Screen;
use crate::domain::modules::authorize;
use crate::domain::ports::PrincipalRepository;
use crate::domain::session::Session;
use crate::domain::user::Role;

/// Headline security posture shown beside the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityOverview {
    /// Records on the trail across all principals.
    pub trail_records: i64,
    /// Accounts that can currently sign in.
    pub active_users: i64,
    /// Accounts with the active flag off.
    pub disabled_users: i64,
    /// Accounts holding the Owner role.
    pub owner_accounts: i64,
}

/// Service behind the system compliance screen.
#[derive(Clone)]
pub struct ComplianceService<R> {
    trail: AuditTrail,
    principals: Arc<R>,
}

impl<R> ComplianceService<R>
where
    R: PrincipalRepository,
{
    /// Create a compliance service over the trail and the account store.
    pub fn new(trail: AuditTrail, principals: Arc<R>) -> Self {
        Self { trail, principals }
    }

    /// Trail records matching `query`, newest first.
    ///
    /// `AuditQuery::default()` is this screen's opening view: the newest
    /// two hundred records, unfiltered.
    pub fn activity(
        &self,
        session: &Session,
        query: &AuditQuery,
    ) -> Result<Vec<AuditRecord>, ModuleError> {
        authorize(session, Screen::Compliance)?;
        self.trail.query(query)
    }

    /// The current security posture.
    pub fn security_overview(&self, session: &Session) -> Result<SecurityOverview, ModuleError> {
        authorize(session, Screen::Compliance)?;

        let trail_records = self
            .trail
            .activity_counts()?
            .iter()
            .map(|count| count.actions)
            .sum();

        let accounts = self.principals.list()?;
        let active_users = accounts.iter().filter(|p| p.active).count() as i64;
        let disabled_users = accounts.len() as i64 - active_users;

        let owner_accounts = self
            .principals
            .count_by_role()?
            .into_iter()
            .find(|c| c.role == Role::Owner)
            .map_or(0, |c| c.count);

        Ok(SecurityOverview {
            trail_records,
            active_users,
            disabled_users,
            owner_accounts,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{
        MemoryAuditLog, MemoryPrincipalRepository, NewPrincipal,
    };
    use crate::domain::user::{DisplayName, EmailAddress};
    use crate::test_support::{fixture_clock, fixture_now, session_as};

    fn account(email: &str, role: Role, active: bool) -> NewPrincipal {
        NewPrincipal {
            display_name: DisplayName::new("Probe").expect("valid fixture name"),
            email: EmailAddress::new(email).expect("valid fixture email"),
            credential_hash: "hash".to_owned(),
            role,
            company_id: None,
            branch_id: None,
            active,
            created_at: fixture_now(),
        }
    }

    #[fixture]
    fn service() -> ComplianceService<MemoryPrincipalRepository> {
        let trail = AuditTrail::new(Arc::new(MemoryAuditLog::new()), fixture_clock());
        ComplianceService::new(trail, Arc::new(MemoryPrincipalRepository::new()))
    }

    #[rstest]
    fn activity_filters_compose(service: ComplianceService<MemoryPrincipalRepository>) {
        let session = session_as(Role::Owner);
        service.trail.record(Some(1), "Navigation", None);
        service.trail.record(Some(2), "Navigation", None);
        service.trail.record(Some(1), "Logout", None);

        let theirs = service
            .activity(&session, &AuditQuery::newest(50).by_user(1))
            .unwrap();
        assert_eq!(theirs.len(), 2);

        let logouts = service
            .activity(
                &session,
                &AuditQuery::newest(50).by_user(1).with_action_containing("Log"),
            )
            .unwrap();
        assert_eq!(logouts.len(), 1);
        assert_eq!(logouts[0].action, "Logout");
    }

    #[rstest]
    fn the_default_view_is_newest_two_hundred(
        service: ComplianceService<MemoryPrincipalRepository>,
    ) {
        let session = session_as(Role::Owner);
        service.trail.record(Some(1), "Navigation", None);
        service.trail.record(Some(1), "Logout", None);

        let records = service.activity(&session, &AuditQuery::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].action, "Logout");
    }

    #[rstest]
    fn the_overview_tallies_accounts_and_records(
        service: ComplianceService<MemoryPrincipalRepository>,
    ) {
        let session = session_as(Role::Owner);
        service
            .principals
            .insert(&account("owner@co.test", Role::Owner, true))
            .unwrap();
        service
            .principals
            .insert(&account("director@co.test", Role::Director, true))
            .unwrap();
        service
            .principals
            .insert(&account("former@co.test", Role::AccountingStaff, false))
            .unwrap();
        service.trail.record(Some(1), "Navigation", None);
        service.trail.record(Some(2), "Navigation", None);
        service.trail.record(Some(1), "Logout", None);

        let overview = service.security_overview(&session).unwrap();
        assert_eq!(
            overview,
            SecurityOverview {
                trail_records: 3,
                active_users: 2,
                disabled_users: 1,
                owner_accounts: 1,
            }
        );
    }

    #[rstest]
    fn only_owners_inspect_the_trail(service: ComplianceService<MemoryPrincipalRepository>) {
        let session = session_as(Role::AccountingStaff);
        let error = service
            .activity(&session, &AuditQuery::default())
            .unwrap_err();
        assert_eq!(error, ModuleError::access_denied("System Compliance"));
    }
}
