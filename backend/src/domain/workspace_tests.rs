//! Tests for the workspace shell.

use std::sync::Arc;

use rstest::rstest;
use zeroize::Zeroizing;

use super::*;
use crate::domain::auth::RegisterRequest;
use crate::domain::ports::{MemoryAuditLog, MemoryPrincipalRepository};
use crate::domain::user::{DisplayName, EmailAddress, Role};
use crate::test_support::fixture_clock;

fn workspace_for(role: Role) -> (Workspace<MemoryPrincipalRepository>, Arc<MemoryAuditLog>) {
    let repo = Arc::new(MemoryPrincipalRepository::new());
    let log = Arc::new(MemoryAuditLog::new());
    let auth = AuthService::new(repo, fixture_clock());
    auth.register(RegisterRequest {
        display_name: DisplayName::new("Probe").unwrap(),
        email: EmailAddress::new("probe@co.test").unwrap(),
        secret: Zeroizing::new("secretpw".to_owned()),
        role,
        company_id: None,
        branch_id: None,
    })
    .unwrap();

    let audit = AuditTrail::new(log.clone(), fixture_clock());
    (Workspace::new(auth, audit), log)
}

fn signed_in(role: Role) -> (Workspace<MemoryPrincipalRepository>, Arc<MemoryAuditLog>) {
    let (mut workspace, log) = workspace_for(role);
    workspace.login("probe@co.test", "secretpw").unwrap();
    (workspace, log)
}

#[rstest]
fn login_parks_on_the_dashboard_without_logging() {
    let (mut workspace, log) = workspace_for(Role::Owner);

    let session = workspace.login("probe@co.test", "secretpw").unwrap();

    assert_eq!(session.current_screen, Screen::Dashboard);
    assert_eq!(workspace.session().map(|s| s.principal_id), Some(session.principal_id));
    assert!(log.snapshot().is_empty());
}

#[rstest]
fn navigation_records_the_screen_label() {
    let (mut workspace, log) = signed_in(Role::Owner);

    let landed = workspace.select(Screen::Finance).unwrap();

    assert_eq!(landed, Screen::Finance);
    let rows = log.snapshot();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].action, NAVIGATION_ACTION);
    assert_eq!(
        rows[0].details.as_deref(),
        Some("Accessed module: Finance & Accounts")
    );
    assert_eq!(
        rows[0].user_id,
        workspace.session().map(|s| s.principal_id)
    );
}

#[rstest]
fn reselecting_the_current_screen_logs_once() {
    let (mut workspace, log) = signed_in(Role::Owner);

    workspace.select(Screen::Finance).unwrap();
    workspace.select(Screen::Finance).unwrap();

    assert_eq!(log.snapshot().len(), 1);
}

#[rstest]
fn stale_links_fall_back_to_the_dashboard() {
    let (mut workspace, log) = signed_in(Role::Director);
    workspace.select(Screen::Projects).unwrap();

    let landed = workspace.select(Screen::AdminConsole).unwrap();

    assert_eq!(landed, Screen::Dashboard);
    assert_eq!(
        workspace.session().map(|s| s.current_screen),
        Some(Screen::Dashboard)
    );
    let rows = log.snapshot();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].details.as_deref(), Some("Accessed module: Dashboard"));
}

#[rstest]
fn stale_link_while_parked_on_the_dashboard_logs_nothing() {
    let (mut workspace, log) = signed_in(Role::AccountingStaff);

    let landed = workspace.select(Screen::Compliance).unwrap();

    assert_eq!(landed, Screen::Dashboard);
    assert!(log.snapshot().is_empty());
}

#[rstest]
fn logout_records_once_and_is_idempotent() {
    let (mut workspace, log) = signed_in(Role::Owner);

    workspace.logout();
    workspace.logout();

    assert!(workspace.session().is_none());
    let rows = log.snapshot();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].action, LOGOUT_ACTION);
    assert_eq!(rows[0].details.as_deref(), Some("User logged out"));
}

#[rstest]
fn selecting_while_logged_out_is_denied() {
    let (mut workspace, log) = workspace_for(Role::Owner);

    let err = workspace.select(Screen::Dashboard).unwrap_err();

    assert_eq!(err, ModuleError::access_denied("Dashboard"));
    assert!(log.snapshot().is_empty());
}

#[rstest]
fn menu_follows_the_session() {
    let (mut workspace, _log) = workspace_for(Role::AccountingStaff);
    assert!(workspace.menu().is_empty());

    workspace.login("probe@co.test", "secretpw").unwrap();
    assert_eq!(workspace.menu().len(), 5);

    workspace.logout();
    assert!(workspace.menu().is_empty());
}

#[rstest]
fn one_visit_leaves_a_complete_trail() {
    let (mut workspace, log) = workspace_for(Role::Owner);

    workspace.login("probe@co.test", "secretpw").unwrap();
    workspace.select(Screen::Finance).unwrap();
    workspace.logout();

    let rows = log.snapshot();
    let actions: Vec<(&str, Option<&str>)> = rows
        .iter()
        .map(|row| (row.action.as_str(), row.details.as_deref()))
        .collect();
    assert_eq!(
        actions,
        [
            (NAVIGATION_ACTION, Some("Accessed module: Finance & Accounts")),
            (LOGOUT_ACTION, Some("User logged out")),
        ]
    );
}
