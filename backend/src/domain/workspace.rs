//! The signed-in shell: session lifecycle and screen navigation.
//!
//! One [`Workspace`] value is one interactive context. Login is the only way
//! in, logout the only way out, and every screen change flows through
//! [`Workspace::select`] so the activity trail sees it. The workspace is an
//! explicit value handed to callers, never a process-wide singleton.

use crate::domain::audit_trail::AuditTrail;
use crate::domain::auth::AuthService;
use crate::domain::error::{AuthError, ModuleError};
use crate::domain::menu::{Screen, menu_for};
use crate::domain::ports::PrincipalRepository;
use crate::domain::session::{Session, SessionState};

/// Action label stamped on screen-change records.
pub const NAVIGATION_ACTION: &str = "Navigation";
/// Action label stamped on sign-out records.
pub const LOGOUT_ACTION: &str = "Logout";

/// One principal's interactive context.
pub struct Workspace<R> {
    auth: AuthService<R>,
    audit: AuditTrail,
    state: SessionState,
}

impl<R> Workspace<R>
where
    R: PrincipalRepository,
{
    /// A workspace with nobody signed in.
    pub fn new(auth: AuthService<R>, audit: AuditTrail) -> Self {
        Self {
            auth,
            audit,
            state: SessionState::default(),
        }
    }

    /// The live session, if anyone is signed in.
    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    /// The ordered menu for the signed-in role; empty when logged out.
    pub fn menu(&self) -> Vec<Screen> {
        self.state
            .session()
            .map(|session| menu_for(session.role))
            .unwrap_or_default()
    }

    /// Sign in and park the session on the dashboard.
    ///
    /// Login itself appends no trail record; the first screen change after
    /// login is what lands in the trail.
    pub fn login(&mut self, email: &str, secret: &str) -> Result<Session, AuthError> {
        let principal = self.auth.login(email, secret)?;
        let session = Session::open(&principal);
        self.state = SessionState::LoggedIn(session.clone());
        Ok(session)
    }

    /// Move the session to `screen` and return the screen actually landed on.
    ///
    /// A screen outside the role's menu falls back to the dashboard instead
    /// of failing, so stale links degrade to the landing page. Re-selecting
    /// the current screen records nothing; any other landing appends one
    /// navigation record.
    pub fn select(&mut self, screen: Screen) -> Result<Screen, ModuleError> {
        let session = match &mut self.state {
            SessionState::LoggedOut => {
                return Err(ModuleError::access_denied(screen.label()));
            }
            SessionState::LoggedIn(session) => session,
        };

        let landed = if screen.permits(session.role) {
            screen
        } else {
            Screen::Dashboard
        };
        if landed == session.current_screen {
            return Ok(landed);
        }

        session.current_screen = landed;
        let principal_id = session.principal_id;
        self.audit.record(
            Some(principal_id),
            NAVIGATION_ACTION,
            Some(format!("Accessed module: {}", landed.label())),
        );
        Ok(landed)
    }

    /// Sign out, recording the departure. Safe to call when already out.
    pub fn logout(&mut self) {
        if let SessionState::LoggedIn(session) = &self.state {
            self.audit.record(
                Some(session.principal_id),
                LOGOUT_ACTION,
                Some("User logged out".to_owned()),
            );
        }
        self.state = SessionState::LoggedOut;
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
