//! Authenticated session state.
//!
//! A [`Session`] is the in-memory record of one signed-in principal. It is
//! never persisted; closing the workspace discards it. The session tracks
//! which screen the principal is currently on so that repeated selections of
//! the same screen do not flood the activity trail.

use super::menu::Screen;
use super::user::{DisplayName, Principal, Role};

/// One signed-in principal and the screen they are looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Identifier of the signed-in principal.
    pub principal_id: i32,
    /// Name shown in the workspace chrome.
    pub display_name: DisplayName,
    /// Role driving menu composition and screen access.
    pub role: Role,
    /// Screen the principal most recently landed on.
    pub current_screen: Screen,
}

impl Session {
    /// Opens a fresh session for `principal`, parked on the dashboard.
    #[must_use]
    pub fn open(principal: &Principal) -> Self {
        Self {
            principal_id: principal.id,
            display_name: principal.display_name.clone(),
            role: principal.role,
            current_screen: Screen::Dashboard,
        }
    }
}

/// Whether anyone is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nobody is signed in; only the login surface is reachable.
    #[default]
    LoggedOut,
    /// A principal is signed in and navigating screens.
    LoggedIn(Session),
}

impl SessionState {
    /// Returns the live session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::LoggedOut => None,
            Self::LoggedIn(session) => Some(session),
        }
    }

    /// True when a principal is signed in.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::user::EmailAddress;

    fn probe_principal() -> Principal {
        Principal {
            id: 7,
            display_name: DisplayName::new("Site Owner").unwrap(),
            email: EmailAddress::new("owner@example.test").unwrap(),
            role: Role::Owner,
            company_id: None,
            branch_id: None,
            active: true,
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn open_parks_on_dashboard() {
        let session = Session::open(&probe_principal());

        assert_eq!(session.principal_id, 7);
        assert_eq!(session.role, Role::Owner);
        assert_eq!(session.current_screen, Screen::Dashboard);
    }

    #[test]
    fn default_state_is_logged_out() {
        let state = SessionState::default();

        assert!(!state.is_logged_in());
        assert!(state.session().is_none());
    }

    #[test]
    fn logged_in_state_exposes_session() {
        let state = SessionState::LoggedIn(Session::open(&probe_principal()));

        assert!(state.is_logged_in());
        assert_eq!(
            state.session().map(|session| session.principal_id),
            Some(7)
        );
    }
}
