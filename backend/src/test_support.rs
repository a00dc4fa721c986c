//! Shared fixtures for the crate's unit tests.
//!
//! Compiled only under `cfg(test)`. Services that stamp timestamps take an
//! `Arc<dyn Clock>`, so every suite pins the same instant through
//! [`fixture_clock`] and asserts against [`fixture_now`] or [`fixture_today`].

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;

use crate::domain::menu::Screen;
use crate::domain::session::Session;
use crate::domain::user::{DisplayName, Role};

/// Instant every fixture clock reports.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// The fixture instant as services stamp it into records.
pub fn fixture_now() -> NaiveDateTime {
    fixture_timestamp().with_timezone(&Local).naive_local()
}

/// The fixture instant's calendar day.
pub fn fixture_today() -> NaiveDate {
    fixture_now().date()
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// A clock frozen at [`fixture_timestamp`].
pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

/// A live session for `role`, parked on the dashboard.
pub fn session_as(role: Role) -> Session {
    Session {
        principal_id: 7,
        display_name: DisplayName::new("Test Operator").expect("valid fixture name"),
        role,
        current_screen: Screen::Dashboard,
    }
}
