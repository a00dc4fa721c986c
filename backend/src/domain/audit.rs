//! Append-only activity trail records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One immutable activity record.
///
/// `user_id` is nullable so system actions and records of since-deleted
/// accounts survive; the trail never cascades on principal deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Surrogate id, ascending with insertion.
    pub id: i32,
    /// Acting principal, if any.
    pub user_id: Option<i32>,
    /// Short action label, e.g. "Navigation" or "Logout".
    pub action: String,
    /// Free-text detail.
    pub details: Option<String>,
    /// Stamped by the trail at append time.
    pub timestamp: NaiveDateTime,
}

/// Filterable read over the trail. Results are always newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditQuery {
    /// Restrict to one acting principal.
    pub user_id: Option<i32>,
    /// Restrict to action labels containing this text.
    pub action_contains: Option<String>,
    /// Maximum records returned.
    pub limit: i64,
}

impl AuditQuery {
    /// The newest `limit` records with no filters.
    #[must_use]
    pub const fn newest(limit: i64) -> Self {
        Self {
            user_id: None,
            action_contains: None,
            limit,
        }
    }

    /// Restrict to one acting principal.
    #[must_use]
    pub const fn by_user(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Restrict to action labels containing `text`.
    #[must_use]
    pub fn with_action_containing(mut self, text: impl Into<String>) -> Self {
        self.action_contains = Some(text.into());
        self
    }
}

impl Default for AuditQuery {
    /// The compliance screen's default view: newest 200, unfiltered.
    fn default() -> Self {
        Self::newest(200)
    }
}

/// Number of trail entries attributed to one principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCount {
    /// The counted principal; `None` groups system actions.
    pub user_id: Option<i32>,
    /// Entries attributed to them.
    pub actions: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_is_newest_two_hundred() {
        let query = AuditQuery::default();
        assert_eq!(query.limit, 200);
        assert!(query.user_id.is_none());
        assert!(query.action_contains.is_none());
    }

    #[test]
    fn builders_compose() {
        let query = AuditQuery::newest(100)
            .by_user(4)
            .with_action_containing("Navigation");
        assert_eq!(query.limit, 100);
        assert_eq!(query.user_id, Some(4));
        assert_eq!(query.action_contains.as_deref(), Some("Navigation"));
    }
}
