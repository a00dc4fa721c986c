//! Port for the append-only activity trail.

use std::sync::{Mutex, PoisonError};

use chrono::NaiveDateTime;

use super::RepositoryError;
use crate::domain::audit::{ActivityCount, AuditQuery, AuditRecord};

/// Input for appending one trail record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditRecord {
    /// Acting principal, when one is signed in.
    pub user_id: Option<i32>,
    /// Short action label, e.g. "Navigation".
    pub action: String,
    /// Free-text elaboration of the action.
    pub details: Option<String>,
    /// When the action happened, local time.
    pub timestamp: NaiveDateTime,
}

/// Port for appending to and reading the activity trail.
///
/// Records are never updated or deleted; the trail only grows.
#[cfg_attr(test, mockall::automock)]
pub trait AuditLog: Send + Sync {
    /// Append one record to the trail.
    fn append(&self, record: &NewAuditRecord) -> Result<(), RepositoryError>;

    /// Read records matching `query`, newest first.
    fn query(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>, RepositoryError>;

    /// Record tallies per acting principal, busiest first.
    fn activity_counts(&self) -> Result<Vec<ActivityCount>, RepositoryError>;
}

/// In-memory trail for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    rows: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record in append order, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<AuditRecord> {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AuditLog for MemoryAuditLog {
    fn append(&self, record: &NewAuditRecord) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        let id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        rows.push(AuditRecord {
            id,
            user_id: record.user_id,
            action: record.action.clone(),
            details: record.details.clone(),
            timestamp: record.timestamp,
        });
        Ok(())
    }

    fn query(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>, RepositoryError> {
        let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        let mut matches: Vec<_> = rows
            .iter()
            .filter(|row| query.user_id.is_none_or(|wanted| row.user_id == Some(wanted)))
            .filter(|row| {
                query
                    .action_contains
                    .as_deref()
                    .is_none_or(|needle| row.action.contains(needle))
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        matches.truncate(usize::try_from(query.limit).unwrap_or(usize::MAX));
        Ok(matches)
    }

    fn activity_counts(&self) -> Result<Vec<ActivityCount>, RepositoryError> {
        let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        let mut counts: Vec<ActivityCount> = Vec::new();
        for row in rows.iter() {
            match counts.iter_mut().find(|entry| entry.user_id == row.user_id) {
                Some(entry) => entry.actions += 1,
                None => counts.push(ActivityCount {
                    user_id: row.user_id,
                    actions: 1,
                }),
            }
        }
        counts.sort_by(|a, b| b.actions.cmp(&a.actions));
        Ok(counts)
    }
}
