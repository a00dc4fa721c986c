//! Best-effort writer and query surface over the activity trail.
//!
//! Appends are fire and forget by policy: a module operation must never fail
//! because the trail could not be written, so failures are reported at warn
//! level and swallowed. Reads propagate errors normally.

use std::sync::Arc;

use mockable::Clock;
use tracing::warn;

use crate::domain::audit::{ActivityCount, AuditQuery, AuditRecord};
use crate::domain::error::ModuleError;
use crate::domain::ports::{AuditLog, NewAuditRecord};

/// Appends to and reads the append-only activity trail.
#[derive(Clone)]
pub struct AuditTrail {
    log: Arc<dyn AuditLog>,
    clock: Arc<dyn Clock>,
}

impl AuditTrail {
    /// Create a trail over the given log, stamping with the given clock.
    pub fn new(log: Arc<dyn AuditLog>, clock: Arc<dyn Clock>) -> Self {
        Self { log, clock }
    }

    /// Append one record stamped with the current local time.
    ///
    /// Best effort: a failed append is logged at warn level and swallowed.
    pub fn record(&self, user_id: Option<i32>, action: &str, details: Option<String>) {
        let record = NewAuditRecord {
            user_id,
            action: action.to_owned(),
            details,
            timestamp: self.clock.local().naive_local(),
        };
        if let Err(error) = self.log.append(&record) {
            warn!(%error, action, "activity trail append failed");
        }
    }

    /// Records matching `query`, newest first.
    pub fn query(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>, ModuleError> {
        Ok(self.log.query(query)?)
    }

    /// The newest `limit` records, unfiltered.
    pub fn recent(&self, limit: i64) -> Result<Vec<AuditRecord>, ModuleError> {
        self.query(&AuditQuery::newest(limit))
    }

    /// Record tallies per acting principal, busiest first.
    pub fn activity_counts(&self) -> Result<Vec<ActivityCount>, ModuleError> {
        Ok(self.log.activity_counts()?)
    }
}
