//! Database-backed `AuditLog` implementation using Diesel.
//!
//! The trail is append-only; this adapter issues inserts and reads, never
//! updates or deletes.

use diesel::prelude::*;

use crate::domain::audit::{ActivityCount, AuditQuery, AuditRecord};
use crate::domain::ports::{AuditLog, NewAuditRecord, RepositoryError};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{AuditRecordRow, NewAuditRecordRow};
use super::pool::DbPool;
use super::schema::audit_records;

/// Diesel-backed implementation of the activity trail port.
#[derive(Clone)]
pub struct DieselAuditLog {
    pool: DbPool,
}

impl DieselAuditLog {
    /// Create a new trail with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: AuditRecordRow) -> AuditRecord {
    AuditRecord {
        id: row.id,
        user_id: row.user_id,
        action: row.action,
        details: row.details,
        timestamp: row.timestamp,
    }
}

/// Substring match pattern for the action filter.
fn like_pattern(needle: &str) -> String {
    format!("%{needle}%")
}

impl AuditLog for DieselAuditLog {
    fn append(&self, record: &NewAuditRecord) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let new_row = NewAuditRecordRow {
            user_id: record.user_id,
            action: &record.action,
            details: record.details.as_deref(),
            timestamp: record.timestamp,
        };
        diesel::insert_into(audit_records::table)
            .values(&new_row)
            .execute(&mut conn)
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    fn query(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let mut statement = audit_records::table.into_boxed();
        if let Some(user_id) = query.user_id {
            statement = statement.filter(audit_records::user_id.eq(user_id));
        }
        if let Some(needle) = query.action_contains.as_deref() {
            statement = statement.filter(audit_records::action.like(like_pattern(needle)));
        }
        let rows: Vec<AuditRecordRow> = statement
            .order((audit_records::timestamp.desc(), audit_records::id.desc()))
            .limit(query.limit)
            .select(AuditRecordRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_record).collect())
    }

    fn activity_counts(&self) -> Result<Vec<ActivityCount>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let actors: Vec<Option<i32>> = audit_records::table
            .order(audit_records::id.asc())
            .select(audit_records::user_id)
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        let mut counts: Vec<ActivityCount> = Vec::new();
        for user_id in actors {
            match counts.iter_mut().find(|entry| entry.user_id == user_id) {
                Some(entry) => entry.actions += 1,
                None => counts.push(ActivityCount { user_id, actions: 1 }),
            }
        }
        counts.sort_by(|a, b| b.actions.cmp(&a.actions));
        Ok(counts)
    }
}
