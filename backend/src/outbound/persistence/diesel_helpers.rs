//! Shared helpers for the Diesel repository adapters.
//!
//! Every adapter funnels pool and Diesel failures through the same two
//! mapping functions so the error taxonomy stays uniform, decodes stored
//! status labels through [`parse_label`], and recovers freshly inserted
//! ids through [`last_insert_id`].

use std::str::FromStr;

use diesel::QueryResult;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use tracing::debug;

use super::pool::{AnyConnection, PoolError};
use crate::domain::labels::UnknownLabel;
use crate::domain::ports::RepositoryError;

/// Map pool errors into the repository error taxonomy.
pub fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors into the repository error taxonomy.
///
/// Constraint violations keep the driver message so callers can see which
/// constraint fired. Adapters that promise a friendlier duplicate-key
/// message pre-check inside their write transaction; this mapping is the
/// backstop for races that slip past the check.
pub fn map_diesel_error(error: diesel::result::Error) -> RepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::CheckViolation
            | DatabaseErrorKind::NotNullViolation => {
                RepositoryError::constraint(info.message().to_string())
            }
            DatabaseErrorKind::ClosedConnection => {
                RepositoryError::connection("database connection error")
            }
            _ => RepositoryError::query("database error"),
        },
        _ => RepositoryError::query("database error"),
    }
}

/// Decode a stored label column into its enum.
pub fn parse_label<T>(value: &str) -> Result<T, RepositoryError>
where
    T: FromStr<Err = UnknownLabel>,
{
    value
        .parse()
        .map_err(|error: UnknownLabel| RepositoryError::query(error.to_string()))
}

/// Decode an optional stored label column, passing `None` through.
pub fn parse_optional_label<T>(value: Option<&str>) -> Result<Option<T>, RepositoryError>
where
    T: FromStr<Err = UnknownLabel>,
{
    value.map(parse_label).transpose()
}

/// Fetch the id the connection assigned to the most recent insert.
///
/// The multi-backend connection cannot express `RETURNING`, so writes run
/// as insert, id recovery, and re-read inside one transaction. Each
/// backend exposes the assigned id through its own function.
pub fn last_insert_id(conn: &mut AnyConnection) -> QueryResult<i32> {
    let id: i64 = match conn {
        AnyConnection::Postgresql(conn) => {
            diesel::select(sql::<BigInt>("lastval()")).get_result(conn)?
        }
        AnyConnection::Sqlite(conn) => {
            diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?
        }
    };
    i32::try_from(id).map_err(|error| diesel::result::Error::DeserializationError(Box::new(error)))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    use super::*;
    use crate::domain::project::ProjectStatus;

    #[rstest]
    fn pool_errors_map_to_connection() {
        let error = map_pool_error(PoolError::checkout("timed out waiting for connection"));

        assert_eq!(
            error,
            RepositoryError::connection("timed out waiting for connection")
        );
    }

    #[rstest]
    fn not_found_maps_to_query() {
        let error = map_diesel_error(DieselError::NotFound);

        assert_eq!(error, RepositoryError::query("record not found"));
    }

    #[rstest]
    fn unique_violations_keep_the_driver_message() {
        let error = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("UNIQUE constraint failed: users.email".to_string()),
        ));

        assert_eq!(
            error,
            RepositoryError::constraint("UNIQUE constraint failed: users.email")
        );
    }

    #[rstest]
    fn closed_connections_map_to_connection() {
        let error = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("connection reset".to_string()),
        ));

        assert_eq!(
            error,
            RepositoryError::connection("database connection error")
        );
    }

    #[rstest]
    fn labels_decode_or_explain() {
        let status: ProjectStatus = parse_label("Active").expect("known label");
        assert_eq!(status, ProjectStatus::Active);

        let error = parse_label::<ProjectStatus>("Abandoned").expect_err("unknown label");
        assert_eq!(
            error,
            RepositoryError::query("unknown project status: Abandoned")
        );
    }

    #[rstest]
    fn optional_labels_pass_none_through() {
        let none: Option<ProjectStatus> = parse_optional_label(None).expect("none decodes");

        assert_eq!(none, None);
    }
}
