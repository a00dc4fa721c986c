//! Error surface shared by every repository port.
//!
//! Adapters speak [`RepositoryError`]; services translate it into the
//! caller-facing taxonomy via the `From` impls below so handler code can
//! lean on `?`.

use super::define_port_error;
use crate::domain::error::{AuthError, ModuleError, StorageError};

define_port_error! {
    /// Failures raised by repository adapters.
    pub enum RepositoryError {
        /// No connection could be checked out for the operation.
        Connection { message: String } =>
            "repository connection failed: {message}",
        /// A uniqueness or referential constraint rejected the write.
        Constraint { message: String } =>
            "repository constraint violated: {message}",
        /// The addressed row does not exist.
        Missing { entity: String, id: i32 } =>
            "{entity} {id} not found",
        /// The query or mutation failed during execution.
        Query { message: String } =>
            "repository query failed: {message}",
    }
}

impl From<RepositoryError> for StorageError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Connection { message } => Self::connection_failed(message),
            RepositoryError::Constraint { message } => Self::constraint_violation(message),
            RepositoryError::Missing { entity, id } => {
                Self::backend(format!("{entity} {id} not found"))
            }
            RepositoryError::Query { message } => Self::backend(message),
        }
    }
}

impl From<RepositoryError> for ModuleError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Missing { entity, id } => Self::not_found(entity, id),
            other => Self::Storage(StorageError::from(other)),
        }
    }
}

impl From<RepositoryError> for AuthError {
    fn from(error: RepositoryError) -> Self {
        Self::Storage(StorageError::from(error))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn missing_rows_surface_as_module_not_found() {
        let error = RepositoryError::missing("project", 9_i32);

        match ModuleError::from(error) {
            ModuleError::NotFound { entity, id } => {
                assert_eq!(entity, "project");
                assert_eq!(id, 9);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[rstest]
    #[case(
        RepositoryError::connection("pool exhausted"),
        "storage connection failed: pool exhausted"
    )]
    #[case(
        RepositoryError::constraint("duplicate email"),
        "storage constraint violated: duplicate email"
    )]
    #[case(
        RepositoryError::query("malformed filter"),
        "storage backend error: malformed filter"
    )]
    fn adapter_failures_surface_as_storage(
        #[case] error: RepositoryError,
        #[case] expected: &str,
    ) {
        assert_eq!(StorageError::from(error).to_string(), expected);
    }

    #[rstest]
    fn auth_conversion_wraps_storage() {
        let error = RepositoryError::connection("socket closed");

        match AuthError::from(error) {
            AuthError::Storage(storage) => {
                assert_eq!(
                    storage.to_string(),
                    "storage connection failed: socket closed"
                );
            }
            other => panic!("expected Storage, got {other:?}"),
        }
    }
}
