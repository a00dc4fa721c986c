//! Error taxonomy shared across authentication, validation, storage, and
//! module handlers.
//!
//! Authentication and validation errors carry fixed, human-readable texts
//! that surface directly to the caller. Storage errors wrap whatever the
//! persistence adapter reported. Module handlers combine all three plus an
//! authorization rejection.

use thiserror::Error;

/// Authentication failures with fixed presentation texts.
///
/// The message strings are part of the contract: callers display them
/// verbatim, so they must not drift.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown email, or the secret does not verify against the stored hash.
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// Credentials verified but the account's active flag is false.
    #[error("Account is disabled.")]
    AccountDisabled,
    /// Registration attempted with an email that is already taken.
    #[error("An account with this email already exists")]
    DuplicateEmail,
    /// Password reset attempted for an email with no matching account.
    #[error("User not found")]
    UserNotFound,
    /// Input failed policy checks before any store access.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The credential store itself failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Field-level validation failures raised before any write occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A mandatory field was empty or absent.
    #[error("required field missing: {field}")]
    RequiredFieldMissing {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A value fell outside its permitted range.
    #[error("{field} out of range: {reason}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the violated bound.
        reason: String,
    },
}

impl ValidationError {
    /// A mandatory field was empty or absent.
    pub fn required(field: &'static str) -> Self {
        Self::RequiredFieldMissing { field }
    }

    /// A value fell outside its permitted range.
    pub fn out_of_range(field: &'static str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field,
            reason: reason.into(),
        }
    }
}

/// Storage failures as seen by code downstream of the repository ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The store could not be reached or a pooled connection checked out.
    #[error("storage connection failed: {message}")]
    ConnectionFailed {
        /// Driver-reported detail.
        message: String,
    },
    /// A uniqueness, foreign-key, or check constraint rejected the write.
    #[error("storage constraint violated: {message}")]
    ConstraintViolation {
        /// Driver-reported detail.
        message: String,
    },
    /// Any other driver report.
    #[error("storage backend error: {message}")]
    Backend {
        /// Driver-reported detail.
        message: String,
    },
}

impl StorageError {
    /// The store could not be reached.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
        }
    }

    /// A constraint rejected the write.
    pub fn constraint_violation(message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            message: message.into(),
        }
    }

    /// Any other driver report.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Failures returned by module handler operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleError {
    /// The session's role does not grant the screen this operation belongs to.
    #[error("access to {screen} denied")]
    AccessDenied {
        /// Menu label of the gated screen.
        screen: String,
    },
    /// The referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity noun, e.g. "project".
        entity: String,
        /// Surrogate id that failed to resolve.
        id: i32,
    },
    /// Input failed a policy check; the operation wrote nothing.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The store failed beneath the operation.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ModuleError {
    /// The session's role does not grant this screen.
    pub fn access_denied(screen: impl Into<String>) -> Self {
        Self::AccessDenied {
            screen: screen.into(),
        }
    }

    /// The referenced record does not exist.
    pub fn not_found(entity: impl Into<String>, id: i32) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Display texts are load-bearing; pin them.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AuthError::InvalidCredentials, "Invalid email or password")]
    #[case(AuthError::AccountDisabled, "Account is disabled.")]
    #[case(
        AuthError::DuplicateEmail,
        "An account with this email already exists"
    )]
    #[case(AuthError::UserNotFound, "User not found")]
    fn auth_error_texts_are_fixed(#[case] error: AuthError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn validation_errors_name_the_field() {
        let missing = ValidationError::required("name");
        assert_eq!(missing.to_string(), "required field missing: name");

        let range = ValidationError::out_of_range("progress", "must be between 0 and 100");
        assert_eq!(
            range.to_string(),
            "progress out of range: must be between 0 and 100"
        );
    }

    #[rstest]
    fn validation_errors_pass_through_auth_and_module_errors() {
        let source = ValidationError::required("email");
        let auth: AuthError = source.clone().into();
        let module: ModuleError = source.into();

        assert_eq!(auth.to_string(), "required field missing: email");
        assert_eq!(module.to_string(), "required field missing: email");
    }

    #[rstest]
    fn module_error_constructors_fill_fields() {
        let denied = ModuleError::access_denied("Finance & Accounts");
        assert_eq!(denied.to_string(), "access to Finance & Accounts denied");

        let missing = ModuleError::not_found("project", 7);
        assert_eq!(missing.to_string(), "project 7 not found");
    }
}
