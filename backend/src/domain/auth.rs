//! Credential verification and account registration.
//!
//! The service owns every path that touches a credential hash: login,
//! registration, and password reset. Hashes never cross this boundary;
//! callers only ever see [`Principal`] values.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::error::{AuthError, ValidationError};
use crate::domain::ports::{NewPrincipal, PrincipalRepository, RepositoryError};
use crate::domain::user::{DisplayName, EmailAddress, Principal, Role};

/// Shortest accepted secret, in characters.
pub const MIN_SECRET_LEN: usize = 6;

/// Input for registering an account.
///
/// Identity fields arrive already validated; the service enforces only the
/// secret policy and email uniqueness.
#[derive(Debug)]
pub struct RegisterRequest {
    /// Shown in greetings and directories.
    pub display_name: DisplayName,
    /// Unique login identifier.
    pub email: EmailAddress,
    /// Plaintext secret, wiped on drop.
    pub secret: Zeroizing<String>,
    /// Access role for the new account.
    pub role: Role,
    /// Owning company, when assigned.
    pub company_id: Option<i32>,
    /// Owning branch, when assigned.
    pub branch_id: Option<i32>,
}

/// Authentication service over a principal store.
#[derive(Clone)]
pub struct AuthService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> AuthService<R>
where
    R: PrincipalRepository,
{
    /// Create an authentication service over the given store.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Verify credentials and return the signed-in principal.
    ///
    /// The secret is verified before the active flag is consulted, so a
    /// disabled account only learns of its state once its credentials are
    /// correct. Unknown emails and mismatched secrets share one error.
    pub fn login(&self, email: &str, secret: &str) -> Result<Principal, AuthError> {
        let record = self
            .repo
            .find_by_email(email.trim())?
            .ok_or(AuthError::InvalidCredentials)?;

        if !bcrypt::verify(secret, &record.credential_hash).unwrap_or(false) {
            return Err(AuthError::InvalidCredentials);
        }
        if !record.principal.active {
            return Err(AuthError::AccountDisabled);
        }

        info!(principal_id = record.principal.id, "login verified");
        Ok(record.principal)
    }

    /// Register a new active account.
    pub fn register(&self, request: RegisterRequest) -> Result<Principal, AuthError> {
        check_secret_policy(&request.secret)?;
        if self.repo.find_by_email(request.email.as_str())?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let account = NewPrincipal {
            display_name: request.display_name,
            email: request.email,
            credential_hash: hash_secret(&request.secret)?,
            role: request.role,
            company_id: request.company_id,
            branch_id: request.branch_id,
            active: true,
            created_at: self.clock.local().naive_local(),
        };
        let principal = self.repo.insert(&account).map_err(|error| match error {
            RepositoryError::Constraint { .. } => AuthError::DuplicateEmail,
            other => AuthError::from(other),
        })?;

        info!(principal_id = principal.id, role = %principal.role, "account registered");
        Ok(principal)
    }

    /// Replace the secret of the account registered under `email`.
    ///
    /// Existing sessions are untouched; only future logins use the new
    /// secret.
    pub fn reset_password(&self, email: &str, new_secret: &str) -> Result<(), AuthError> {
        check_secret_policy(new_secret)?;
        let record = self
            .repo
            .find_by_email(email.trim())?
            .ok_or(AuthError::UserNotFound)?;

        self.repo
            .update_credential_hash(record.principal.id, &hash_secret(new_secret)?)?;
        info!(principal_id = record.principal.id, "password reset");
        Ok(())
    }
}

fn check_secret_policy(secret: &str) -> Result<(), ValidationError> {
    if secret.chars().count() < MIN_SECRET_LEN {
        return Err(ValidationError::out_of_range(
            "password",
            format!("must be at least {MIN_SECRET_LEN} characters"),
        ));
    }
    Ok(())
}

fn hash_secret(secret: &str) -> Result<String, AuthError> {
    bcrypt::hash(secret, bcrypt::DEFAULT_COST).map_err(|error| {
        AuthError::Storage(crate::domain::error::StorageError::backend(format!(
            "credential hashing failed: {error}"
        )))
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::MemoryPrincipalRepository;
    use crate::test_support::{fixture_clock, fixture_now};

    fn request(email: &str, role: Role) -> RegisterRequest {
        RegisterRequest {
            display_name: DisplayName::new("Site Owner").unwrap(),
            email: EmailAddress::new(email).unwrap(),
            secret: Zeroizing::new("admin123".to_owned()),
            role,
            company_id: None,
            branch_id: None,
        }
    }

    #[fixture]
    fn service() -> AuthService<MemoryPrincipalRepository> {
        AuthService::new(Arc::new(MemoryPrincipalRepository::new()), fixture_clock())
    }

    #[rstest]
    fn register_then_login_round_trips(service: AuthService<MemoryPrincipalRepository>) {
        let registered = service
            .register(request("owner@company.com", Role::Owner))
            .unwrap();

        let principal = service.login("owner@company.com", "admin123").unwrap();
        assert_eq!(principal.id, registered.id);
        assert_eq!(principal.role, Role::Owner);
        assert_eq!(principal.created_at, fixture_now());
    }

    #[rstest]
    fn login_trims_the_email(service: AuthService<MemoryPrincipalRepository>) {
        service
            .register(request("owner@company.com", Role::Owner))
            .unwrap();

        assert!(service.login("  owner@company.com  ", "admin123").is_ok());
    }

    #[rstest]
    #[case("nobody@company.com", "admin123")]
    #[case("owner@company.com", "wrong-secret")]
    fn bad_credentials_share_one_error(
        service: AuthService<MemoryPrincipalRepository>,
        #[case] email: &str,
        #[case] secret: &str,
    ) {
        service
            .register(request("owner@company.com", Role::Owner))
            .unwrap();

        let err = service.login(email, secret).unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[rstest]
    fn disabled_account_rejects_only_after_verifying(
        service: AuthService<MemoryPrincipalRepository>,
    ) {
        let principal = service
            .register(request("owner@company.com", Role::Owner))
            .unwrap();
        service.repo.set_active(principal.id, false).unwrap();

        let wrong = service.login("owner@company.com", "wrong-secret").unwrap_err();
        assert_eq!(wrong, AuthError::InvalidCredentials);

        let right = service.login("owner@company.com", "admin123").unwrap_err();
        assert_eq!(right, AuthError::AccountDisabled);
    }

    #[rstest]
    fn duplicate_email_is_rejected(service: AuthService<MemoryPrincipalRepository>) {
        service
            .register(request("owner@company.com", Role::Owner))
            .unwrap();

        let err = service
            .register(request("owner@company.com", Role::Director))
            .unwrap_err();
        assert_eq!(err, AuthError::DuplicateEmail);
    }

    #[rstest]
    fn short_secrets_fail_policy(service: AuthService<MemoryPrincipalRepository>) {
        let mut short = request("owner@company.com", Role::Owner);
        short.secret = Zeroizing::new("12345".to_owned());

        let err = service.register(short).unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[rstest]
    fn reset_password_swaps_the_secret(service: AuthService<MemoryPrincipalRepository>) {
        service
            .register(request("owner@company.com", Role::Owner))
            .unwrap();

        service
            .reset_password("owner@company.com", "new-secret")
            .unwrap();

        assert_eq!(
            service.login("owner@company.com", "admin123").unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert!(service.login("owner@company.com", "new-secret").is_ok());
    }

    #[rstest]
    fn reset_for_unknown_email_reports_user_not_found(
        service: AuthService<MemoryPrincipalRepository>,
    ) {
        let err = service
            .reset_password("nobody@company.com", "new-secret")
            .unwrap_err();
        assert_eq!(err, AuthError::UserNotFound);
    }
}
