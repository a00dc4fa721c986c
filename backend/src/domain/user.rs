//! Principal identity: access roles, validated identity fields, and the
//! stored account record.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access roles recognised by the menu registry.
///
/// Stored as the display label, so the textual form is part of the schema
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full access to every screen.
    Owner,
    /// Operations and planning screens.
    Director,
    /// Finance and payroll screens.
    #[serde(rename = "Accounting Staff")]
    AccountingStaff,
}

impl Role {
    /// Every role, in registry order.
    pub const ALL: [Self; 3] = [Self::Owner, Self::Director, Self::AccountingStaff];

    /// The stored and displayed label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Director => "Director",
            Self::AccountingStaff => "Accounting Staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored role label is not one of the recognised three.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {label}")]
pub struct UnknownRole {
    /// The unrecognised label.
    pub label: String,
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Owner" => Ok(Self::Owner),
            "Director" => Ok(Self::Director),
            "Accounting Staff" => Ok(Self::AccountingStaff),
            other => Err(UnknownRole {
                label: other.to_string(),
            }),
        }
    }
}

/// Validation failures for identity fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityFieldError {
    /// Display name was empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// Display name exceeded the length bound.
    #[error("display name must be at most {max} characters, got {len}")]
    DisplayNameTooLong {
        /// Permitted maximum.
        max: usize,
        /// Observed length.
        len: usize,
    },
    /// Email was empty after trimming.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email lacked the mandatory separator.
    #[error("email must contain '@': {value}")]
    MalformedEmail {
        /// The offending input.
        value: String,
    },
}

/// Maximum accepted display name length in characters.
const DISPLAY_NAME_MAX: usize = 80;

/// Validated display name: trimmed, non-empty, at most 80 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a display name.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityFieldError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(IdentityFieldError::EmptyDisplayName);
        }
        let len = trimmed.chars().count();
        if len > DISPLAY_NAME_MAX {
            return Err(IdentityFieldError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
                len,
            });
        }
        Ok(Self(trimmed))
    }

    /// Borrow the validated value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = IdentityFieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated email address: trimmed, non-empty, contains `@`.
///
/// Equality is exact; the store enforces uniqueness on the stored form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an email address.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityFieldError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(IdentityFieldError::EmptyEmail);
        }
        if !trimmed.contains('@') {
            return Err(IdentityFieldError::MalformedEmail { value: trimmed });
        }
        Ok(Self(trimmed))
    }

    /// Borrow the validated value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = IdentityFieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored account record.
///
/// The credential hash is deliberately absent: it never leaves the
/// authentication path (see the principal repository port).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Surrogate id.
    pub id: i32,
    /// Shown in greetings and audit detail.
    pub display_name: DisplayName,
    /// Unique login identifier.
    pub email: EmailAddress,
    /// Access role.
    pub role: Role,
    /// Owning company, when assigned.
    pub company_id: Option<i32>,
    /// Owning branch, when assigned.
    pub branch_id: Option<i32>,
    /// Disabled accounts fail login with a dedicated error.
    pub active: bool,
    /// Stamped at registration.
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Owner", Role::Owner)]
    #[case("Director", Role::Director)]
    #[case("Accounting Staff", Role::AccountingStaff)]
    #[case("  Accounting Staff  ", Role::AccountingStaff)]
    fn role_round_trips_through_its_label(#[case] label: &str, #[case] expected: Role) {
        let parsed: Role = label.parse().expect("label should parse");
        assert_eq!(parsed, expected);
        assert_eq!(expected.as_str(), label.trim());
    }

    #[rstest]
    fn unknown_role_label_is_rejected() {
        let error = "Janitor".parse::<Role>().expect_err("should reject");
        assert_eq!(error.to_string(), "unknown role: Janitor");
    }

    #[rstest]
    fn display_name_trims_and_rejects_empty() {
        let name = DisplayName::new("  Site Owner  ").expect("valid name");
        assert_eq!(name.as_str(), "Site Owner");

        assert_eq!(
            DisplayName::new("   "),
            Err(IdentityFieldError::EmptyDisplayName)
        );
    }

    #[rstest]
    fn display_name_enforces_length_bound() {
        let long = "x".repeat(DISPLAY_NAME_MAX + 1);
        assert!(matches!(
            DisplayName::new(long),
            Err(IdentityFieldError::DisplayNameTooLong { .. })
        ));
    }

    #[rstest]
    #[case("owner@company.com", true)]
    #[case("  owner@company.com  ", true)]
    #[case("not-an-email", false)]
    #[case("", false)]
    fn email_requires_separator(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(EmailAddress::new(input).is_ok(), valid);
    }

    #[rstest]
    fn email_serde_uses_validated_form() {
        let email: EmailAddress =
            serde_json::from_str("\" owner@company.com \"").expect("valid email json");
        assert_eq!(email.as_str(), "owner@company.com");

        let rejected = serde_json::from_str::<EmailAddress>("\"nope\"");
        assert!(rejected.is_err());
    }
}
