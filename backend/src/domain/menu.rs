//! Role-gated screen registry.
//!
//! Navigation is authorized purely through this table: a role sees exactly
//! the screens listed for it, in registry order, and module handlers check
//! the same table before executing. The Owner role's menu is a superset of
//! every other role's menu; `validate_menu_registry` asserts that once at
//! startup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::session::Session;
use crate::domain::user::Role;

/// Every navigable screen, in canonical menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Summary metrics landing page.
    Dashboard,
    /// Project list and lifecycle.
    Projects,
    /// Cost estimation and milestone planning.
    Planning,
    /// Vendors and purchase orders.
    Purchasing,
    /// Stock registry and adjustments.
    Inventory,
    /// Daily production logs and quality checks.
    Production,
    /// Assets, usage logs, and maintenance.
    Machinery,
    /// Ledger, receivables, payables.
    Finance,
    /// Employees, payroll, training.
    HumanResources,
    /// Direct labour attendance.
    Labour,
    /// Contract workforce attendance.
    Contractors,
    /// Licensed software registry.
    Software,
    /// HSE incidents and site documents.
    SiteOperations,
    /// Clients and contracts.
    Crm,
    /// Audit trail and security overview.
    Compliance,
    /// Cross-module reporting and exports.
    ManagementInformation,
    /// Companies, branches, settings.
    SystemConfiguration,
    /// User administration.
    AdminConsole,
}

impl Screen {
    /// Every screen in canonical menu order. The Owner menu is exactly this.
    pub const ALL: [Self; 18] = [
        Self::Dashboard,
        Self::Projects,
        Self::Planning,
        Self::Purchasing,
        Self::Inventory,
        Self::Production,
        Self::Machinery,
        Self::Finance,
        Self::HumanResources,
        Self::Labour,
        Self::Contractors,
        Self::Software,
        Self::SiteOperations,
        Self::Crm,
        Self::Compliance,
        Self::ManagementInformation,
        Self::SystemConfiguration,
        Self::AdminConsole,
    ];

    /// The fixed menu label. Audit details and navigation requests use this
    /// exact text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Projects => "Project Management",
            Self::Planning => "Planning & Estimation",
            Self::Purchasing => "Purchase Management",
            Self::Inventory => "Store & Inventory",
            Self::Production => "Plant & Production",
            Self::Machinery => "Machinery & Vehicle Management",
            Self::Finance => "Finance & Accounts",
            Self::HumanResources => "HR & Payroll",
            Self::Labour => "Labour Management",
            Self::Contractors => "Contractor Management",
            Self::Software => "Software Management",
            Self::SiteOperations => "Site Operations & HSE",
            Self::Crm => "CRM & Contracts",
            Self::Compliance => "System Compliance",
            Self::ManagementInformation => "Info. System (MIS)",
            Self::SystemConfiguration => "System Configuration",
            Self::AdminConsole => "Management Console (Admin)",
        }
    }

    /// Resolve a menu label back to its screen.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.label() == label)
    }

    /// Roles whose menu carries this screen.
    #[must_use]
    pub const fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::Dashboard | Self::Projects | Self::ManagementInformation => {
                &[Role::Owner, Role::Director, Role::AccountingStaff]
            }
            Self::Planning | Self::Production => &[Role::Owner, Role::Director],
            Self::Finance | Self::HumanResources => &[Role::Owner, Role::AccountingStaff],
            Self::Purchasing
            | Self::Inventory
            | Self::Machinery
            | Self::Labour
            | Self::Contractors
            | Self::Software
            | Self::SiteOperations
            | Self::Crm
            | Self::Compliance
            | Self::SystemConfiguration
            | Self::AdminConsole => &[Role::Owner],
        }
    }

    /// Whether the given role's menu carries this screen.
    #[must_use]
    pub fn permits(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

/// The ordered menu for a role: `Screen::ALL` filtered to permitted screens.
#[must_use]
pub fn menu_for(role: Role) -> Vec<Screen> {
    Screen::ALL
        .iter()
        .copied()
        .filter(|screen| screen.permits(role))
        .collect()
}

/// Role check used by module handlers.
///
/// Owner passes unconditionally. Other roles pass iff listed in
/// `required_roles`; with no session the answer is always false.
#[must_use]
pub fn check_access(session: Option<&Session>, required_roles: &[Role]) -> bool {
    match session {
        Some(session) if session.role == Role::Owner => true,
        Some(session) => required_roles.contains(&session.role),
        None => false,
    }
}

/// Raised at startup when the static registry violates its own invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuRegistryError {
    /// A screen is offered to some role but withheld from Owner.
    #[error("screen {label} is not in the Owner menu")]
    OwnerMissingScreen {
        /// Label of the withheld screen.
        label: &'static str,
    },
    /// A screen lists no roles at all.
    #[error("screen {label} is unreachable: no role is permitted")]
    UnreachableScreen {
        /// Label of the orphaned screen.
        label: &'static str,
    },
}

/// Validate the static registry once at startup.
///
/// Checks that every screen admits Owner (the superset invariant) and that
/// no screen is unreachable.
pub fn validate_menu_registry() -> Result<(), MenuRegistryError> {
    for screen in Screen::ALL {
        let roles = screen.allowed_roles();
        if roles.is_empty() {
            return Err(MenuRegistryError::UnreachableScreen {
                label: screen.label(),
            });
        }
        if !roles.contains(&Role::Owner) {
            return Err(MenuRegistryError::OwnerMissingScreen {
                label: screen.label(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn owner_menu_is_a_superset_of_every_role_menu() {
        let owner_menu = menu_for(Role::Owner);
        for role in Role::ALL {
            for screen in menu_for(role) {
                assert!(
                    owner_menu.contains(&screen),
                    "{} missing from Owner menu",
                    screen.label()
                );
            }
        }
    }

    #[rstest]
    #[case(Role::Owner, 18)]
    #[case(Role::Director, 5)]
    #[case(Role::AccountingStaff, 5)]
    fn menu_sizes_match_the_registry(#[case] role: Role, #[case] expected: usize) {
        assert_eq!(menu_for(role).len(), expected);
    }

    #[rstest]
    fn director_menu_lists_operations_screens_in_order() {
        let labels: Vec<&str> = menu_for(Role::Director)
            .into_iter()
            .map(Screen::label)
            .collect();
        assert_eq!(
            labels,
            [
                "Dashboard",
                "Project Management",
                "Planning & Estimation",
                "Plant & Production",
                "Info. System (MIS)",
            ]
        );
    }

    #[rstest]
    fn accounting_menu_lists_finance_screens_in_order() {
        let labels: Vec<&str> = menu_for(Role::AccountingStaff)
            .into_iter()
            .map(Screen::label)
            .collect();
        assert_eq!(
            labels,
            [
                "Dashboard",
                "Project Management",
                "Finance & Accounts",
                "HR & Payroll",
                "Info. System (MIS)",
            ]
        );
    }

    #[rstest]
    fn every_label_resolves_back_to_its_screen() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_label(screen.label()), Some(screen));
        }
        assert_eq!(Screen::from_label("No Such Screen"), None);
    }

    #[rstest]
    fn registry_passes_startup_validation() {
        validate_menu_registry().expect("static registry should be valid");
    }

    mod access {
        use super::*;
        use crate::domain::session::Session;
        use crate::domain::user::DisplayName;

        fn session_with(role: Role) -> Session {
            Session {
                principal_id: 1,
                display_name: DisplayName::new("Probe").expect("valid name"),
                role,
                current_screen: Screen::Dashboard,
            }
        }

        #[rstest]
        fn owner_passes_any_requirement() {
            let session = session_with(Role::Owner);
            assert!(check_access(Some(&session), &[Role::Director]));
            assert!(check_access(Some(&session), &[]));
        }

        #[rstest]
        fn accounting_staff_passes_only_its_own_requirement() {
            let session = session_with(Role::AccountingStaff);
            assert!(!check_access(Some(&session), &[Role::Owner]));
            assert!(check_access(Some(&session), &[Role::AccountingStaff]));
        }

        #[rstest]
        fn empty_requirement_rejects_non_owner_roles() {
            let session = session_with(Role::Director);
            assert!(!check_access(Some(&session), &[]));
        }

        #[rstest]
        fn missing_session_never_passes() {
            assert!(!check_access(None, &[Role::Owner]));
            assert!(!check_access(None, &[]));
        }
    }
}
