// Copyright 2025 Cowboy AI, LLC.

//! Authorization gate
//!
//! Decides whether the authenticated caller may run an operation against an
//! organization. The caller's identity is always passed in explicitly; the
//! gate reads no ambient session state.
//!
//! Evaluation order: the role check runs first, then the organization check.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AuthorizationConfig;
use crate::domain::{OrganizationId, Role, TeamId, User, UserId};
use crate::errors::{DomainError, DomainResult, ViolationKind};

/// Authenticated identity of the user issuing a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// Authenticated user
    pub user_id: UserId,
    /// Organization the user belongs to
    pub organization_id: OrganizationId,
    /// Role held by the user
    pub role: Role,
    /// Team the user belongs to, if any
    pub team_id: Option<TeamId>,
}

impl Caller {
    /// Build the caller identity from a stored user
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            organization_id: user.organization_id,
            role: user.role,
            team_id: user.team_id,
        }
    }
}

/// Operations subject to role gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Create, rename or delete organizations
    ManageOrganization,
    /// Add a user to an organization
    AddUser,
    /// Read a single user
    ViewUser,
    /// Delete a user
    RemoveUser,
    /// Create, rename or delete teams
    ManageTeam,
    /// Add or remove team members
    ManageTeamMembers,
    /// Assign or remove a team leader
    AssignTeamLeader,
    /// Create, rename or delete job titles
    ManageJobTitles,
    /// Create or delete criteria
    ManageCriteria,
    /// Assign criteria to users or teams
    AssignCriteria,
    /// Search users
    SearchUsers,
    /// Search teams
    SearchTeams,
    /// Submit a review
    SubmitReview,
    /// Read reviews
    ViewReviews,
    /// Read an employee's aggregated scores
    ViewScores,
}

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const ADMIN_OR_MANAGER: &[Role] = &[Role::Admin, Role::Manager];
const MANAGER_ONLY: &[Role] = &[Role::Manager];
const REVIEWERS: &[Role] = &[Role::Manager, Role::TeamLeader];
const ANY_ROLE: &[Role] = &Role::ALL;

impl Operation {
    /// Roles permitted to run this operation
    pub fn permitted_roles(self) -> &'static [Role] {
        match self {
            Operation::ManageOrganization => ADMIN_ONLY,
            Operation::AddUser | Operation::ViewUser | Operation::RemoveUser => ADMIN_OR_MANAGER,
            Operation::ManageTeam
            | Operation::ManageTeamMembers
            | Operation::AssignTeamLeader
            | Operation::ManageJobTitles
            | Operation::ManageCriteria
            | Operation::AssignCriteria
            | Operation::SearchUsers
            | Operation::SearchTeams => MANAGER_ONLY,
            Operation::SubmitReview | Operation::ViewReviews => REVIEWERS,
            Operation::ViewScores => ANY_ROLE,
        }
    }

    /// Whether `role` may run this operation
    pub fn permits(self, role: Role) -> bool {
        self.permitted_roles().contains(&role)
    }

    /// Organization management may cross tenant boundaries for admins
    pub fn is_organization_management(self) -> bool {
        matches!(self, Operation::ManageOrganization)
    }
}

/// Role and organization checks for one caller
pub struct AuthorizationGate<'a> {
    caller: &'a Caller,
    config: AuthorizationConfig,
}

impl<'a> AuthorizationGate<'a> {
    /// Gate for `caller` with default configuration
    pub fn new(caller: &'a Caller) -> Self {
        Self::with_config(caller, AuthorizationConfig::default())
    }

    /// Gate for `caller` with explicit configuration
    pub fn with_config(caller: &'a Caller, config: AuthorizationConfig) -> Self {
        Self { caller, config }
    }

    /// Fail with `InsufficientRole` unless the caller's role is permitted
    pub fn require_role(&self, operation: Operation) -> DomainResult<()> {
        if operation.permits(self.caller.role) {
            return Ok(());
        }
        warn!(
            user_id = %self.caller.user_id,
            role = %self.caller.role,
            ?operation,
            "role not permitted"
        );
        Err(DomainError::violation(
            ViolationKind::InsufficientRole,
            format!("Role {} may not perform {operation:?}.", self.caller.role),
        ))
    }

    /// Fail with `OrganizationMismatch` unless the caller belongs to the target
    pub fn check_authentication(&self, target_organization_id: OrganizationId) -> DomainResult<()> {
        if self.caller.organization_id == target_organization_id {
            return Ok(());
        }
        warn!(
            user_id = %self.caller.user_id,
            caller_organization = %self.caller.organization_id,
            target_organization = %target_organization_id,
            "organization mismatch"
        );
        Err(DomainError::violation(
            ViolationKind::OrganizationMismatch,
            "You are not authorized to act on this organization.",
        ))
    }

    /// Role check, then organization check
    ///
    /// Admins skip the organization check for organization management when
    /// the configuration allows it.
    pub fn authorize(&self, operation: Operation, target_organization_id: OrganizationId) -> DomainResult<()> {
        self.require_role(operation)?;
        if operation.is_organization_management()
            && self.caller.role == Role::Admin
            && self.config.admin_cross_organization
        {
            return Ok(());
        }
        self.check_authentication(target_organization_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn caller(role: Role, organization: u64) -> Caller {
        Caller {
            user_id: UserId::new(1),
            organization_id: OrganizationId::new(organization),
            role,
            team_id: None,
        }
    }

    #[test_case(Operation::ManageOrganization, Role::Admin, true)]
    #[test_case(Operation::ManageOrganization, Role::Manager, false)]
    #[test_case(Operation::AddUser, Role::Admin, true)]
    #[test_case(Operation::AddUser, Role::Manager, true)]
    #[test_case(Operation::AddUser, Role::TeamLeader, false)]
    #[test_case(Operation::AssignTeamLeader, Role::Manager, true)]
    #[test_case(Operation::AssignTeamLeader, Role::Admin, false)]
    #[test_case(Operation::SubmitReview, Role::TeamLeader, true)]
    #[test_case(Operation::SubmitReview, Role::Employee, false)]
    #[test_case(Operation::ViewScores, Role::Employee, true)]
    fn test_permission_table(operation: Operation, role: Role, allowed: bool) {
        assert_eq!(operation.permits(role), allowed);
    }

    #[test]
    fn test_same_organization_passes() {
        let manager = caller(Role::Manager, 1);
        let gate = AuthorizationGate::new(&manager);
        assert!(gate.check_authentication(OrganizationId::new(1)).is_ok());
    }

    #[test]
    fn test_other_organization_is_mismatch() {
        let manager = caller(Role::Manager, 1);
        let gate = AuthorizationGate::new(&manager);
        let err = gate.check_authentication(OrganizationId::new(2)).unwrap_err();
        assert_eq!(err.violation_kind(), Some(ViolationKind::OrganizationMismatch));
    }

    #[test]
    fn test_role_is_checked_before_organization() {
        let employee = caller(Role::Employee, 1);
        let gate = AuthorizationGate::new(&employee);
        let err = gate
            .authorize(Operation::ManageTeam, OrganizationId::new(2))
            .unwrap_err();
        assert_eq!(err.violation_kind(), Some(ViolationKind::InsufficientRole));
    }

    #[test]
    fn test_admin_crosses_organizations_only_for_organization_management() {
        let admin = caller(Role::Admin, 1);
        let gate = AuthorizationGate::new(&admin);
        assert!(gate
            .authorize(Operation::ManageOrganization, OrganizationId::new(2))
            .is_ok());

        let err = gate
            .authorize(Operation::AddUser, OrganizationId::new(2))
            .unwrap_err();
        assert_eq!(err.violation_kind(), Some(ViolationKind::OrganizationMismatch));

        // check_authentication alone never grants the exception
        assert!(gate.check_authentication(OrganizationId::new(2)).is_err());
    }

    #[test]
    fn test_admin_exception_can_be_disabled() {
        let admin = caller(Role::Admin, 1);
        let gate = AuthorizationGate::with_config(
            &admin,
            AuthorizationConfig {
                admin_cross_organization: false,
            },
        );
        let err = gate
            .authorize(Operation::ManageOrganization, OrganizationId::new(2))
            .unwrap_err();
        assert_eq!(err.violation_kind(), Some(ViolationKind::OrganizationMismatch));
    }
}
