// Copyright 2025 Cowboy AI, LLC.

//! Users and roles

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::{CriteriaId, JobTitleId, OrganizationId, OrganizationScoped, TeamId};
use crate::entity::{DomainEntity, EntityId};

/// User identity
pub type UserId = EntityId<User>;

/// Closed set of roles a user can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Manages organizations; may act across tenants for that purpose
    Admin,
    /// Manages teams, users, criteria and reviews in one organization
    Manager,
    /// Leads a single team and reviews its members
    TeamLeader,
    /// Regular member; is reviewed
    Employee,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::TeamLeader, Role::Employee];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::TeamLeader => "TEAM_LEADER",
            Role::Employee => "EMPLOYEE",
        };
        f.write_str(label)
    }
}

/// A member of an organization
///
/// ## Invariants
/// - `job_title_id`, if set, belongs to `organization_id`
/// - `team_id`, if set, belongs to `organization_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identity; assigned by the store on insert
    pub id: UserId,
    /// Given name
    pub name: String,
    /// Family name
    pub surname: String,
    /// Owning organization
    pub organization_id: OrganizationId,
    /// Current job title
    pub job_title_id: Option<JobTitleId>,
    /// Current team
    pub team_id: Option<TeamId>,
    /// Role held in the organization
    pub role: Role,
    /// Criteria this user is evaluated against
    pub criteria: BTreeSet<CriteriaId>,
}

impl User {
    /// Create an unsaved employee with no team, job title or criteria
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        organization_id: OrganizationId,
    ) -> Self {
        Self {
            id: UserId::UNASSIGNED,
            name: name.into(),
            surname: surname.into(),
            organization_id,
            job_title_id: None,
            team_id: None,
            role: Role::Employee,
            criteria: BTreeSet::new(),
        }
    }

    /// Set the role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the job title
    pub fn with_job_title(mut self, job_title_id: JobTitleId) -> Self {
        self.job_title_id = Some(job_title_id);
        self
    }

    /// "Name Surname", as shown on score reports
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_string()
    }

    /// Whether the criteria is assigned to this user
    pub fn has_criteria(&self, criteria_id: CriteriaId) -> bool {
        self.criteria.contains(&criteria_id)
    }

    /// Whether the user currently belongs to the team
    pub fn is_in_team(&self, team_id: TeamId) -> bool {
        self.team_id == Some(team_id)
    }
}

impl DomainEntity for User {
    const ENTITY_TYPE: &'static str = "User";

    fn id(&self) -> UserId {
        self.id
    }

    fn set_id(&mut self, id: UserId) {
        self.id = id;
    }
}

impl OrganizationScoped for User {
    fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }
}
