// Copyright 2025 Cowboy AI, LLC.

//! User management, criteria assignment and score retrieval

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::{contains_ignore_case, required_name, ServiceContext};
use crate::authorization::{Caller, Operation};
use crate::config::DomainConfig;
use crate::domain::{
    Criteria, CriteriaId, JobTitleId, Organization, OrganizationId, Review, Role, Team, TeamId, User,
    UserId,
};
use crate::errors::{DomainError, DomainResult, ViolationKind};
use crate::scoring::{EmployeeScore, ScoreAggregator};
use crate::store::{delete, insert, list, load, save, EntityStore};

/// Request to add a user to an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Organization the user joins
    pub organization_id: OrganizationId,
    /// Given name
    pub name: String,
    /// Family name
    pub surname: String,
    /// Optional job title; must belong to the organization
    pub job_title_id: Option<JobTitleId>,
    /// Role; only admins may create managers or admins
    pub role: Role,
}

impl NewUser {
    /// An employee with no job title
    pub fn employee(
        organization_id: OrganizationId,
        name: impl Into<String>,
        surname: impl Into<String>,
    ) -> Self {
        Self {
            organization_id,
            name: name.into(),
            surname: surname.into(),
            job_title_id: None,
            role: Role::Employee,
        }
    }
}

/// User search parameters; at least one must be set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFilter {
    /// Exact job title
    pub job_title_id: Option<JobTitleId>,
    /// Exact team
    pub team_id: Option<TeamId>,
    /// Case-insensitive name fragment
    pub name: Option<String>,
    /// Case-insensitive surname fragment
    pub surname: Option<String>,
}

impl UserFilter {
    fn is_empty(&self) -> bool {
        let blank = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());
        self.job_title_id.is_none() && self.team_id.is_none() && blank(&self.name) && blank(&self.surname)
    }

    fn matches(&self, user: &User) -> bool {
        let text_matches = |filter: &Option<String>, value: &str| match filter.as_deref() {
            Some(fragment) if !fragment.trim().is_empty() => contains_ignore_case(value, fragment),
            _ => true,
        };
        self.job_title_id.map_or(true, |id| user.job_title_id == Some(id))
            && self.team_id.map_or(true, |id| user.is_in_team(id))
            && text_matches(&self.name, &user.name)
            && text_matches(&self.surname, &user.surname)
    }
}

/// User operations
pub struct UserService<S: EntityStore + ?Sized> {
    context: ServiceContext<S>,
}

impl<S: EntityStore + ?Sized> UserService<S> {
    /// Create the service over `store`
    pub fn new(store: Arc<S>, config: DomainConfig) -> Self {
        Self::from_context(ServiceContext::new(store, config))
    }

    pub(super) fn from_context(context: ServiceContext<S>) -> Self {
        Self { context }
    }

    /// Add a user to an organization
    pub async fn add_employee(&self, caller: &Caller, request: NewUser) -> DomainResult<User> {
        let gate = self.context.gate(caller);
        gate.authorize(Operation::AddUser, request.organization_id)?;
        if matches!(request.role, Role::Admin | Role::Manager) && caller.role != Role::Admin {
            warn!(user_id = %caller.user_id, requested_role = %request.role, "privileged user creation denied");
            return Err(DomainError::violation(
                ViolationKind::InsufficientRole,
                format!("Only an admin may add a user with role {}.", request.role),
            ));
        }
        let name = required_name(&request.name, "Name")?;
        let surname = required_name(&request.surname, "Surname")?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let _: Organization = load(self.context.store(), request.organization_id).await?;

        let mut user = User::new(name, surname, request.organization_id).with_role(request.role);
        if let Some(job_title_id) = request.job_title_id {
            self.context
                .validator()
                .job_title_in_organization(request.organization_id, job_title_id)
                .await?;
            user = user.with_job_title(job_title_id);
        }

        let user = insert(self.context.store(), user).await?;
        info!(user_id = %user.id, organization_id = %user.organization_id, role = %user.role, "user added");
        Ok(user)
    }

    /// Load a user of the caller's organization
    pub async fn get_user(&self, caller: &Caller, user_id: UserId) -> DomainResult<User> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::ViewUser)?;
        let user: User = load(self.context.store(), user_id).await?;
        gate.check_authentication(user.organization_id)?;
        Ok(user)
    }

    /// Delete a user, removing it from its team first
    ///
    /// Reviews written by or about the user are kept.
    pub async fn remove_user(&self, caller: &Caller, user_id: UserId) -> DomainResult<()> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::RemoveUser)?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let user: User = load(self.context.store(), user_id).await?;
        gate.check_authentication(user.organization_id)?;

        if let Some(team_id) = user.team_id {
            let mut team: Team = load(self.context.store(), team_id).await?;
            team.remove_member(user_id);
            save(self.context.store(), team).await?;
        }
        delete(self.context.store(), user_id).await?;
        info!(user_id = %user_id, "user removed");
        Ok(())
    }

    /// Criteria currently assigned to a user
    pub async fn list_criteria(&self, caller: &Caller, user_id: UserId) -> DomainResult<Vec<Criteria>> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::AssignCriteria)?;
        let user: User = load(self.context.store(), user_id).await?;
        gate.check_authentication(user.organization_id)?;
        self.assigned_criteria(&user).await
    }

    /// Assign a criteria to a user; assigning it twice is a no-op
    pub async fn assign_criteria(
        &self,
        caller: &Caller,
        user_id: UserId,
        criteria_id: CriteriaId,
    ) -> DomainResult<User> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::AssignCriteria)?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let mut user: User = load(self.context.store(), user_id).await?;
        gate.check_authentication(user.organization_id)?;

        let validator = self.context.validator();
        validator.criteria_in_organization(user.organization_id, criteria_id).await?;
        validator.user_and_criteria_same_organization(user_id, criteria_id).await?;

        if !user.criteria.insert(criteria_id) {
            return Ok(user);
        }
        let user = save(self.context.store(), user).await?;
        info!(user_id = %user.id, criteria_id = %criteria_id, "criteria assigned to user");
        Ok(user)
    }

    /// Unassign a criteria from a user
    pub async fn remove_criteria(
        &self,
        caller: &Caller,
        user_id: UserId,
        criteria_id: CriteriaId,
    ) -> DomainResult<User> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::AssignCriteria)?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let mut user: User = load(self.context.store(), user_id).await?;
        gate.check_authentication(user.organization_id)?;

        let validator = self.context.validator();
        validator.criteria_in_organization(user.organization_id, criteria_id).await?;
        validator.user_and_criteria_same_organization(user_id, criteria_id).await?;

        if !user.criteria.remove(&criteria_id) {
            return Err(DomainError::violation(
                ViolationKind::CriteriaNotAssigned,
                "Given criteria is not assigned to this user.",
            ));
        }
        let user = save(self.context.store(), user).await?;
        info!(user_id = %user.id, criteria_id = %criteria_id, "criteria removed from user");
        Ok(user)
    }

    /// Average score per assigned criterion over the user's reviews
    pub async fn employee_score(&self, caller: &Caller, user_id: UserId) -> DomainResult<EmployeeScore> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::ViewScores)?;
        let employee: User = load(self.context.store(), user_id).await?;
        gate.check_authentication(employee.organization_id)?;

        let criteria = self.assigned_criteria(&employee).await?;
        let reviews: Vec<Review> = list(self.context.store(), employee.organization_id).await?;
        Ok(ScoreAggregator::compute_scores(&employee, &criteria, &reviews))
    }

    /// Users of the caller's organization matching every given parameter
    pub async fn search_users(&self, caller: &Caller, filter: &UserFilter) -> DomainResult<Vec<User>> {
        self.context.gate(caller).authorize(Operation::SearchUsers, caller.organization_id)?;
        if filter.is_empty() {
            return Err(DomainError::violation(
                ViolationKind::MissingSearchParameters,
                "At least one search parameter must be specified.",
            ));
        }

        let validator = self.context.validator();
        if let Some(job_title_id) = filter.job_title_id {
            validator.job_title_in_organization(caller.organization_id, job_title_id).await?;
        }
        if let Some(team_id) = filter.team_id {
            validator.team_in_organization(caller.organization_id, team_id).await?;
        }

        let users: Vec<User> = list(self.context.store(), caller.organization_id).await?;
        Ok(users.into_iter().filter(|user| filter.matches(user)).collect())
    }

    async fn assigned_criteria(&self, user: &User) -> DomainResult<Vec<Criteria>> {
        let criteria: Vec<Criteria> = list(self.context.store(), user.organization_id).await?;
        Ok(criteria
            .into_iter()
            .filter(|criteria| user.has_criteria(criteria.id))
            .collect())
    }
}
