// Copyright 2025 Cowboy AI, LLC.

//! Relationship consistency checks
//!
//! Each check resolves the entities it names through the store and either
//! succeeds or fails with one [`ViolationKind`]. Checks never mutate; callers
//! run every check an operation needs before touching the store, so a
//! rejected operation leaves no partial state behind.
//!
//! Not-found errors from the store propagate unchanged.

use tracing::debug;

use crate::authorization::Caller;
use crate::domain::{
    Criteria, CriteriaId, Evaluation, JobTitle, JobTitleId, OrganizationId, Review, ReviewId, Team,
    TeamId, User, UserId,
};
use crate::errors::{DomainError, DomainResult, ViolationKind};
use crate::store::{list, load, EntityStore};

/// Consistency predicates over the entity graph
///
/// Borrowed per operation; holds no state of its own.
pub struct RelationshipValidator<'a, S: EntityStore + ?Sized> {
    store: &'a S,
}

fn reject(kind: ViolationKind, message: &str) -> DomainResult<()> {
    debug!(violation = %kind, "relationship check rejected");
    Err(DomainError::violation(kind, message))
}

impl<'a, S: EntityStore + ?Sized> RelationshipValidator<'a, S> {
    /// Create a validator reading from `store`
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The job title is owned by the organization
    pub async fn job_title_in_organization(
        &self,
        organization_id: OrganizationId,
        job_title_id: JobTitleId,
    ) -> DomainResult<()> {
        let job_title: JobTitle = load(self.store, job_title_id).await?;
        if job_title.organization_id != organization_id {
            return reject(
                ViolationKind::JobTitleForeignToOrganization,
                "Given job title does not belong to this organization.",
            );
        }
        Ok(())
    }

    /// The criteria is owned by the organization
    pub async fn criteria_in_organization(
        &self,
        organization_id: OrganizationId,
        criteria_id: CriteriaId,
    ) -> DomainResult<()> {
        let criteria: Criteria = load(self.store, criteria_id).await?;
        if criteria.organization_id != organization_id {
            return reject(
                ViolationKind::CriteriaForeignToOrganization,
                "Given criteria does not belong to this organization.",
            );
        }
        Ok(())
    }

    /// The team is owned by the organization
    pub async fn team_in_organization(
        &self,
        organization_id: OrganizationId,
        team_id: TeamId,
    ) -> DomainResult<()> {
        let team: Team = load(self.store, team_id).await?;
        if team.organization_id != organization_id {
            return reject(
                ViolationKind::TeamForeignToOrganization,
                "Given team does not belong to this organization.",
            );
        }
        Ok(())
    }

    /// The user belongs to the organization
    pub async fn user_in_organization(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> DomainResult<()> {
        let user: User = load(self.store, user_id).await?;
        if user.organization_id != organization_id {
            return reject(
                ViolationKind::UserForeignToOrganization,
                "Given user does not belong to this organization.",
            );
        }
        Ok(())
    }

    /// Every user belongs to the organization; stops at the first failure
    pub async fn users_in_organization(
        &self,
        organization_id: OrganizationId,
        user_ids: &[UserId],
    ) -> DomainResult<()> {
        for &user_id in user_ids {
            self.user_in_organization(organization_id, user_id).await?;
        }
        Ok(())
    }

    /// The user is currently a member of the team
    pub async fn user_is_team_member(&self, team_id: TeamId, user_id: UserId) -> DomainResult<()> {
        let user: User = load(self.store, user_id).await?;
        let team: Team = load(self.store, team_id).await?;
        if !user.is_in_team(team.id) {
            return reject(
                ViolationKind::UserNotInTeam,
                "Given user is not a member of this team.",
            );
        }
        Ok(())
    }

    /// The user is not currently a member of the team
    pub async fn user_is_not_team_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> DomainResult<()> {
        let user: User = load(self.store, user_id).await?;
        let team: Team = load(self.store, team_id).await?;
        if user.is_in_team(team.id) {
            return reject(
                ViolationKind::UserAlreadyInTeam,
                "Given user is already a member of this team.",
            );
        }
        Ok(())
    }

    /// Both users share a team and are different users
    ///
    /// The team condition is checked first. Two users without a team count
    /// as sharing one.
    pub async fn same_team_distinct_users(&self, first: UserId, second: UserId) -> DomainResult<()> {
        let first: User = load(self.store, first).await?;
        let second: User = load(self.store, second).await?;
        if first.team_id != second.team_id {
            return reject(
                ViolationKind::ReviewAcrossTeams,
                "Reviewed employee and reviewer are in different teams.",
            );
        }
        if first.id == second.id {
            return reject(ViolationKind::SelfReview, "You cannot review yourself.");
        }
        Ok(())
    }

    /// The job title and criteria are owned by the same organization
    pub async fn job_title_and_criteria_same_organization(
        &self,
        job_title_id: JobTitleId,
        criteria_id: CriteriaId,
    ) -> DomainResult<()> {
        let job_title: JobTitle = load(self.store, job_title_id).await?;
        let criteria: Criteria = load(self.store, criteria_id).await?;
        if job_title.organization_id != criteria.organization_id {
            return reject(
                ViolationKind::CrossOrganizationJobTitleCriteria,
                "Given criteria and job title belong to different organizations.",
            );
        }
        Ok(())
    }

    /// The team and user belong to the same organization
    pub async fn team_and_user_same_organization(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> DomainResult<()> {
        let team: Team = load(self.store, team_id).await?;
        let user: User = load(self.store, user_id).await?;
        if team.organization_id != user.organization_id {
            return reject(
                ViolationKind::CrossOrganizationTeamUser,
                "Given team and user belong to different organizations.",
            );
        }
        Ok(())
    }

    /// The team and criteria belong to the same organization
    pub async fn team_and_criteria_same_organization(
        &self,
        team_id: TeamId,
        criteria_id: CriteriaId,
    ) -> DomainResult<()> {
        let team: Team = load(self.store, team_id).await?;
        let criteria: Criteria = load(self.store, criteria_id).await?;
        if team.organization_id != criteria.organization_id {
            return reject(
                ViolationKind::CrossOrganizationTeamCriteria,
                "Given team and criteria belong to different organizations.",
            );
        }
        Ok(())
    }

    /// The user and criteria belong to the same organization
    pub async fn user_and_criteria_same_organization(
        &self,
        user_id: UserId,
        criteria_id: CriteriaId,
    ) -> DomainResult<()> {
        let user: User = load(self.store, user_id).await?;
        let criteria: Criteria = load(self.store, criteria_id).await?;
        if user.organization_id != criteria.organization_id {
            return reject(
                ViolationKind::CrossOrganizationUserCriteria,
                "Given user and criteria belong to different organizations.",
            );
        }
        Ok(())
    }

    /// A managing caller only sees reviews of its own organization
    pub async fn review_in_manager_organization(
        &self,
        caller: &Caller,
        review_id: ReviewId,
    ) -> DomainResult<()> {
        let review: Review = load(self.store, review_id).await?;
        if review.organization_id != caller.organization_id {
            return reject(
                ViolationKind::ManagerReviewUnrelated,
                "Given review and current manager are in different organizations.",
            );
        }
        Ok(())
    }

    /// A leading caller only sees reviews of its own team
    pub async fn review_in_leader_team(&self, caller: &Caller, review_id: ReviewId) -> DomainResult<()> {
        let review: Review = load(self.store, review_id).await?;
        if caller.team_id != Some(review.team_id) {
            return reject(
                ViolationKind::TeamLeaderReviewUnrelated,
                "Given review and current team leader are in different teams.",
            );
        }
        Ok(())
    }

    /// Every evaluated criterion is assigned to the reviewee
    pub async fn evaluation_within_assigned_criteria(
        &self,
        reviewee_id: UserId,
        evaluation: &Evaluation,
    ) -> DomainResult<()> {
        let reviewee: User = load(self.store, reviewee_id).await?;
        if let Some(criteria_id) = evaluation.keys().find(|id| !reviewee.has_criteria(**id)) {
            debug!(criteria_id = %criteria_id, reviewee_id = %reviewee.id, "criteria not assigned");
            return reject(
                ViolationKind::CriteriaNotAssigned,
                "Evaluation scores a criteria that is not assigned to the reviewed employee.",
            );
        }
        Ok(())
    }

    /// No job title with this title exists in the organization yet
    pub async fn job_title_name_available(
        &self,
        organization_id: OrganizationId,
        title: &str,
    ) -> DomainResult<()> {
        let titles: Vec<JobTitle> = list(self.store, organization_id).await?;
        if titles.iter().any(|existing| existing.title == title.trim()) {
            return reject(
                ViolationKind::JobTitleExistsInOrganization,
                "Given job title already exists in this organization.",
            );
        }
        Ok(())
    }

    /// No user currently holds the job title
    pub async fn job_title_unused(&self, job_title_id: JobTitleId) -> DomainResult<()> {
        let job_title: JobTitle = load(self.store, job_title_id).await?;
        let users: Vec<User> = list(self.store, job_title.organization_id).await?;
        if users.iter().any(|user| user.job_title_id == Some(job_title.id)) {
            return reject(
                ViolationKind::JobTitleInUse,
                "Cannot remove the job title while employees are using it.",
            );
        }
        Ok(())
    }
}
