// Copyright 2025 Cowboy AI, LLC.

//! Review submission and retrieval

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use super::ServiceContext;
use crate::authorization::{Caller, Operation};
use crate::config::DomainConfig;
use crate::domain::{Evaluation, Review, ReviewId, Role, TeamId, User, UserId};
use crate::errors::{DomainError, DomainResult, ViolationKind};
use crate::store::{insert, list, load, EntityStore};

/// Review submitted by the calling user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    /// Employee being reviewed
    pub reviewee_id: UserId,
    /// Score per criterion
    pub evaluation: Evaluation,
}

/// Review operations
pub struct ReviewService<S: EntityStore + ?Sized> {
    context: ServiceContext<S>,
}

impl<S: EntityStore + ?Sized> ReviewService<S> {
    /// Create the service over `store`
    pub fn new(store: Arc<S>, config: DomainConfig) -> Self {
        Self::from_context(ServiceContext::new(store, config))
    }

    pub(super) fn from_context(context: ServiceContext<S>) -> Self {
        Self { context }
    }

    /// Record the caller's review of a teammate
    ///
    /// The review is filed under the team both users share. Every scored
    /// criterion must be assigned to the reviewee and every score must lie
    /// within the configured range.
    pub async fn submit_review(&self, caller: &Caller, request: NewReview) -> DomainResult<Review> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::SubmitReview)?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let reviewee: User = load(self.context.store(), request.reviewee_id).await?;
        gate.check_authentication(reviewee.organization_id)?;

        let validator = self.context.validator();
        validator
            .users_in_organization(caller.organization_id, &[caller.user_id, reviewee.id])
            .await?;
        validator.same_team_distinct_users(caller.user_id, reviewee.id).await?;
        validator
            .evaluation_within_assigned_criteria(reviewee.id, &request.evaluation)
            .await?;
        for &criteria_id in request.evaluation.keys() {
            validator
                .criteria_in_organization(caller.organization_id, criteria_id)
                .await?;
        }
        self.check_score_range(&request.evaluation)?;

        let reviewer: User = load(self.context.store(), caller.user_id).await?;
        let team_id = reviewer.team_id.ok_or_else(|| {
            DomainError::violation(
                ViolationKind::ReviewAcrossTeams,
                "Reviewed employee and reviewer are in different teams.",
            )
        })?;

        let review = Review::new(
            reviewer.id,
            reviewee.id,
            team_id,
            caller.organization_id,
            request.evaluation,
        );
        let review = insert(self.context.store(), review).await?;
        info!(
            review_id = %review.id,
            reviewer_id = %review.reviewer_id,
            reviewee_id = %review.reviewee_id,
            team_id = %review.team_id,
            "review submitted"
        );
        Ok(review)
    }

    /// Load a review visible to the caller
    ///
    /// Managers see reviews of their organization; team leaders see reviews
    /// of their own team.
    pub async fn get_review(&self, caller: &Caller, review_id: ReviewId) -> DomainResult<Review> {
        self.context.gate(caller).require_role(Operation::ViewReviews)?;
        let review: Review = load(self.context.store(), review_id).await?;

        let validator = self.context.validator();
        match caller.role {
            Role::TeamLeader => validator.review_in_leader_team(caller, review_id).await?,
            _ => validator.review_in_manager_organization(caller, review_id).await?,
        }
        Ok(review)
    }

    /// Reviews filed under a team, oldest first
    pub async fn list_team_reviews(&self, caller: &Caller, team_id: TeamId) -> DomainResult<Vec<Review>> {
        self.context
            .gate(caller)
            .authorize(Operation::ViewReviews, caller.organization_id)?;
        self.context
            .validator()
            .team_in_organization(caller.organization_id, team_id)
            .await?;
        if caller.role == Role::TeamLeader && caller.team_id != Some(team_id) {
            return Err(DomainError::violation(
                ViolationKind::TeamLeaderReviewUnrelated,
                "Given team is not led by the current team leader.",
            ));
        }

        let reviews: Vec<Review> = list(self.context.store(), caller.organization_id).await?;
        Ok(reviews
            .into_iter()
            .filter(|review| review.team_id == team_id)
            .collect())
    }

    fn check_score_range(&self, evaluation: &Evaluation) -> DomainResult<()> {
        let scoring = self.context.config.scoring;
        match evaluation.iter().find(|(_, score)| !scoring.accepts(**score)) {
            Some((criteria_id, score)) => {
                debug!(criteria_id = %criteria_id, score, "score out of range");
                Err(DomainError::violation(
                    ViolationKind::ScoreOutOfRange,
                    format!(
                        "Scores must be between {} and {}.",
                        scoring.min_score, scoring.max_score
                    ),
                ))
            }
            None => Ok(()),
        }
    }
}
