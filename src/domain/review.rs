// Copyright 2025 Cowboy AI, LLC.

//! Reviews
//!
//! A review is one user scoring another on criteria assigned to the
//! reviewee. Reviews are append-only once submitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CriteriaId, OrganizationId, OrganizationScoped, TeamId, UserId};
use crate::entity::{DomainEntity, EntityId};

/// Review identity
pub type ReviewId = EntityId<Review>;

/// Per-criterion scores attached to a review, keyed by criterion identity
pub type Evaluation = BTreeMap<CriteriaId, i32>;

/// A scoring event by a reviewer of a reviewee
///
/// ## Invariants
/// - `reviewer_id != reviewee_id`
/// - reviewer and reviewee were both members of `team_id` at submission
/// - every key of `evaluation` was assigned to the reviewee at submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Review identity; assigned by the store on insert
    pub id: ReviewId,
    /// Scoring user
    pub reviewer_id: UserId,
    /// Scored user
    pub reviewee_id: UserId,
    /// Team shared by reviewer and reviewee
    pub team_id: TeamId,
    /// Owning organization
    pub organization_id: OrganizationId,
    /// Scores by criterion
    pub evaluation: Evaluation,
    /// When the review was submitted
    pub submitted_at: DateTime<Utc>,
}

impl Review {
    /// Create an unsaved review stamped with the current time
    pub fn new(
        reviewer_id: UserId,
        reviewee_id: UserId,
        team_id: TeamId,
        organization_id: OrganizationId,
        evaluation: Evaluation,
    ) -> Self {
        Self {
            id: ReviewId::UNASSIGNED,
            reviewer_id,
            reviewee_id,
            team_id,
            organization_id,
            evaluation,
            submitted_at: Utc::now(),
        }
    }

    /// Score given for a criterion, if this review evaluated it
    pub fn score_for(&self, criteria_id: CriteriaId) -> Option<i32> {
        self.evaluation.get(&criteria_id).copied()
    }
}

impl DomainEntity for Review {
    const ENTITY_TYPE: &'static str = "Review";

    fn id(&self) -> ReviewId {
        self.id
    }

    fn set_id(&mut self, id: ReviewId) {
        self.id = id;
    }
}

impl OrganizationScoped for Review {
    fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }
}
