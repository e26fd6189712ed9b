// Copyright 2025 Cowboy AI, LLC.

//! Error types for domain operations
//!
//! Every rule failure is a [`DomainError::Violation`] carrying a closed
//! [`ViolationKind`]. Missing references are reported separately as
//! [`DomainError::EntityNotFound`] so callers can tell a bad reference from
//! an inconsistent one.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The named domain rule that rejected an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Job title belongs to another organization
    JobTitleForeignToOrganization,
    /// Criteria belongs to another organization
    CriteriaForeignToOrganization,
    /// Team belongs to another organization
    TeamForeignToOrganization,
    /// User belongs to another organization
    UserForeignToOrganization,
    /// User is not a member of the team
    UserNotInTeam,
    /// User is already a member of the team
    UserAlreadyInTeam,
    /// Reviewer and reviewee are in different teams
    ReviewAcrossTeams,
    /// Reviewer and reviewee are the same user
    SelfReview,
    /// Job title and criteria belong to different organizations
    CrossOrganizationJobTitleCriteria,
    /// Team and user belong to different organizations
    CrossOrganizationTeamUser,
    /// Team and criteria belong to different organizations
    CrossOrganizationTeamCriteria,
    /// User and criteria belong to different organizations
    CrossOrganizationUserCriteria,
    /// Caller acts on an organization other than its own
    OrganizationMismatch,
    /// Caller's role does not permit the operation
    InsufficientRole,
    /// Review and managing caller are in different organizations
    ManagerReviewUnrelated,
    /// Review and leading caller are in different teams
    TeamLeaderReviewUnrelated,
    /// Evaluation scores a criterion the reviewee is not assigned
    CriteriaNotAssigned,
    /// Evaluation score lies outside the configured range
    ScoreOutOfRange,
    /// Organization already has a job title with this title
    JobTitleExistsInOrganization,
    /// Job title is still held by at least one user
    JobTitleInUse,
    /// A required name is blank
    InvalidName,
    /// A search was issued without any filter
    MissingSearchParameters,
}

impl ViolationKind {
    /// Stable machine-readable code for mapping onto external status codes
    pub fn code(self) -> &'static str {
        match self {
            Self::JobTitleForeignToOrganization => "JOB_TITLE_BELONGS_TO_ANOTHER_ORGANIZATION",
            Self::CriteriaForeignToOrganization => "CRITERIA_BELONGS_TO_ANOTHER_ORGANIZATION",
            Self::TeamForeignToOrganization => "TEAM_BELONGS_TO_ANOTHER_ORGANIZATION",
            Self::UserForeignToOrganization => "USER_BELONGS_TO_ANOTHER_ORGANIZATION",
            Self::UserNotInTeam => "USER_DOES_NOT_BELONG_TO_TEAM",
            Self::UserAlreadyInTeam => "USER_ALREADY_A_MEMBER",
            Self::ReviewAcrossTeams => "REVIEW_USER_IN_DIFFERENT_TEAM",
            Self::SelfReview => "REVIEW_SAME_USER",
            Self::CrossOrganizationJobTitleCriteria => "JOB_TITLE_AND_CRITERIA_IN_DIFFERENT_ORGANIZATIONS",
            Self::CrossOrganizationTeamUser => "TEAM_AND_USER_IN_DIFFERENT_ORGANIZATIONS",
            Self::CrossOrganizationTeamCriteria => "TEAM_AND_CRITERIA_IN_DIFFERENT_ORGANIZATIONS",
            Self::CrossOrganizationUserCriteria => "USER_AND_CRITERIA_IN_DIFFERENT_ORGANIZATIONS",
            Self::OrganizationMismatch => "ORGANIZATION_MISMATCH",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",
            Self::ManagerReviewUnrelated => "MANAGER_REVIEW_IN_DIFFERENT_ORGANIZATION",
            Self::TeamLeaderReviewUnrelated => "TEAM_LEADER_REVIEW_IN_DIFFERENT_TEAM",
            Self::CriteriaNotAssigned => "CRITERIA_NOT_ASSIGNED_TO_USER",
            Self::ScoreOutOfRange => "SCORE_OUT_OF_RANGE",
            Self::JobTitleExistsInOrganization => "JOB_TITLE_EXISTS_IN_ORGANIZATION",
            Self::JobTitleInUse => "JOB_TITLE_IN_USE",
            Self::InvalidName => "INVALID_NAME",
            Self::MissingSearchParameters => "SEARCH_MISSING_PARAMETERS",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors that can occur in domain operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A domain rule rejected the operation
    #[error("{kind}: {message}")]
    Violation {
        /// Which rule failed
        kind: ViolationKind,
        /// Human-readable explanation
        message: String,
    },

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    EntityNotFound {
        /// Type of entity that wasn't found
        entity_type: &'static str,
        /// ID that was searched for
        id: u64,
    },

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl DomainError {
    /// Create a rule violation
    pub fn violation(kind: ViolationKind, message: impl Into<String>) -> Self {
        DomainError::Violation {
            kind,
            message: message.into(),
        }
    }

    /// Create a not-found error for an entity type
    pub fn not_found(entity_type: &'static str, id: u64) -> Self {
        DomainError::EntityNotFound { entity_type, id }
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::EntityNotFound { .. })
    }

    /// Check if this is a rule violation
    pub fn is_violation(&self) -> bool {
        matches!(self, DomainError::Violation { .. })
    }

    /// The violated rule, if this is a violation
    pub fn violation_kind(&self) -> Option<ViolationKind> {
        match self {
            DomainError::Violation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
