// Copyright 2025 Cowboy AI, LLC.

//! Domain services
//!
//! Thin operations over the entity store. Every operation follows the same
//! order: authorization gate, then relationship checks, then the mutation or
//! query. Mutations run inside a unit of work so no conflicting writer can
//! slip between a check and the write it guards.

mod criteria;
mod job_title;
mod organization;
mod review;
mod team;
mod user;

pub use criteria::CriteriaService;
pub use job_title::JobTitleService;
pub use organization::OrganizationService;
pub use review::{NewReview, ReviewService};
pub use team::TeamService;
pub use user::{NewUser, UserFilter, UserService};

use std::sync::Arc;

use crate::authorization::{AuthorizationGate, Caller};
use crate::config::DomainConfig;
use crate::domain::is_blank;
use crate::errors::{DomainError, DomainResult, ViolationKind};
use crate::store::EntityStore;
use crate::validation::RelationshipValidator;

/// Store handle and configuration shared by the services
struct ServiceContext<S: EntityStore + ?Sized> {
    store: Arc<S>,
    config: DomainConfig,
}

impl<S: EntityStore + ?Sized> Clone for ServiceContext<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config,
        }
    }
}

impl<S: EntityStore + ?Sized> ServiceContext<S> {
    fn new(store: Arc<S>, config: DomainConfig) -> Self {
        Self { store, config }
    }

    fn store(&self) -> &S {
        &self.store
    }

    fn gate<'a>(&self, caller: &'a Caller) -> AuthorizationGate<'a> {
        AuthorizationGate::with_config(caller, self.config.authorization)
    }

    fn validator(&self) -> RelationshipValidator<'_, S> {
        RelationshipValidator::new(self.store())
    }
}

/// Trimmed copy of a required name; blank names are rejected
fn required_name(value: &str, what: &str) -> DomainResult<String> {
    if is_blank(value) {
        return Err(DomainError::violation(
            ViolationKind::InvalidName,
            format!("{what} can not be empty."),
        ));
    }
    Ok(value.trim().to_string())
}

/// Case-insensitive substring match used by the search operations
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_uppercase().contains(&needle.trim().to_uppercase())
}

/// All services over one store
pub struct ReviewDomain<S: EntityStore + ?Sized> {
    /// Organization management
    pub organizations: OrganizationService<S>,
    /// Team management and membership
    pub teams: TeamService<S>,
    /// User management, criteria assignment and scores
    pub users: UserService<S>,
    /// Job title management
    pub job_titles: JobTitleService<S>,
    /// Criteria management
    pub criteria: CriteriaService<S>,
    /// Review submission and retrieval
    pub reviews: ReviewService<S>,
}

impl<S: EntityStore + ?Sized> ReviewDomain<S> {
    /// Wire every service to `store`
    pub fn new(store: Arc<S>, config: DomainConfig) -> Self {
        let context = ServiceContext::new(store, config);
        Self {
            organizations: OrganizationService::from_context(context.clone()),
            teams: TeamService::from_context(context.clone()),
            users: UserService::from_context(context.clone()),
            job_titles: JobTitleService::from_context(context.clone()),
            criteria: CriteriaService::from_context(context.clone()),
            reviews: ReviewService::from_context(context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_name_trims_and_rejects_blank() {
        assert_eq!(required_name("  Platform ", "Team name").unwrap(), "Platform");
        let err = required_name("   ", "Team name").unwrap_err();
        assert_eq!(err.violation_kind(), Some(ViolationKind::InvalidName));
        assert_eq!(err.to_string(), "INVALID_NAME: Team name can not be empty.");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Platform Team", "form"));
        assert!(contains_ignore_case("Platform Team", " TEAM "));
        assert!(!contains_ignore_case("Platform Team", "ops"));
    }
}
