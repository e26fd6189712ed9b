// Copyright 2025 Cowboy AI, LLC.

//! # Review Domain
//!
//! Domain core of a multi-tenant performance review system.
//!
//! Organizations own teams, users, job titles and evaluation criteria.
//! Managers and team leaders review the employees of their team against the
//! criteria assigned to each employee, and scores are averaged per criterion.
//!
//! The crate provides:
//! - **Entities**: organizations, teams, users, job titles, criteria and reviews,
//!   linked by phantom-typed IDs
//! - **Entity store**: async repository ports plus an in-memory adapter
//! - **Relationship validator**: consistency checks over the entity graph
//! - **Authorization gate**: role and tenant checks for an explicit caller
//! - **Score aggregator**: per-criterion averages over a review history
//! - **Services**: the operations above composed into units of work
//!
//! ## Design Principles
//!
//! 1. **Type Safety**: IDs of different entity types never mix
//! 2. **Explicit Identity**: the caller is passed in, never read from ambient state
//! 3. **Check Before Write**: every check runs before the first mutation
//! 4. **Tenant Isolation**: no operation crosses an organization boundary
//!    unless an admin manages organizations

#![warn(missing_docs)]

pub mod authorization;
pub mod config;
pub mod domain;
mod entity;
mod errors;
pub mod scoring;
pub mod services;
pub mod store;
pub mod validation;

pub use authorization::{AuthorizationGate, Caller, Operation};
pub use config::{AuthorizationConfig, DomainConfig, ScoringConfig};
pub use domain::{
    Criteria, CriteriaId, Evaluation, JobTitle, JobTitleId, Organization, OrganizationId,
    OrganizationScoped, Review, ReviewId, Role, Team, TeamId, User, UserId,
};
pub use entity::{DomainEntity, EntityId};
pub use errors::{DomainError, DomainResult, ViolationKind};
pub use scoring::{EmployeeScore, ScoreAggregator};
pub use services::{
    CriteriaService, JobTitleService, NewReview, NewUser, OrganizationService, ReviewDomain,
    ReviewService, TeamService, UserFilter, UserService,
};
pub use store::{EntityStore, InMemoryEntityStore, Repository, UnitOfWork};
pub use validation::RelationshipValidator;
