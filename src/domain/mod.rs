// Copyright 2025 Cowboy AI, LLC.

//! Review domain entities
//!
//! Organizations are the tenant boundary. Teams, users, job titles and
//! criteria each belong to exactly one organization; reviews record one
//! user scoring another within a shared team. All cross-entity references
//! are IDs resolved through an [`EntityStore`](crate::store::EntityStore),
//! never object links, so the graph has no ownership cycles.

pub mod criteria;
pub mod organization;
pub mod review;
pub mod team;
pub mod user;

pub use criteria::{Criteria, CriteriaId};
pub use organization::{JobTitle, JobTitleId, Organization, OrganizationId};
pub use review::{Evaluation, Review, ReviewId};
pub use team::{Team, TeamId};
pub use user::{Role, User, UserId};

/// Entities owned by a single organization
pub trait OrganizationScoped {
    /// The owning organization
    fn organization_id(&self) -> OrganizationId;
}

/// Whether a required name is blank once trimmed
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
