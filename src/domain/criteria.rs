// Copyright 2025 Cowboy AI, LLC.

//! Evaluation criteria

use serde::{Deserialize, Serialize};

use super::{OrganizationId, OrganizationScoped};
use crate::entity::{DomainEntity, EntityId};

/// Criteria identity
pub type CriteriaId = EntityId<Criteria>;

/// A named evaluation dimension scoped to an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    /// Criteria identity; assigned by the store on insert
    pub id: CriteriaId,
    /// What is being evaluated, e.g. "Code quality"
    pub description: String,
    /// Owning organization
    pub organization_id: OrganizationId,
}

impl Criteria {
    /// Create an unsaved criteria
    pub fn new(description: impl Into<String>, organization_id: OrganizationId) -> Self {
        Self {
            id: CriteriaId::UNASSIGNED,
            description: description.into(),
            organization_id,
        }
    }
}

impl DomainEntity for Criteria {
    const ENTITY_TYPE: &'static str = "Criteria";

    fn id(&self) -> CriteriaId {
        self.id
    }

    fn set_id(&mut self, id: CriteriaId) {
        self.id = id;
    }
}

impl OrganizationScoped for Criteria {
    fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }
}
