// Copyright 2025 Cowboy AI, LLC.

//! Organizations and their job titles

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::OrganizationScoped;
use crate::entity::{DomainEntity, EntityId};

/// Organization identity
pub type OrganizationId = EntityId<Organization>;

/// Job title identity
pub type JobTitleId = EntityId<JobTitle>;

/// Top-level tenant boundary
///
/// Owns teams, users, job titles and criteria. Only the job title set is
/// held here; the other relations are recorded on the owned entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization identity; assigned by the store on insert
    pub id: OrganizationId,
    /// Display name
    pub name: String,
    /// Job titles defined by this organization
    pub job_titles: BTreeSet<JobTitleId>,
}

impl Organization {
    /// Create an unsaved organization with no job titles
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: OrganizationId::UNASSIGNED,
            name: name.into(),
            job_titles: BTreeSet::new(),
        }
    }

    /// Whether the job title is registered on this organization
    pub fn defines_job_title(&self, job_title_id: JobTitleId) -> bool {
        self.job_titles.contains(&job_title_id)
    }
}

impl DomainEntity for Organization {
    const ENTITY_TYPE: &'static str = "Organization";

    fn id(&self) -> OrganizationId {
        self.id
    }

    fn set_id(&mut self, id: OrganizationId) {
        self.id = id;
    }
}

impl OrganizationScoped for Organization {
    fn organization_id(&self) -> OrganizationId {
        self.id
    }
}

/// Named role classification scoped to an organization
///
/// Titles are unique per organization; uniqueness is enforced by the job
/// title service before insert or rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTitle {
    /// Job title identity; assigned by the store on insert
    pub id: JobTitleId,
    /// Title text, e.g. "Software Engineer"
    pub title: String,
    /// Owning organization
    pub organization_id: OrganizationId,
}

impl JobTitle {
    /// Create an unsaved job title
    pub fn new(title: impl Into<String>, organization_id: OrganizationId) -> Self {
        Self {
            id: JobTitleId::UNASSIGNED,
            title: title.into(),
            organization_id,
        }
    }
}

impl DomainEntity for JobTitle {
    const ENTITY_TYPE: &'static str = "JobTitle";

    fn id(&self) -> JobTitleId {
        self.id
    }

    fn set_id(&mut self, id: JobTitleId) {
        self.id = id;
    }
}

impl OrganizationScoped for JobTitle {
    fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }
}
