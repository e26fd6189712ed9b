// Copyright 2025 Cowboy AI, LLC.

//! Criteria management

use std::sync::Arc;
use tracing::info;

use super::{required_name, ServiceContext};
use crate::authorization::{Caller, Operation};
use crate::config::DomainConfig;
use crate::domain::{Criteria, CriteriaId, JobTitleId, OrganizationId, User, UserId};
use crate::errors::DomainResult;
use crate::store::{delete, insert, list, load, save, EntityStore};

/// Criteria operations
pub struct CriteriaService<S: EntityStore + ?Sized> {
    context: ServiceContext<S>,
}

impl<S: EntityStore + ?Sized> CriteriaService<S> {
    /// Create the service over `store`
    pub fn new(store: Arc<S>, config: DomainConfig) -> Self {
        Self::from_context(ServiceContext::new(store, config))
    }

    pub(super) fn from_context(context: ServiceContext<S>) -> Self {
        Self { context }
    }

    /// Define a criteria in an organization
    pub async fn create(
        &self,
        caller: &Caller,
        organization_id: OrganizationId,
        description: &str,
    ) -> DomainResult<Criteria> {
        self.context.gate(caller).authorize(Operation::ManageCriteria, organization_id)?;
        let description = required_name(description, "Criteria")?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let criteria = insert(self.context.store(), Criteria::new(description, organization_id)).await?;
        info!(criteria_id = %criteria.id, organization_id = %organization_id, "criteria created");
        Ok(criteria)
    }

    /// Criteria of an organization
    pub async fn list(&self, caller: &Caller, organization_id: OrganizationId) -> DomainResult<Vec<Criteria>> {
        self.context.gate(caller).authorize(Operation::ManageCriteria, organization_id)?;
        list(self.context.store(), organization_id).await
    }

    /// Delete a criteria and unassign it from every user
    ///
    /// Past reviews keep their scores for it.
    pub async fn remove(&self, caller: &Caller, criteria_id: CriteriaId) -> DomainResult<()> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::ManageCriteria)?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let criteria: Criteria = load(self.context.store(), criteria_id).await?;
        gate.check_authentication(criteria.organization_id)?;

        let users: Vec<User> = list(self.context.store(), criteria.organization_id).await?;
        for mut user in users {
            if user.criteria.remove(&criteria_id) {
                save(self.context.store(), user).await?;
            }
        }
        delete(self.context.store(), criteria_id).await?;
        info!(criteria_id = %criteria_id, "criteria removed");
        Ok(())
    }

    /// Assign a criteria to every holder of a job title
    ///
    /// Returns the holders that already had it.
    pub async fn assign_to_job_title_holders(
        &self,
        caller: &Caller,
        job_title_id: JobTitleId,
        criteria_id: CriteriaId,
    ) -> DomainResult<Vec<UserId>> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::AssignCriteria)?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let criteria: Criteria = load(self.context.store(), criteria_id).await?;
        gate.check_authentication(criteria.organization_id)?;

        let validator = self.context.validator();
        validator
            .job_title_in_organization(criteria.organization_id, job_title_id)
            .await?;
        validator
            .job_title_and_criteria_same_organization(job_title_id, criteria_id)
            .await?;

        let users: Vec<User> = list(self.context.store(), criteria.organization_id).await?;
        let mut already_assigned = Vec::new();
        for mut user in users.into_iter().filter(|user| user.job_title_id == Some(job_title_id)) {
            if !user.criteria.insert(criteria_id) {
                already_assigned.push(user.id);
                continue;
            }
            save(self.context.store(), user).await?;
        }
        info!(
            job_title_id = %job_title_id,
            criteria_id = %criteria_id,
            skipped = already_assigned.len(),
            "criteria assigned to job title holders"
        );
        Ok(already_assigned)
    }
}
