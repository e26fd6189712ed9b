// Copyright 2025 Cowboy AI, LLC.

//! Job title management

use std::sync::Arc;
use tracing::info;

use super::{required_name, ServiceContext};
use crate::authorization::{Caller, Operation};
use crate::config::DomainConfig;
use crate::domain::{JobTitle, JobTitleId, Organization, OrganizationId};
use crate::errors::DomainResult;
use crate::store::{delete, insert, list, load, save, EntityStore};

/// Job title operations
pub struct JobTitleService<S: EntityStore + ?Sized> {
    context: ServiceContext<S>,
}

impl<S: EntityStore + ?Sized> JobTitleService<S> {
    /// Create the service over `store`
    pub fn new(store: Arc<S>, config: DomainConfig) -> Self {
        Self::from_context(ServiceContext::new(store, config))
    }

    pub(super) fn from_context(context: ServiceContext<S>) -> Self {
        Self { context }
    }

    /// Define a new job title and register it on the organization
    pub async fn add(
        &self,
        caller: &Caller,
        organization_id: OrganizationId,
        title: &str,
    ) -> DomainResult<JobTitle> {
        self.context.gate(caller).authorize(Operation::ManageJobTitles, organization_id)?;
        let title = required_name(title, "Job title")?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let mut organization: Organization = load(self.context.store(), organization_id).await?;
        self.context
            .validator()
            .job_title_name_available(organization_id, &title)
            .await?;

        let job_title = insert(self.context.store(), JobTitle::new(title, organization_id)).await?;
        organization.job_titles.insert(job_title.id);
        save(self.context.store(), organization).await?;
        info!(job_title_id = %job_title.id, organization_id = %organization_id, "job title added");
        Ok(job_title)
    }

    /// Job titles of an organization
    pub async fn list(&self, caller: &Caller, organization_id: OrganizationId) -> DomainResult<Vec<JobTitle>> {
        self.context.gate(caller).authorize(Operation::ManageJobTitles, organization_id)?;
        list(self.context.store(), organization_id).await
    }

    /// Change a job title's text; the new text must be unused in the organization
    pub async fn rename(
        &self,
        caller: &Caller,
        job_title_id: JobTitleId,
        new_title: &str,
    ) -> DomainResult<JobTitle> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::ManageJobTitles)?;
        let new_title = required_name(new_title, "Job title")?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let mut job_title: JobTitle = load(self.context.store(), job_title_id).await?;
        gate.check_authentication(job_title.organization_id)?;
        self.context
            .validator()
            .job_title_name_available(job_title.organization_id, &new_title)
            .await?;

        job_title.title = new_title;
        let job_title = save(self.context.store(), job_title).await?;
        info!(job_title_id = %job_title.id, "job title renamed");
        Ok(job_title)
    }

    /// Delete a job title no user holds
    pub async fn remove(&self, caller: &Caller, job_title_id: JobTitleId) -> DomainResult<()> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::ManageJobTitles)?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let job_title: JobTitle = load(self.context.store(), job_title_id).await?;
        gate.check_authentication(job_title.organization_id)?;
        self.context.validator().job_title_unused(job_title_id).await?;

        let mut organization: Organization = load(self.context.store(), job_title.organization_id).await?;
        organization.job_titles.remove(&job_title_id);
        save(self.context.store(), organization).await?;
        delete(self.context.store(), job_title_id).await?;
        info!(job_title_id = %job_title_id, "job title removed");
        Ok(())
    }
}
