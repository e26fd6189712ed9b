// Copyright 2025 Cowboy AI, LLC.

//! Organization management

use std::sync::Arc;
use tracing::info;

use super::{required_name, ServiceContext};
use crate::authorization::{Caller, Operation};
use crate::config::DomainConfig;
use crate::domain::{Organization, OrganizationId};
use crate::errors::DomainResult;
use crate::store::{insert, load, save, EntityStore};

/// Organization operations, reserved to admins
pub struct OrganizationService<S: EntityStore + ?Sized> {
    context: ServiceContext<S>,
}

impl<S: EntityStore + ?Sized> OrganizationService<S> {
    /// Create the service over `store`
    pub fn new(store: Arc<S>, config: DomainConfig) -> Self {
        Self::from_context(ServiceContext::new(store, config))
    }

    pub(super) fn from_context(context: ServiceContext<S>) -> Self {
        Self { context }
    }

    /// Create an organization
    ///
    /// Only the role is checked; a new organization has no members to
    /// compare the caller against.
    pub async fn create_organization(&self, caller: &Caller, name: &str) -> DomainResult<Organization> {
        self.context.gate(caller).require_role(Operation::ManageOrganization)?;
        let name = required_name(name, "Organization name")?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let organization = insert(self.context.store(), Organization::new(name)).await?;
        info!(organization_id = %organization.id, "organization created");
        Ok(organization)
    }

    /// Load an organization
    pub async fn get_organization(
        &self,
        caller: &Caller,
        organization_id: OrganizationId,
    ) -> DomainResult<Organization> {
        self.context
            .gate(caller)
            .authorize(Operation::ManageOrganization, organization_id)?;
        load(self.context.store(), organization_id).await
    }

    /// Rename an organization
    pub async fn rename_organization(
        &self,
        caller: &Caller,
        organization_id: OrganizationId,
        name: &str,
    ) -> DomainResult<Organization> {
        self.context
            .gate(caller)
            .authorize(Operation::ManageOrganization, organization_id)?;
        let name = required_name(name, "Organization name")?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let mut organization: Organization = load(self.context.store(), organization_id).await?;
        organization.name = name;
        let organization = save(self.context.store(), organization).await?;
        info!(organization_id = %organization.id, "organization renamed");
        Ok(organization)
    }
}
